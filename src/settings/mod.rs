//! Settings for the `envi` tool itself (not the records it stores).
//!
//! [`Settings`] is a confique struct: its `#[config(default)]` attributes are
//! the lowest layer and its doc comments describe each key. Loading is
//! layered by [`SettingsLoader`]:
//!
//! ```text
//! Compiled defaults       #[config(default = ...)]
//!        ↑ overridden by
//! envi.toml files         platform config dir, then working directory
//!        ↑ overridden by
//! Environment vars        ENVI__KEY, ENVI__SECTION__KEY
//!        ↑ overridden by
//! CLI flags               SettingsLoader::set()
//! ```
//!
//! Every layer is sparse; unset keys fall through to the layer below.

mod load;

use std::path::PathBuf;
use std::time::Duration;

use confique::Config;
use serde::{Deserialize, Serialize};

use crate::backend::{Backend, FileBackend, HttpBackend};
use crate::error::EnviError;
use crate::record::OutputStyle;
use crate::store::{EmptyRecordPolicy, StoreOptions};
use crate::variables::Strictness;

pub use load::{FILE_NAME, SettingsLoader};

/// Which backend adapter stores records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    File,
    Http,
}

impl BackendKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BackendKind::File => "file",
            BackendKind::Http => "http",
        }
    }
}

#[derive(Config, Debug)]
pub struct Settings {
    /// Storage backend: "file" (local JSON documents) or "http" (document service).
    #[config(default = "file")]
    pub backend: BackendKind,

    /// Table (collection) that records live in.
    #[config(default = "envi")]
    pub table: String,

    /// Default output style for `get`: "text", "json", or "sh".
    #[config(default = "text")]
    pub output: OutputStyle,

    /// Removing a record's last variable either keeps an empty record ("keep")
    /// or erases it ("erase").
    #[config(default = "keep")]
    pub empty_record: EmptyRecordPolicy,

    /// Input parsing.
    #[config(nested)]
    pub parse: ParseSettings,

    /// Local file backend.
    #[config(nested)]
    pub file: FileSettings,

    /// Remote document service backend.
    #[config(nested)]
    pub http: HttpSettings,
}

#[derive(Config, Debug)]
pub struct ParseSettings {
    /// "strict" aborts on a malformed file line; "lenient" skips it with a warning.
    #[config(default = "strict")]
    pub strictness: Strictness,
}

#[derive(Config, Debug)]
pub struct FileSettings {
    /// Directory holding record documents. Defaults to the platform data
    /// directory, e.g. `~/.local/share/envi/<table>`.
    pub dir: Option<PathBuf>,
}

#[derive(Config, Debug)]
pub struct HttpSettings {
    /// Base URL of the document service.
    #[config(default = "http://127.0.0.1:8000")]
    pub endpoint: String,

    /// Request timeout in seconds.
    #[config(deserialize_with = seconds, default = 10)]
    pub timeout_secs: u64,
}

/// Whole seconds, as a number or as a numeric string (environment values
/// arrive as strings).
fn seconds<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(|_| {
            serde::de::Error::custom(format!("expected whole seconds, found `{s}`"))
        }),
    }
}

impl Settings {
    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            strictness: self.parse.strictness,
            empty_record: self.empty_record,
        }
    }

    /// Construct the configured backend.
    pub fn open_backend(&self) -> Result<Box<dyn Backend>, EnviError> {
        match self.backend {
            BackendKind::File => {
                let dir = match &self.file.dir {
                    Some(dir) => dir.clone(),
                    None => FileBackend::default_dir(&self.table).ok_or_else(|| {
                        EnviError::Usage(
                            "no data directory available; set file.dir or --store-dir".into(),
                        )
                    })?,
                };
                tracing::debug!(dir = %dir.display(), "using file backend");
                Ok(Box::new(FileBackend::new(dir)))
            }
            BackendKind::Http => {
                tracing::debug!(endpoint = %self.http.endpoint, table = %self.table, "using http backend");
                let timeout = Duration::from_secs(self.http.timeout_secs);
                Ok(Box::new(HttpBackend::new(
                    &self.http.endpoint,
                    &self.table,
                    timeout,
                )?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = Settings::builder().load().unwrap();
        assert_eq!(settings.backend, BackendKind::File);
        assert_eq!(settings.table, "envi");
        assert_eq!(settings.output, OutputStyle::Text);
        assert_eq!(settings.empty_record, EmptyRecordPolicy::Keep);
        assert_eq!(settings.parse.strictness, Strictness::Strict);
        assert_eq!(settings.file.dir, None);
        assert_eq!(settings.http.timeout_secs, 10);
    }

    #[test]
    fn store_options_follow_settings() {
        let mut settings = Settings::builder().load().unwrap();
        settings.parse.strictness = Strictness::Lenient;
        settings.empty_record = EmptyRecordPolicy::Erase;
        assert_eq!(
            settings.store_options(),
            StoreOptions {
                strictness: Strictness::Lenient,
                empty_record: EmptyRecordPolicy::Erase,
            }
        );
    }

    #[test]
    fn file_backend_uses_configured_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut settings = Settings::builder().load().unwrap();
        settings.file.dir = Some(dir.path().to_path_buf());

        let mut backend = settings.open_backend().unwrap();
        backend
            .write(&crate::record::Record::empty("app__dev"))
            .unwrap();
        assert!(dir.path().join("app__dev.json").exists());
    }
}
