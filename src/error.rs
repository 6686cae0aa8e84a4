use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnviError {
    #[error("Malformed variable at {position}: '{input}' ({reason})")]
    Format {
        position: String,
        input: String,
        reason: &'static str,
    },

    #[error("No configuration found for '{0}'")]
    NotFound(String),

    #[error("Backend {operation} failed for '{id}': {reason}")]
    Backend {
        operation: &'static str,
        id: String,
        reason: String,
    },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid settings: {0}")]
    Settings(#[from] confique::Error),

    #[error("Failed to parse settings file {path}: {source}")]
    SettingsFile {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid settings value: {0}")]
    SettingsValue(toml::de::Error),

    #[error("{0}")]
    Usage(String),
}

impl EnviError {
    pub(crate) fn backend(
        operation: &'static str,
        id: &str,
        reason: impl std::fmt::Display,
    ) -> Self {
        EnviError::Backend {
            operation,
            id: id.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Process exit code for this error when surfaced by the binary.
    pub fn exit_code(&self) -> i32 {
        match self {
            EnviError::Usage(_) => 2,
            EnviError::NotFound(_) => 3,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_error_names_input_and_position() {
        let err = EnviError::Format {
            position: "line 3".into(),
            input: "BROKEN".into(),
            reason: "expected name=value",
        };
        let msg = err.to_string();
        assert!(msg.contains("line 3"));
        assert!(msg.contains("BROKEN"));
        assert!(msg.contains("name=value"));
    }

    #[test]
    fn not_found_mentions_id() {
        let err = EnviError::NotFound("app__dev".into());
        assert!(err.to_string().contains("app__dev"));
    }

    #[test]
    fn backend_error_formats() {
        let err = EnviError::backend("write", "app__dev", "connection refused");
        let msg = err.to_string();
        assert!(msg.contains("write"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn exit_codes_by_kind() {
        assert_eq!(EnviError::Usage("missing --id".into()).exit_code(), 2);
        assert_eq!(EnviError::NotFound("x".into()).exit_code(), 3);
        assert_eq!(EnviError::backend("fetch", "x", "boom").exit_code(), 1);
    }
}
