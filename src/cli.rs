//! Clap adapter: the `envi` command line.
//!
//! Compiled only with the `clap` feature (on by default). The bridge to the
//! core is [`Cli::into_action()`], which validates the identifier and the
//! variable source and produces an [`Action`]. Settings-related flags are
//! forwarded to the [`SettingsLoader`] by [`Cli::settings_loader()`] as the
//! highest-priority layer.
//!
//! ```text
//! envi -a web -e prod set --variables "PORT=80,HOST=0.0.0.0"
//! envi -a web -e prod update --file prod.env
//! envi --id web__prod get -o sh
//! envi -a web -e prod delete --variables HOST
//! envi -a web -e prod delete
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::error::EnviError;
use crate::record::{OutputStyle, record_id};
use crate::settings::{BackendKind, SettingsLoader};
use crate::types::Action;
use crate::variables::VariableSource;

/// Store and retrieve per-application, per-environment configuration.
#[derive(Debug, Parser)]
#[command(name = "envi", version)]
pub struct Cli {
    /// Record identifier. Overrides --application/--environment.
    #[arg(long, global = true)]
    pub id: Option<String>,

    /// Application name; combined with --environment as `<app>__<env>`.
    #[arg(short, long, global = true)]
    pub application: Option<String>,

    /// Environment name (e.g. dev, staging, prod).
    #[arg(short, long, global = true)]
    pub environment: Option<String>,

    /// Storage backend.
    #[arg(long, global = true, value_enum)]
    pub backend: Option<BackendKind>,

    /// Table (collection) holding records.
    #[arg(long, global = true)]
    pub table: Option<String>,

    /// Base URL of the document service (http backend).
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Directory holding record documents (file backend).
    #[arg(long, global = true)]
    pub store_dir: Option<PathBuf>,

    /// Skip malformed lines in variable files instead of failing.
    #[arg(long, global = true)]
    pub lenient: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store variables, replacing any existing record.
    #[command(alias = "s")]
    Set(SourceArgs),
    /// Merge variables into a record, creating it if needed.
    #[command(alias = "u")]
    Update(SourceArgs),
    /// Print a record's variables.
    #[command(alias = "g")]
    Get {
        /// Output style (defaults to the `output` setting).
        #[arg(short, long, value_enum)]
        output: Option<OutputStyle>,
    },
    /// Delete named variables, or the whole record when none are given.
    #[command(alias = "d")]
    Delete(SourceArgs),
}

/// Where variables come from.
#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Inline list: `NAME=value,OTHER=value` (names only for delete).
    #[arg(long, conflicts_with = "file")]
    pub variables: Option<String>,

    /// Dotenv-style file, one `NAME=value` per line.
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

impl SourceArgs {
    fn into_source(self) -> Option<VariableSource> {
        match (self.variables, self.file) {
            (Some(inline), _) => Some(VariableSource::Inline(inline)),
            (None, Some(path)) => Some(VariableSource::File(path)),
            (None, None) => None,
        }
    }

    fn required(self, command: &str) -> Result<VariableSource, EnviError> {
        self.into_source().ok_or_else(|| {
            EnviError::Usage(format!("{command} requires --variables or --file"))
        })
    }
}

impl Cli {
    /// Convert parsed args into a framework-agnostic [`Action`].
    ///
    /// `delete` without a variable source maps to [`Action::Delete`]; with
    /// one, to [`Action::DeleteVariables`].
    pub fn into_action(self) -> Result<Action, EnviError> {
        let id = record_id(
            self.id.as_deref(),
            self.application.as_deref(),
            self.environment.as_deref(),
        )?;
        Ok(match self.command {
            Command::Set(args) => Action::Set {
                id,
                source: args.required("set")?,
            },
            Command::Update(args) => Action::Update {
                id,
                source: args.required("update")?,
            },
            Command::Get { output } => Action::Get { id, output },
            Command::Delete(args) => match args.into_source() {
                Some(source) => Action::DeleteVariables { id, source },
                None => Action::Delete { id },
            },
        })
    }

    /// Settings loader with this invocation's flags as overrides.
    pub fn settings_loader(&self) -> SettingsLoader {
        SettingsLoader::new()
            .set("backend", self.backend.map(BackendKind::as_str))
            .set("table", self.table.clone())
            .set("http.endpoint", self.endpoint.clone())
            .set(
                "file.dir",
                self.store_dir.as_ref().map(|p| p.display().to_string()),
            )
            .set("parse.strictness", self.lenient.then_some("lenient"))
    }
}
