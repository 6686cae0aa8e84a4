//! A small command-line store for application configuration. Each record is
//! a named, ordered set of `NAME=value` variables kept under one identifier,
//! usually `<application>__<environment>`.
//!
//! ```ignore
//! let mut store = Store::new(MemoryBackend::new());
//! store.save("web__prod", &VariableSource::Inline("PORT=80,HOST=0.0.0.0".into()))?;
//! store.update("web__prod", &VariableSource::Inline("PORT=8080".into()))?;
//! let record = store.get("web__prod")?;
//! print!("{}", record.format(OutputStyle::Shell));
//! ```
//!
//! # Operations
//!
//! [`Store`] exposes one method per verb, each a single read and at most
//! one write against the backend:
//!
//! - **`save`** parses the input and replaces the record wholesale.
//! - **`update`** upserts into the existing record: known names are
//!   replaced in place, new names are appended. A missing record is created.
//! - **`get`** fetches and decodes a record, or fails with
//!   [`EnviError::NotFound`].
//! - **`delete`** erases the record.
//! - **`delete_variables`** removes named variables. Unknown names are
//!   ignored; a missing record is [`EnviError::NotFound`]. Whether an
//!   emptied record is kept or erased is an [`EmptyRecordPolicy`].
//!
//! There is no locking between the read and the write. Concurrent updates
//! to the same record from separate processes can overwrite each other.
//!
//! # Input
//!
//! Variables arrive as an inline list (`a=1,b=2`) or a dotenv-style file
//! (see [`variables`]). Malformed file lines either abort the parse
//! ([`Strictness::Strict`], the default) or are skipped with a warning
//! ([`Strictness::Lenient`]).
//!
//! # Storage
//!
//! Values are base64-encoded before they reach the backend and decoded on
//! the way back (see [`codec`]). The backend is anything implementing
//! [`Backend`]: a local directory of JSON documents, a remote document
//! service over HTTP, or an in-memory map.
//!
//! # Settings
//!
//! The tool's own settings (backend, table, default output, parse mode)
//! are layered from defaults, `envi.toml` files, `ENVI__*` environment
//! variables, and CLI flags. See [`settings`].

pub mod backend;
pub mod codec;
pub mod error;
pub mod logging;
pub mod merge;
pub mod record;
pub mod settings;
pub mod store;
pub mod types;
pub mod variables;

#[cfg(feature = "clap")]
mod cli;
pub mod ops;

pub use backend::{Backend, Fetched, FileBackend, HttpBackend, MemoryBackend};
#[cfg(feature = "clap")]
pub use cli::{Cli, Command, SourceArgs};
pub use error::EnviError;
pub use ops::Outcome;
pub use record::{OutputStyle, Record, record_id};
pub use settings::{Settings, SettingsLoader};
pub use store::{EmptyRecordPolicy, Store, StoreOptions};
pub use types::Action;
pub use variables::{ParseMode, Strictness, Variable, VariableSource};
