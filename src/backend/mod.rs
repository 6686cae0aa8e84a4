//! Document backends.
//!
//! The store facade only needs three primitives from wherever records live:
//! fetch one by id, write one whole, erase one. [`Backend`] captures that
//! contract. Backends never see partial updates; every write carries the
//! complete serialized record.
//!
//! Adapters:
//!
//! - [`MemoryBackend`]: documents held in a map, for tests and embedding.
//! - [`FileBackend`]: one JSON document per record in a local directory.
//! - [`HttpBackend`]: a remote document service over HTTP.
//!
//! Absence is a value ([`Fetched::Absent`]), not an error, so callers can
//! branch on it without inspecting error text.

mod file;
mod http;
mod memory;

pub use file::FileBackend;
pub use http::HttpBackend;
pub use memory::MemoryBackend;

use crate::error::EnviError;
use crate::record::Record;

/// Result of looking a record up by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched {
    Found(Record),
    Absent,
}

impl Fetched {
    pub fn into_option(self) -> Option<Record> {
        match self {
            Fetched::Found(record) => Some(record),
            Fetched::Absent => None,
        }
    }
}

/// Storage contract consumed by [`Store`](crate::Store).
///
/// Records passed to [`write`](Backend::write) already carry encoded values,
/// and fetched records are returned as stored; the codec lives in the facade.
pub trait Backend {
    fn fetch(&self, id: &str) -> Result<Fetched, EnviError>;

    /// Store `record` under `record.id`, replacing any existing document.
    fn write(&mut self, record: &Record) -> Result<(), EnviError>;

    /// Remove the record. Erasing an absent id is not an error.
    fn erase(&mut self, id: &str) -> Result<(), EnviError>;
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn fetch(&self, id: &str) -> Result<Fetched, EnviError> {
        (**self).fetch(id)
    }

    fn write(&mut self, record: &Record) -> Result<(), EnviError> {
        (**self).write(record)
    }

    fn erase(&mut self, id: &str) -> Result<(), EnviError> {
        (**self).erase(id)
    }
}

/// Serialize a record into its persisted document form.
pub(crate) fn to_document(record: &Record) -> Result<String, EnviError> {
    serde_json::to_string(record).map_err(|e| EnviError::backend("encode", &record.id, e))
}

/// Parse a persisted document.
pub(crate) fn from_document(id: &str, document: &str) -> Result<Record, EnviError> {
    serde_json::from_str(document).map_err(|e| EnviError::backend("decode", id, e))
}
