use std::collections::BTreeMap;

use crate::backend::{Backend, Fetched, from_document, to_document};
use crate::error::EnviError;
use crate::record::Record;

/// In-process backend. Stores serialized documents, so reads go through the
/// same encode/decode path as the persistent adapters.
#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    documents: BTreeMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored document for `id`, if any.
    pub fn document(&self, id: &str) -> Option<&str> {
        self.documents.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl Backend for MemoryBackend {
    fn fetch(&self, id: &str) -> Result<Fetched, EnviError> {
        match self.documents.get(id) {
            Some(doc) => Ok(Fetched::Found(from_document(id, doc)?)),
            None => Ok(Fetched::Absent),
        }
    }

    fn write(&mut self, record: &Record) -> Result<(), EnviError> {
        let doc = to_document(record)?;
        self.documents.insert(record.id.clone(), doc);
        Ok(())
    }

    fn erase(&mut self, id: &str) -> Result<(), EnviError> {
        self.documents.remove(id);
        Ok(())
    }
}
