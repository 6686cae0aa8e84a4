//! Store facade: the five record operations over an injected [`Backend`].
//!
//! Each operation sequences parser → fetch (update, delete-variables) →
//! merge → codec → one backend write or erase. Values are decoded right
//! after a fetch and encoded right before a write, so merge logic and
//! callers only ever see plain values.
//!
//! Records are read and then written back without any locking. Two
//! processes updating the same id at once can lose one of the updates.

use serde::{Deserialize, Serialize};

use crate::backend::{Backend, Fetched};
use crate::codec;
use crate::error::EnviError;
use crate::merge;
use crate::record::Record;
use crate::variables::{ParseMode, Strictness, VariableSource};

/// What to do when a delete removes a record's last variable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyRecordPolicy {
    /// Write back the record with an empty variable list.
    #[default]
    Keep,
    /// Erase the record entirely.
    Erase,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreOptions {
    pub strictness: Strictness,
    pub empty_record: EmptyRecordPolicy,
}

pub struct Store<B: Backend> {
    backend: B,
    options: StoreOptions,
}

impl<B: Backend> Store<B> {
    pub fn new(backend: B) -> Self {
        Self::with_options(backend, StoreOptions::default())
    }

    pub fn with_options(backend: B, options: StoreOptions) -> Self {
        Self { backend, options }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn value_mode(&self) -> ParseMode {
        ParseMode::values(self.options.strictness)
    }

    /// Replace whatever is stored at `id` with the parsed variables.
    pub fn save(&mut self, id: &str, source: &VariableSource) -> Result<Record, EnviError> {
        let variables = source.parse(self.value_mode())?;
        let record = Record::new(id, merge::upsert(Vec::new(), variables));
        self.put(&record)?;
        tracing::info!(id, count = record.variables.len(), "saved record");
        Ok(record)
    }

    /// Upsert the parsed variables into the record at `id`, creating it if absent.
    pub fn update(&mut self, id: &str, source: &VariableSource) -> Result<Record, EnviError> {
        let variables = source.parse(self.value_mode())?;
        let fetched = self.fetch_decoded(id)?;
        if fetched == Fetched::Absent {
            tracing::debug!(id, "no existing record, creating");
        }
        let record = merge::upsert_into(fetched, id, variables);
        self.put(&record)?;
        tracing::info!(id, count = record.variables.len(), "updated record");
        Ok(record)
    }

    pub fn get(&self, id: &str) -> Result<Record, EnviError> {
        self.fetch_decoded(id)?
            .into_option()
            .ok_or_else(|| EnviError::NotFound(id.to_string()))
    }

    /// Remove the whole record.
    pub fn delete(&mut self, id: &str) -> Result<(), EnviError> {
        self.backend.erase(id)?;
        tracing::info!(id, "deleted record");
        Ok(())
    }

    /// Remove the named variables from the record at `id`.
    ///
    /// Fails with [`EnviError::NotFound`] if the record does not exist. Names
    /// that are not present are ignored. When nothing is left, the
    /// [`EmptyRecordPolicy`] decides between writing an empty record and
    /// erasing it; the returned record is empty either way.
    pub fn delete_variables(
        &mut self,
        id: &str,
        source: &VariableSource,
    ) -> Result<Record, EnviError> {
        let names: Vec<String> = source
            .parse(ParseMode::names())?
            .into_iter()
            .map(|v| v.name)
            .collect();
        let existing = self.get(id)?;
        let record = Record::new(id, merge::remove(existing.variables, &names));

        if record.is_empty() && self.options.empty_record == EmptyRecordPolicy::Erase {
            self.backend.erase(id)?;
            tracing::info!(id, "removed last variables, erased record");
        } else {
            self.put(&record)?;
            tracing::info!(id, removed = names.len(), "removed variables");
        }
        Ok(record)
    }

    fn fetch_decoded(&self, id: &str) -> Result<Fetched, EnviError> {
        Ok(match self.backend.fetch(id)? {
            Fetched::Found(mut record) => {
                codec::decode_all(&mut record.variables);
                Fetched::Found(record)
            }
            Fetched::Absent => Fetched::Absent,
        })
    }

    fn put(&mut self, record: &Record) -> Result<(), EnviError> {
        let mut encoded = record.clone();
        codec::encode_all(&mut encoded.variables);
        self.backend.write(&encoded)
    }
}
