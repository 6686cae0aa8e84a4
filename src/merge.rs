//! Merge engine: upsert and removal over ordered variable sequences.

use crate::backend::Fetched;
use crate::record::Record;
use crate::variables::Variable;

/// Upsert `incoming` into `existing`.
/// A variable whose name already exists has its value replaced in place;
/// otherwise it is appended. Untouched variables keep their order.
/// Duplicates within `incoming` collapse the same way (last value wins).
pub fn upsert(mut existing: Vec<Variable>, incoming: Vec<Variable>) -> Vec<Variable> {
    for variable in incoming {
        match existing.iter_mut().find(|v| v.name == variable.name) {
            Some(slot) => slot.value = variable.value,
            None => existing.push(variable),
        }
    }
    existing
}

/// Drop every variable whose name is in `names`. Unknown names are ignored.
pub fn remove<S: AsRef<str>>(mut existing: Vec<Variable>, names: &[S]) -> Vec<Variable> {
    existing.retain(|v| !names.iter().any(|n| n.as_ref() == v.name));
    existing
}

/// Upsert into whatever the backend returned for `id`.
///
/// An absent record yields a brand-new record holding exactly `incoming`
/// (deduplicated). A found record, even one with no variables, is merged.
/// The result is always keyed by `id`, whatever the stored document says.
pub fn upsert_into(fetched: Fetched, id: &str, incoming: Vec<Variable>) -> Record {
    let existing = match fetched {
        Fetched::Absent => Vec::new(),
        Fetched::Found(record) => record.variables,
    };
    Record::new(id, upsert(existing, incoming))
}
