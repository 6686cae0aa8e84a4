//! Action dispatch and the result type callers display.

use std::fmt;

use crate::backend::Backend;
use crate::error::EnviError;
use crate::record::{OutputStyle, Record};
use crate::store::Store;
use crate::types::Action;

/// Result of an [`Action`]. Returned to the caller for display.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Saved(Record),
    Updated(Record),
    /// A fetched record rendered in the requested style.
    Shown { record: Record, style: OutputStyle },
    Deleted { id: String },
    VariablesRemoved(Record),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Saved(r) => writeln!(f, "Saved {} variable(s) to {}", r.variables.len(), r.id),
            Outcome::Updated(r) => {
                writeln!(f, "Updated {}, now {} variable(s)", r.id, r.variables.len())
            }
            Outcome::Shown { record, style } => write!(f, "{}", record.format(*style)),
            Outcome::Deleted { id } => writeln!(f, "Deleted {id}"),
            Outcome::VariablesRemoved(r) => {
                writeln!(f, "Removed variables from {}, {} left", r.id, r.variables.len())
            }
        }
    }
}

/// Run `action` against `store`.
pub fn execute<B: Backend>(
    store: &mut Store<B>,
    action: Action,
    default_output: OutputStyle,
) -> Result<Outcome, EnviError> {
    match action {
        Action::Set { id, source } => store.save(&id, &source).map(Outcome::Saved),
        Action::Update { id, source } => store.update(&id, &source).map(Outcome::Updated),
        Action::Get { id, output } => Ok(Outcome::Shown {
            record: store.get(&id)?,
            style: output.unwrap_or(default_output),
        }),
        Action::Delete { id } => {
            store.delete(&id)?;
            Ok(Outcome::Deleted { id })
        }
        Action::DeleteVariables { id, source } => store
            .delete_variables(&id, &source)
            .map(Outcome::VariablesRemoved),
    }
}
