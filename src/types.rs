use crate::record::OutputStyle;
use crate::variables::VariableSource;

/// A store operation, independent of any CLI framework.
/// The CLI layer converts parsed clap args into this.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Set {
        id: String,
        source: VariableSource,
    },
    Update {
        id: String,
        source: VariableSource,
    },
    /// `output: None` falls back to the configured default style.
    Get {
        id: String,
        output: Option<OutputStyle>,
    },
    Delete {
        id: String,
    },
    DeleteVariables {
        id: String,
        source: VariableSource,
    },
}

impl Action {
    pub fn id(&self) -> &str {
        match self {
            Action::Set { id, .. }
            | Action::Update { id, .. }
            | Action::Get { id, .. }
            | Action::Delete { id }
            | Action::DeleteVariables { id, .. } => id,
        }
    }
}
