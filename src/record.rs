//! The configuration record: one identifier plus its ordered variables.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::error::EnviError;
use crate::variables::Variable;

/// Separator between application and environment in composed ids.
pub const ID_SEPARATOR: &str = "__";

/// A named set of configuration variables, as stored in the backend.
///
/// Records whose id is composed as `<application>__<environment>` also
/// carry those two parts, so stored documents can be queried by either.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(default)]
    pub variables: Vec<Variable>,
}

/// Display style for a record's variables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    /// `name=value` per line.
    #[default]
    Text,
    /// JSON array of `{name, value}` objects.
    Json,
    /// `export name=value` per line.
    #[serde(rename = "sh", alias = "shell")]
    #[cfg_attr(feature = "clap", value(name = "sh", alias = "shell"))]
    Shell,
}

impl Record {
    pub fn new(id: impl Into<String>, variables: Vec<Variable>) -> Self {
        let id = id.into();
        let (application, environment) = match split_id(&id) {
            Some((app, env)) => (Some(app.to_string()), Some(env.to_string())),
            None => (None, None),
        };
        Self {
            id,
            application,
            environment,
            variables,
        }
    }

    pub fn empty(id: impl Into<String>) -> Self {
        Self::new(id, Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Render the variables for display.
    pub fn format(&self, style: OutputStyle) -> String {
        let mut out = String::new();
        match style {
            OutputStyle::Text => {
                for v in &self.variables {
                    let _ = writeln!(out, "{}={}", v.name, v.value);
                }
            }
            OutputStyle::Shell => {
                for v in &self.variables {
                    let _ = writeln!(out, "export {}={}", v.name, v.value);
                }
            }
            OutputStyle::Json => {
                // serde_json leaves HTML punctuation (<, >, &) unescaped.
                out = serde_json::to_string_pretty(&self.variables)
                    .unwrap_or_else(|_| "[]".to_string());
                out.push('\n');
            }
        }
        out
    }
}

/// Resolve the record id from CLI-style inputs.
///
/// An explicit `id` wins. Otherwise both `application` and `environment`
/// are required and joined as `<application>__<environment>`.
pub fn record_id(
    id: Option<&str>,
    application: Option<&str>,
    environment: Option<&str>,
) -> Result<String, EnviError> {
    if let Some(id) = id.filter(|s| !s.is_empty()) {
        return Ok(id.to_string());
    }
    match (application, environment) {
        (Some(app), Some(env)) if !app.is_empty() && !env.is_empty() => {
            Ok(format!("{app}{ID_SEPARATOR}{env}"))
        }
        _ => Err(EnviError::Usage(
            "an identifier is required: pass --id, or both --application and --environment"
                .into(),
        )),
    }
}

/// Split a composed id back into `(application, environment)`.
///
/// Only ids of the form `<application>__<environment>` with both parts
/// non-empty split; anything else was supplied verbatim through `--id`.
pub fn split_id(id: &str) -> Option<(&str, &str)> {
    id.split_once(ID_SEPARATOR)
        .filter(|(app, env)| !app.is_empty() && !env.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Record {
        Record::new(
            "app__dev",
            vec![
                Variable::new("one", "two"),
                Variable::new("URL", "http://x?a=1&b=<2>"),
            ],
        )
    }

    #[test]
    fn text_format() {
        assert_eq!(
            sample().format(OutputStyle::Text),
            "one=two\nURL=http://x?a=1&b=<2>\n"
        );
    }

    #[test]
    fn shell_format() {
        assert_eq!(
            sample().format(OutputStyle::Shell),
            "export one=two\nexport URL=http://x?a=1&b=<2>\n"
        );
    }

    #[test]
    fn json_format_is_array_without_html_escaping() {
        let out = sample().format(OutputStyle::Json);
        assert!(out.contains("&b=<2>"));
        let parsed: Vec<Variable> = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, sample().variables);
    }

    #[test]
    fn empty_record_formats_to_nothing() {
        let record = Record::empty("app__dev");
        assert_eq!(record.format(OutputStyle::Text), "");
        assert_eq!(record.format(OutputStyle::Json), "[]\n");
    }

    #[test]
    fn missing_variables_field_deserializes_empty() {
        let record: Record = serde_json::from_str(r#"{"id":"a"}"#).unwrap();
        assert!(record.is_empty());
    }

    #[test]
    fn composed_id_carries_its_parts() {
        let record = Record::empty("billing__staging");
        assert_eq!(record.application.as_deref(), Some("billing"));
        assert_eq!(record.environment.as_deref(), Some("staging"));

        let doc: serde_json::Value = serde_json::to_value(&record).unwrap();
        assert_eq!(doc["application"], "billing");
        assert_eq!(doc["environment"], "staging");
    }

    #[test]
    fn verbatim_id_has_no_parts() {
        for id in ["custom", "__dev", "app__"] {
            let record = Record::empty(id);
            assert_eq!(record.application, None, "{id}");
            assert_eq!(record.environment, None, "{id}");
        }
        let doc = serde_json::to_string(&Record::empty("custom")).unwrap();
        assert_eq!(doc, r#"{"id":"custom","variables":[]}"#);
    }

    #[test]
    fn output_style_accepts_sh_and_shell() {
        let a: OutputStyle = serde_json::from_str("\"sh\"").unwrap();
        let b: OutputStyle = serde_json::from_str("\"shell\"").unwrap();
        assert_eq!(a, OutputStyle::Shell);
        assert_eq!(b, OutputStyle::Shell);
    }

    #[test]
    fn explicit_id_wins() {
        assert_eq!(
            record_id(Some("custom"), Some("app"), Some("dev")).unwrap(),
            "custom"
        );
    }

    #[test]
    fn composed_id() {
        assert_eq!(record_id(None, Some("app"), Some("dev")).unwrap(), "app__dev");
    }

    #[test]
    fn missing_id_is_usage_error() {
        assert!(matches!(
            record_id(None, Some("app"), None),
            Err(EnviError::Usage(_))
        ));
        assert!(matches!(
            record_id(Some(""), None, None),
            Err(EnviError::Usage(_))
        ));
    }
}
