//! Parsing of raw variable input into ordered name/value pairs.
//!
//! Two textual shapes are accepted:
//!
//! - **Inline**: `one=two,three=four`, as passed to `--variables`.
//! - **Lines**: dotenv-style content, one variable per line, with optional
//!   `export` prefixes, blank lines, and `#` comments.
//!
//! Both shapes split on the *first* `=`, so values may themselves contain
//! `=`. Inline values cannot contain `,`; use a file for those.
//!
//! When deleting variables the caller only names them. [`ParseMode::names`]
//! treats every field or line as a bare name with an empty value.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::EnviError;

/// A single configuration entry within a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub value: String,
}

impl Variable {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// How malformed lines in line-form input are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    /// Abort the whole parse on the first malformed line.
    #[default]
    Strict,
    /// Skip malformed lines with a warning.
    Lenient,
}

/// Parser configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseMode {
    pub strictness: Strictness,
    /// Treat each entry as a bare variable name (used for deletion).
    pub names_only: bool,
}

impl ParseMode {
    pub fn values(strictness: Strictness) -> Self {
        Self {
            strictness,
            names_only: false,
        }
    }

    pub fn names() -> Self {
        Self {
            strictness: Strictness::Strict,
            names_only: true,
        }
    }
}

/// Where raw variable text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariableSource {
    /// An inline `k=v,k2=v2` list.
    Inline(String),
    /// A dotenv-style file.
    File(PathBuf),
}

impl VariableSource {
    /// Read (if needed) and parse the source.
    pub fn parse(&self, mode: ParseMode) -> Result<Vec<Variable>, EnviError> {
        match self {
            VariableSource::Inline(text) => parse_inline(text, mode),
            VariableSource::File(path) => {
                let content = std::fs::read_to_string(path).map_err(|e| EnviError::Io {
                    path: path.clone(),
                    source: e,
                })?;
                parse_lines(content.lines(), mode)
            }
        }
    }
}

/// Parse a comma-separated `name=value` list.
///
/// Empty fields (`a=b,,c=d` or a trailing comma) are ignored. Inline input
/// is always parsed strictly: a field without `=` is an error regardless of
/// [`Strictness`], since there is no line to skip past.
pub fn parse_inline(text: &str, mode: ParseMode) -> Result<Vec<Variable>, EnviError> {
    let mut variables = Vec::new();
    for (i, field) in text.split(',').enumerate() {
        if field.is_empty() {
            continue;
        }
        let position = || format!("field {}", i + 1);
        variables.push(split_entry(field, mode.names_only, position)?);
    }
    Ok(variables)
}

/// Parse dotenv-style lines.
pub fn parse_lines<'a, I>(lines: I, mode: ParseMode) -> Result<Vec<Variable>, EnviError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut variables = Vec::new();
    for (i, raw) in lines.into_iter().enumerate() {
        let line = strip_export(raw.trim()).trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let position = || format!("line {}", i + 1);
        match split_entry(line, mode.names_only, position) {
            Ok(variable) => variables.push(variable),
            Err(err) if mode.strictness == Strictness::Lenient => {
                tracing::warn!("skipping malformed input: {err}");
            }
            Err(err) => return Err(err),
        }
    }
    Ok(variables)
}

/// Remove a leading `export` keyword. `exporter=1` is left alone.
fn strip_export(line: &str) -> &str {
    match line.strip_prefix("export") {
        Some(rest) if rest.starts_with(char::is_whitespace) => rest,
        _ => line,
    }
}

fn split_entry(
    entry: &str,
    names_only: bool,
    position: impl Fn() -> String,
) -> Result<Variable, EnviError> {
    let malformed = |reason| EnviError::Format {
        position: position(),
        input: entry.to_string(),
        reason,
    };

    let variable = match (entry.split_once('='), names_only) {
        (Some((name, _)), true) => Variable::new(name, ""),
        (None, true) => Variable::new(entry, ""),
        (Some((name, value)), false) => Variable::new(name, value),
        (None, false) => return Err(malformed("expected name=value")),
    };

    if variable.name.is_empty() {
        return Err(malformed("variable name is empty"));
    }
    Ok(variable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FILE_CONTENT: &str = "  one=two\n\n\tthree=four \n#^ tab at front\n\nfive=six   \n#       ^ spaces at end\n";

    const FILE_CONTENT_BAD: &str = "two\n\tthree=four \n\nfive=six\n";

    const FILE_CONTENT_NAMES: &str = "one\nthree\n#  \nfive";

    fn pairs(vars: &[Variable]) -> Vec<(&str, &str)> {
        vars.iter()
            .map(|v| (v.name.as_str(), v.value.as_str()))
            .collect()
    }

    fn strict() -> ParseMode {
        ParseMode::values(Strictness::Strict)
    }

    #[test]
    fn inline_preserves_order() {
        let vars = parse_inline("a=b,c=d", strict()).unwrap();
        assert_eq!(pairs(&vars), vec![("a", "b"), ("c", "d")]);
    }

    #[test]
    fn inline_names_only() {
        let vars = parse_inline("a=b,c=d", ParseMode::names()).unwrap();
        assert_eq!(pairs(&vars), vec![("a", ""), ("c", "")]);
    }

    #[test]
    fn inline_bare_names() {
        let vars = parse_inline("three,five", ParseMode::names()).unwrap();
        assert_eq!(pairs(&vars), vec![("three", ""), ("five", "")]);
    }

    #[test]
    fn inline_splits_on_first_equals() {
        let vars = parse_inline("url=postgres://h/db?sslmode=require", strict()).unwrap();
        assert_eq!(pairs(&vars), vec![("url", "postgres://h/db?sslmode=require")]);
    }

    #[test]
    fn inline_empty_value_allowed() {
        let vars = parse_inline("EMPTY=", strict()).unwrap();
        assert_eq!(pairs(&vars), vec![("EMPTY", "")]);
    }

    #[test]
    fn inline_skips_empty_fields() {
        let vars = parse_inline("a=1,,b=2,", strict()).unwrap();
        assert_eq!(pairs(&vars), vec![("a", "1"), ("b", "2")]);
        assert!(parse_inline("", strict()).unwrap().is_empty());
    }

    #[test]
    fn inline_missing_equals_is_format_error() {
        let err = parse_inline("a=1,oops", strict()).unwrap_err();
        match err {
            EnviError::Format {
                position, input, ..
            } => {
                assert_eq!(position, "field 2");
                assert_eq!(input, "oops");
            }
            other => panic!("Expected Format, got {other:?}"),
        }
    }

    #[test]
    fn inline_missing_equals_fails_even_when_lenient() {
        let result = parse_inline("oops", ParseMode::values(Strictness::Lenient));
        assert!(matches!(result, Err(EnviError::Format { .. })));
    }

    #[test]
    fn empty_name_rejected() {
        let result = parse_inline("=value", strict());
        assert!(matches!(result, Err(EnviError::Format { .. })));
    }

    #[test]
    fn lines_trim_and_skip_comments() {
        let vars = parse_lines(FILE_CONTENT.lines(), strict()).unwrap();
        assert_eq!(
            pairs(&vars),
            vec![("one", "two"), ("three", "four"), ("five", "six")]
        );
    }

    #[test]
    fn lines_strip_export() {
        let vars = parse_lines(["export FOO=bar", "export\tBAZ=qux"], strict()).unwrap();
        assert_eq!(pairs(&vars), vec![("FOO", "bar"), ("BAZ", "qux")]);
    }

    #[test]
    fn lines_export_prefix_needs_whitespace() {
        let vars = parse_lines(["exporter=1"], strict()).unwrap();
        assert_eq!(pairs(&vars), vec![("exporter", "1")]);
    }

    #[test]
    fn lines_comment_after_indent_skipped() {
        let vars = parse_lines(["   # indented comment", "A=1"], strict()).unwrap();
        assert_eq!(pairs(&vars), vec![("A", "1")]);
    }

    #[test]
    fn lines_strict_fails_whole_parse() {
        let err = parse_lines(FILE_CONTENT_BAD.lines(), strict()).unwrap_err();
        match err {
            EnviError::Format { position, .. } => assert_eq!(position, "line 1"),
            other => panic!("Expected Format, got {other:?}"),
        }
    }

    #[test]
    fn lines_lenient_skips_malformed() {
        let vars = parse_lines(
            FILE_CONTENT_BAD.lines(),
            ParseMode::values(Strictness::Lenient),
        )
        .unwrap();
        assert_eq!(pairs(&vars), vec![("three", "four"), ("five", "six")]);
    }

    #[test]
    fn lines_names_only() {
        let vars = parse_lines(FILE_CONTENT_NAMES.lines(), ParseMode::names()).unwrap();
        assert_eq!(pairs(&vars), vec![("one", ""), ("three", ""), ("five", "")]);
    }

    #[test]
    fn file_source_reads_and_parses() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{FILE_CONTENT}").unwrap();
        let source = VariableSource::File(file.path().to_path_buf());
        let vars = source.parse(strict()).unwrap();
        assert_eq!(vars.len(), 3);
    }

    #[test]
    fn missing_file_is_io_error() {
        let source = VariableSource::File("/definitely/not/here.env".into());
        assert!(matches!(source.parse(strict()), Err(EnviError::Io { .. })));
    }

    #[test]
    fn strictness_deserializes_lowercase() {
        let s: Strictness = serde_json::from_str("\"lenient\"").unwrap();
        assert_eq!(s, Strictness::Lenient);
    }
}
