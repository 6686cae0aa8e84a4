//! Layered settings resolution.
//!
//! All sources are turned into sparse `toml::Table`s, deep-merged in
//! priority order, deserialized into the confique layer, and handed to
//! confique to fill defaults. File discovery is the only I/O; the merge
//! itself works on pre-loaded data so tests can feed synthetic inputs.

use std::path::PathBuf;

use confique::Config;
use toml::{Table, Value};

use crate::error::EnviError;
use crate::settings::Settings;

/// Settings file name looked up in each search directory.
pub const FILE_NAME: &str = "envi.toml";

const ENV_PREFIX: &str = "ENVI";

pub struct SettingsLoader {
    search_dirs: Vec<PathBuf>,
    env_vars: Option<Vec<(String, String)>>,
    env_enabled: bool,
    overrides: Vec<(String, Value)>,
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsLoader {
    /// Search the platform config directory, then the working directory.
    pub fn new() -> Self {
        let mut search_dirs = Vec::new();
        if let Some(proj) = directories::ProjectDirs::from("", "", "envi") {
            search_dirs.push(proj.config_dir().to_path_buf());
        }
        if let Ok(cwd) = std::env::current_dir() {
            search_dirs.push(cwd);
        }
        Self {
            search_dirs,
            env_vars: None,
            env_enabled: true,
            overrides: Vec::new(),
        }
    }

    /// Replace the search directories (priority-ascending: last wins).
    pub fn search_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.search_dirs = dirs;
        self
    }

    /// Use these pairs instead of the process environment.
    pub fn env_vars(mut self, vars: Vec<(String, String)>) -> Self {
        self.env_vars = Some(vars);
        self
    }

    pub fn no_env(mut self) -> Self {
        self.env_enabled = false;
        self
    }

    /// Override a dotted key (e.g. `"http.endpoint"`). `None` is ignored, so
    /// optional CLI flags can be passed straight through.
    pub fn set<V: Into<Value>>(mut self, key: &str, value: Option<V>) -> Self {
        if let Some(v) = value {
            self.overrides.push((key.to_string(), v.into()));
        }
        self
    }

    pub fn load(self) -> Result<Settings, EnviError> {
        let mut merged = Table::new();

        for dir in &self.search_dirs {
            let path = dir.join(FILE_NAME);
            let content = match std::fs::read_to_string(&path) {
                Ok(c) => c,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => return Err(EnviError::Io { path, source: e }),
            };
            let table: Table = toml::from_str(&content)
                .map_err(|e| EnviError::SettingsFile { path: path.clone(), source: e })?;
            tracing::debug!(path = %path.display(), "loaded settings file");
            merged = deep_merge(merged, table);
        }

        if self.env_enabled {
            let vars = self
                .env_vars
                .unwrap_or_else(|| std::env::vars().collect());
            merged = deep_merge(merged, env_to_table(ENV_PREFIX, vars));
        }

        let mut cli = Table::new();
        for (key, value) in self.overrides {
            set_nested(&mut cli, &key, value);
        }
        merged = deep_merge(merged, cli);

        let layer: <Settings as Config>::Layer = Value::Table(merged)
            .try_into()
            .map_err(EnviError::SettingsValue)?;

        Ok(Settings::builder().preloaded(layer).load()?)
    }
}

/// Overlay wins key-by-key; nested tables merge recursively.
fn deep_merge(mut base: Table, overlay: Table) -> Table {
    for (key, value) in overlay {
        let merged = match (base.remove(&key), value) {
            (Some(Value::Table(b)), Value::Table(o)) => Value::Table(deep_merge(b, o)),
            (_, v) => v,
        };
        base.insert(key, merged);
    }
    base
}

/// `ENVI__HTTP__TIMEOUT_SECS=5` becomes `{http = {timeout_secs = "5"}}`.
/// Values stay strings; numeric fields parse them on deserialization.
fn env_to_table(prefix: &str, vars: impl IntoIterator<Item = (String, String)>) -> Table {
    let needle = format!("{prefix}__");
    let mut table = Table::new();
    for (key, raw) in vars {
        let Some(rest) = key.strip_prefix(&needle) else {
            continue;
        };
        if rest.is_empty() {
            continue;
        }
        let dotted = rest.split("__").map(str::to_lowercase).collect::<Vec<_>>().join(".");
        set_nested(&mut table, &dotted, Value::String(raw));
    }
    table
}

fn set_nested(table: &mut Table, dotted_key: &str, value: Value) {
    let (path, leaf) = match dotted_key.rsplit_once('.') {
        Some((p, l)) => (Some(p), l),
        None => (None, dotted_key),
    };
    let mut current = table;
    for segment in path.into_iter().flat_map(|p| p.split('.')) {
        let entry = current
            .entry(segment)
            .or_insert_with(|| Value::Table(Table::new()));
        if !entry.is_table() {
            *entry = Value::Table(Table::new());
        }
        let Some(next) = entry.as_table_mut() else {
            return;
        };
        current = next;
    }
    current.insert(leaf.to_string(), value);
}
