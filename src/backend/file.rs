//! Local directory backend: one `<id>.json` document per record.
//!
//! Writes go to a sibling temporary file that is then renamed over the
//! target, so a reader never observes a half-written document. The
//! directory is created on first write.

use std::path::PathBuf;

use crate::backend::{Backend, Fetched, from_document, to_document};
use crate::error::EnviError;
use crate::record::Record;

#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Platform data directory for `table`, e.g. `~/.local/share/envi/<table>`.
    pub fn default_dir(table: &str) -> Option<PathBuf> {
        let proj = directories::ProjectDirs::from("", "", "envi")?;
        Some(proj.data_dir().join(table))
    }

    fn path_for(&self, id: &str) -> Result<PathBuf, EnviError> {
        let unsafe_id = id.is_empty()
            || id == "."
            || id == ".."
            || id.contains(['/', '\\', '\0']);
        if unsafe_id {
            return Err(EnviError::Usage(format!(
                "'{id}' cannot be used as a record id with the file backend"
            )));
        }
        Ok(self.dir.join(format!("{id}.json")))
    }
}

impl Backend for FileBackend {
    fn fetch(&self, id: &str) -> Result<Fetched, EnviError> {
        let path = self.path_for(id)?;
        match std::fs::read_to_string(&path) {
            Ok(doc) => Ok(Fetched::Found(from_document(id, &doc)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Fetched::Absent),
            Err(e) => Err(EnviError::backend("fetch", id, e)),
        }
    }

    fn write(&mut self, record: &Record) -> Result<(), EnviError> {
        let path = self.path_for(&record.id)?;
        let doc = to_document(record)?;

        std::fs::create_dir_all(&self.dir)
            .map_err(|e| EnviError::backend("write", &record.id, e))?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, doc).map_err(|e| EnviError::backend("write", &record.id, e))?;
        std::fs::rename(&tmp, &path).map_err(|e| EnviError::backend("write", &record.id, e))?;

        tracing::debug!(path = %path.display(), "wrote record document");
        Ok(())
    }

    fn erase(&mut self, id: &str) -> Result<(), EnviError> {
        let path = self.path_for(id)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(EnviError::backend("erase", id, e)),
        }
    }
}
