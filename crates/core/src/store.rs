//! Flat-file persistence for consultation records.
//!
//! The entire durable state of the portal is one JSON array in one file,
//! loaded and rewritten wholesale on every mutation. Replacement is atomic:
//! the new array is written to a sibling temporary file which is then renamed
//! over the target, so readers never observe a partially written store.

use crate::consultation::Consultation;
use crate::error::{ConsultationError, ConsultationResult};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Handle to the JSON file holding all consultation records.
#[derive(Debug, Clone)]
pub struct ConsultationStore {
    path: PathBuf,
}

impl ConsultationStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the full record set.
    ///
    /// A store file that does not exist yet is an empty store; first boot
    /// needs no seed file. Any other I/O or parse failure is surfaced.
    pub fn load(&self) -> ConsultationResult<Vec<Consultation>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(ConsultationError::StoreRead(e)),
        };

        serde_json::from_str(&contents).map_err(ConsultationError::Deserialization)
    }

    /// Replaces the store with `records`, atomically.
    ///
    /// The array is pretty-printed, preserving the human-inspectable format
    /// the store has always used.
    pub fn save(&self, records: &[Consultation]) -> ConsultationResult<()> {
        let json =
            serde_json::to_string_pretty(records).map_err(ConsultationError::Serialization)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(ConsultationError::StoreWrite)?;
            }
        }

        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, json).map_err(ConsultationError::StoreWrite)?;
        fs::rename(&tmp_path, &self.path).map_err(ConsultationError::StoreReplace)
    }

    /// Sibling path used for the write-then-rename replacement.
    fn tmp_path(&self) -> PathBuf {
        let mut os_string = self.path.as_os_str().to_owned();
        os_string.push(".tmp");
        PathBuf::from(os_string)
    }
}
