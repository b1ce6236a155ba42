//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into core
//! services, so no process-wide environment variables are read during request
//! handling.

use std::path::{Path, PathBuf};

/// Default location of the consultation store, relative to the working
/// directory.
pub const DEFAULT_DATA_FILE: &str = "consultations.json";

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_file: PathBuf,
}

impl CoreConfig {
    pub fn new(data_file: PathBuf) -> Self {
        Self { data_file }
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }
}

/// Resolves the consultation store path from an optional environment value.
///
/// A missing, empty, or whitespace-only value falls back to
/// [`DEFAULT_DATA_FILE`].
pub fn resolve_data_file(value: Option<String>) -> PathBuf {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
}
