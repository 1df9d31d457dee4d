use std::{io, path::PathBuf};

use thiserror::Error;

/// Top-level error type for the gbook binary.
///
/// The parsing core is infallible by contract; these variants cover
/// the build pipeline around it. Only an unreadable summary document
/// is fatal to a build in progress.
#[derive(Debug, Error)]
pub enum BuildError {
  #[error("Configuration error: {0}")]
  Config(String),

  #[error("Failed to read summary document {path}: {source}")]
  Summary {
    path:   PathBuf,
    source: io::Error,
  },

  #[error("Failed to write {path}: {source}")]
  Write {
    path:   PathBuf,
    source: io::Error,
  },

  #[error("I/O error: {0}")]
  Io(#[from] io::Error),

  #[error("Serde error: {0}")]
  Serde(#[from] serde_json::Error),

  #[error("TOML error: {0}")]
  Toml(#[from] toml::de::Error),

  #[error("Watcher error: {0}")]
  Watch(#[from] notify::Error),
}

impl From<toml::ser::Error> for BuildError {
  fn from(e: toml::ser::Error) -> Self {
    Self::Config(e.to_string())
  }
}
