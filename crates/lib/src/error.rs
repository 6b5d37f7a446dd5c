//! Error types for bundle assembly.

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

/// Errors that abort a bundle assembly.
///
/// There is no partial success: any of these discards the archive being built.
#[derive(Debug, Error)]
pub enum Error {
  #[error("descriptor not found or not a regular file: {}", path.display())]
  MissingDescriptor { path: PathBuf },

  #[error("failed to parse descriptor {}: {message}", path.display())]
  MalformedDescriptor { path: PathBuf, message: String },

  #[error("invalid binary build include in build.properties: {}", path.display())]
  MissingResource { path: PathBuf },

  #[error("directory nesting below {} exceeds the limit of {limit}", dir.display())]
  RecursionLimitExceeded { dir: PathBuf, limit: usize },

  #[error("I/O error at {}: {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("invalid project location '{url}': {reason}")]
  InvalidUrl { url: String, reason: String },

  #[error("the path {} does not exist or is not a directory", path.display())]
  NotAProjectDirectory { path: PathBuf },
}

/// Flat discriminant of [`Error`], for callers that branch on the failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
  MissingDescriptor,
  MalformedDescriptor,
  MissingResource,
  RecursionLimitExceeded,
  IoFailure,
  InvalidUrl,
  NotAProjectDirectory,
}

impl Error {
  pub fn kind(&self) -> ErrorKind {
    match self {
      Error::MissingDescriptor { .. } => ErrorKind::MissingDescriptor,
      Error::MalformedDescriptor { .. } => ErrorKind::MalformedDescriptor,
      Error::MissingResource { .. } => ErrorKind::MissingResource,
      Error::RecursionLimitExceeded { .. } => ErrorKind::RecursionLimitExceeded,
      Error::Io { .. } => ErrorKind::IoFailure,
      Error::InvalidUrl { .. } => ErrorKind::InvalidUrl,
      Error::NotAProjectDirectory { .. } => ErrorKind::NotAProjectDirectory,
    }
  }

  pub(crate) fn io(path: &Path, source: io::Error) -> Self {
    Error::Io {
      path: path.to_path_buf(),
      source,
    }
  }

  /// Archive writer failures are reported as I/O failures against the entry being written.
  pub(crate) fn archive(entry: &str, source: zip::result::ZipError) -> Self {
    Error::Io {
      path: PathBuf::from(entry),
      source: io::Error::from(source),
    }
  }

  pub(crate) fn malformed(path: &Path, message: impl Into<String>) -> Self {
    Error::MalformedDescriptor {
      path: path.to_path_buf(),
      message: message.into(),
    }
  }
}
