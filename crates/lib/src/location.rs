//! `eclipse-project:` locations.
//!
//! A module runtime can install a bundle from `eclipse-project:/path/to/project`.
//! Opening such a location is free; the bundle is assembled when the content
//! is first read, and a connection yields its content once.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;
use tracing::debug;
use url::Url;

use crate::Result;
use crate::bundle::assemble_with;
use crate::consts::URL_SCHEME;
use crate::error::Error;
use crate::options::BundleOptions;

/// Whether `location` uses the `eclipse-project:` scheme.
///
/// Used by runtimes to pick out installed bundles that should be refreshed
/// from their project directories.
pub fn is_project_location(location: &str) -> bool {
  location
    .strip_prefix(URL_SCHEME)
    .is_some_and(|rest| rest.starts_with(':'))
}

/// A validated `eclipse-project:` location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectUrl {
  path: PathBuf,
}

impl ProjectUrl {
  /// Parse a location of the form `eclipse-project:<path>`.
  ///
  /// # Errors
  ///
  /// [`Error::InvalidUrl`] for another scheme, or if the location carries a
  /// host, a port or a query string.
  pub fn parse(location: &str) -> Result<Self> {
    let invalid = |reason: &str| Error::InvalidUrl {
      url: location.to_string(),
      reason: reason.to_string(),
    };

    let url = Url::parse(location).map_err(|e| invalid(&e.to_string()))?;
    if url.scheme() != URL_SCHEME {
      return Err(invalid(&format!("unable to handle the scheme '{}'", url.scheme())));
    }
    if url.host_str().is_some_and(|host| !host.is_empty()) {
      return Err(invalid("project locations do not contain a host component"));
    }
    if url.port().is_some() {
      return Err(invalid("project locations do not contain a port"));
    }
    if url.query().is_some() {
      return Err(invalid("project locations do not support query strings"));
    }

    let path = percent_decode_str(url.path())
      .decode_utf8()
      .map_err(|e| invalid(&e.to_string()))?;
    if path.is_empty() {
      return Err(invalid("missing project path"));
    }

    Ok(Self {
      path: PathBuf::from(path.as_ref()),
    })
  }

  /// The project directory this location names.
  pub fn path(&self) -> &Path {
    &self.path
  }
}

impl std::fmt::Display for ProjectUrl {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}:{}", URL_SCHEME, self.path.display())
  }
}

/// A lazily assembled bundle behind a project location.
///
/// Nothing touches the filesystem until [`ProjectConnection::into_reader`],
/// which consumes the connection.
#[derive(Debug, Clone)]
pub struct ProjectConnection {
  url: ProjectUrl,
  options: BundleOptions,
}

impl ProjectConnection {
  /// Open a connection configured from the environment.
  pub fn open(url: &ProjectUrl) -> Self {
    Self::with_options(url, BundleOptions::from_env())
  }

  pub fn with_options(url: &ProjectUrl, options: BundleOptions) -> Self {
    Self {
      url: url.clone(),
      options,
    }
  }

  pub fn url(&self) -> &ProjectUrl {
    &self.url
  }

  /// Assemble the bundle and return a reader over its bytes.
  ///
  /// # Errors
  ///
  /// [`Error::NotAProjectDirectory`] if the location does not name an
  /// existing directory, otherwise any assembly error.
  pub fn into_reader(self) -> Result<Cursor<Vec<u8>>> {
    let project_dir = self.url.path();
    if !project_dir.is_dir() {
      return Err(Error::NotAProjectDirectory {
        path: project_dir.to_path_buf(),
      });
    }

    let project_dir = dunce::canonicalize(project_dir).map_err(|e| Error::io(project_dir, e))?;
    debug!(url = %self.url, project = %project_dir.display(), "reading project bundle");

    let bundle = assemble_with(&project_dir, &self.options)?;
    Ok(Cursor::new(bundle.into_bytes()))
  }
}
