//! Assembly configuration.
//!
//! Defaults reproduce a normally exported plug-in bundle. `from_env()` lets a
//! caller adjust the recursion cap and the nested archive suffixes without
//! code changes.

use tracing::warn;

use crate::consts::{
  BUILD_PROPERTIES_FILENAME, CLASSPATH_FILENAME, DEFAULT_BIN_INCLUDES, ENV_MAX_DEPTH, ENV_NESTED_SUFFIXES,
  MAX_RECURSE_DEPTH, NESTED_ARCHIVE_SUFFIX,
};

/// Options shared by every archive level of one assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleOptions {
  /// Deepest directory nesting followed below a single source directory.
  pub max_depth: usize,
  /// Target path suffixes that turn a directory into a nested archive.
  pub nested_suffixes: Vec<String>,
  /// Dependency/output-mapping descriptor file name.
  pub classpath_file: String,
  /// Build-instruction descriptor file name.
  pub build_properties_file: String,
  /// Inclusion list synthesized when the build-instruction descriptor is absent.
  pub default_includes: String,
}

impl Default for BundleOptions {
  fn default() -> Self {
    Self {
      max_depth: MAX_RECURSE_DEPTH,
      nested_suffixes: vec![NESTED_ARCHIVE_SUFFIX.to_string()],
      classpath_file: CLASSPATH_FILENAME.to_string(),
      build_properties_file: BUILD_PROPERTIES_FILENAME.to_string(),
      default_includes: DEFAULT_BIN_INCLUDES.to_string(),
    }
  }
}

impl BundleOptions {
  /// Defaults overlaid with `PDEBUNDLE_MAX_DEPTH` and `PDEBUNDLE_NESTED_SUFFIXES`.
  ///
  /// Values that do not parse are ignored.
  pub fn from_env() -> Self {
    let mut options = Self::default();

    if let Ok(raw) = std::env::var(ENV_MAX_DEPTH) {
      match raw.trim().parse::<usize>() {
        Ok(depth) => options.max_depth = depth,
        Err(e) => warn!(var = ENV_MAX_DEPTH, value = %raw, error = %e, "ignoring invalid value"),
      }
    }

    if let Ok(raw) = std::env::var(ENV_NESTED_SUFFIXES) {
      let suffixes = split_list(&raw);
      if suffixes.is_empty() {
        warn!(var = ENV_NESTED_SUFFIXES, value = %raw, "ignoring empty suffix list");
      } else {
        options.nested_suffixes = suffixes;
      }
    }

    options
  }

  /// Whether `target` names a nested archive rather than a directory prefix.
  pub fn is_nested_archive(&self, target: &str) -> bool {
    self.nested_suffixes.iter().any(|suffix| target.ends_with(suffix.as_str()))
  }
}

/// Split a comma-separated list, trimming items and dropping blanks.
pub(crate) fn split_list(raw: &str) -> Vec<String> {
  raw
    .split(',')
    .map(str::trim)
    .filter(|item| !item.is_empty())
    .map(str::to_string)
    .collect()
}
