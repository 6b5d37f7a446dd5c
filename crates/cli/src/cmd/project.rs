//! Project arguments shared by the subcommands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Args;
use tracing::debug;

use pdebundle_lib::BundleOptions;
use pdebundle_lib::location::{ProjectUrl, is_project_location};

/// Assembly options that can be set on the command line.
///
/// Values given here override `PDEBUNDLE_MAX_DEPTH` and `PDEBUNDLE_NESTED_SUFFIXES`.
#[derive(Debug, Args)]
pub struct BundleArgs {
  /// Maximum directory nesting depth
  #[arg(long)]
  pub max_depth: Option<usize>,

  /// Directory suffix packaged as a nested archive (repeatable)
  #[arg(long = "nested-suffix")]
  pub nested_suffixes: Vec<String>,
}

impl BundleArgs {
  pub fn options(&self) -> BundleOptions {
    let mut options = BundleOptions::from_env();
    if let Some(max_depth) = self.max_depth {
      options.max_depth = max_depth;
    }
    if !self.nested_suffixes.is_empty() {
      options.nested_suffixes = self.nested_suffixes.clone();
    }
    options
  }
}

/// Resolve a plain path or an `eclipse-project:` location to a project directory.
pub fn resolve_project(project: &str) -> Result<PathBuf> {
  let path = if is_project_location(project) {
    let url = ProjectUrl::parse(project).with_context(|| format!("Invalid project location: {}", project))?;
    url.path().to_path_buf()
  } else {
    PathBuf::from(project)
  };

  if !path.is_dir() {
    bail!("Not a project directory: {}", path.display());
  }

  let resolved = dunce::canonicalize(&path).with_context(|| format!("Failed to resolve {}", path.display()))?;
  debug!(project = %resolved.display(), "resolved project directory");
  Ok(resolved)
}

/// `<project-name>.jar` in the current directory.
pub fn default_output(project_dir: &Path) -> PathBuf {
  let name = project_dir
    .file_name()
    .map(|name| name.to_string_lossy().into_owned())
    .unwrap_or_else(|| "bundle".to_string());
  PathBuf::from(format!("{}.jar", name))
}
