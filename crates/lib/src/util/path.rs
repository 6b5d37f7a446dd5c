//! Project-relative path resolution.

use std::path::{Component, Path, PathBuf};

/// Resolve a descriptor path under `project_dir`.
///
/// Root and drive-prefix components are dropped first, so `/docs` names
/// `<project_dir>/docs` rather than replacing the project root.
pub fn resolve_in_project(project_dir: &Path, relative: &str) -> PathBuf {
  let relative: PathBuf = Path::new(relative)
    .components()
    .filter(|component| !matches!(component, Component::RootDir | Component::Prefix(_)))
    .collect();
  project_dir.join(relative)
}
