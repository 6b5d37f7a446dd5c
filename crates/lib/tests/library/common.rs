//! Shared helpers for library integration tests.

use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A throwaway project directory.
pub struct TestProject {
  pub temp: TempDir,
}

impl TestProject {
  /// An empty project with a `.classpath` naming `bin` as its output.
  pub fn new() -> Self {
    let project = Self::bare();
    project.write_file(
      ".classpath",
      r#"<?xml version="1.0" encoding="UTF-8"?>
<classpath>
  <classpathentry kind="src" path="src"/>
  <classpathentry kind="con" path="org.eclipse.pde.core.requiredPlugins"/>
  <classpathentry kind="output" path="bin"/>
</classpath>
"#,
    );
    project
  }

  /// A project with no descriptors at all.
  pub fn bare() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  pub fn path(&self) -> &Path {
    self.temp.path()
  }

  pub fn join(&self, relative: &str) -> PathBuf {
    self.temp.path().join(relative)
  }

  /// Write a file relative to the project root, creating parents.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }
}

/// Every entry of an archive as `(name, content)`, in archive order.
pub fn entries(bytes: &[u8]) -> Vec<(String, String)> {
  let mut archive = zip::ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
  (0..archive.len())
    .map(|i| {
      let mut file = archive.by_index(i).unwrap();
      let mut content = Vec::new();
      file.read_to_end(&mut content).unwrap();
      (file.name().to_string(), String::from_utf8_lossy(&content).into_owned())
    })
    .collect()
}

/// Raw bytes of one named entry.
pub fn entry_bytes(bytes: &[u8], name: &str) -> Vec<u8> {
  let mut archive = zip::ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
  let mut file = archive.by_name(name).unwrap();
  let mut content = Vec::new();
  file.read_to_end(&mut content).unwrap();
  content
}

pub fn names(bytes: &[u8]) -> Vec<String> {
  entries(bytes).into_iter().map(|(name, _)| name).collect()
}
