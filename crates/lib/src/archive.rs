//! Archive assembly.
//!
//! [`ArchiveBuilder`] streams files from directory trees into a ZIP archive.
//! Every entry is stored uncompressed with a fixed timestamp, so the same
//! input tree always yields the same bytes.
//!
//! Each archive level owns an [`EntryRegistry`]: the first write of a path
//! wins and later writes of the same path are skipped. A target path ending in
//! a nested archive suffix (`.jar` by default) is built as a complete archive
//! of its own, with a fresh registry, and stored as a single opaque entry.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, Cursor, Seek, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, trace};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::consts::ROOT_ENTRY;
use crate::error::Error;
use crate::options::BundleOptions;
use crate::Result;

/// Entry paths already written to one archive.
#[derive(Debug, Default, Clone)]
pub struct EntryRegistry {
  entries: HashSet<String>,
}

impl EntryRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn contains(&self, entry: &str) -> bool {
    self.entries.contains(entry)
  }

  /// Record `entry`. Returns `false` if it was already present.
  pub fn insert(&mut self, entry: impl Into<String>) -> bool {
    self.entries.insert(entry.into())
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

/// What kind of content an archive entry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
  File,
  NestedArchive,
}

/// An archive being assembled, together with its duplicate registry.
///
/// The builder is consumed by [`ArchiveBuilder::finish`], so an archive is
/// finalized exactly once and cannot be appended to afterwards.
pub struct ArchiveBuilder<W: Write + Seek> {
  zip: ZipWriter<W>,
  registry: EntryRegistry,
  options: BundleOptions,
  entries: Vec<(String, EntryKind)>,
}

impl<W: Write + Seek> ArchiveBuilder<W> {
  pub fn new(inner: W, options: BundleOptions) -> Self {
    Self {
      zip: ZipWriter::new(inner),
      registry: EntryRegistry::new(),
      options,
      entries: Vec::new(),
    }
  }

  pub fn options(&self) -> &BundleOptions {
    &self.options
  }

  pub fn registry(&self) -> &EntryRegistry {
    &self.registry
  }

  /// Entries written so far, in write order.
  pub fn entries(&self) -> &[(String, EntryKind)] {
    &self.entries
  }

  /// Merge the contents of `source_dir` into the archive under `prefix`.
  ///
  /// An empty prefix (or `"."`) targets the archive root. If `prefix` ends in
  /// a nested archive suffix, `source_dir` is packaged as a separate archive
  /// stored at `prefix`. A missing `source_dir` writes nothing.
  ///
  /// # Errors
  ///
  /// Returns [`Error::RecursionLimitExceeded`] once `depth` passes the
  /// configured maximum, and [`Error::Io`] for any read or write failure.
  pub fn write_directory(&mut self, prefix: &str, source_dir: &Path, depth: usize) -> Result<()> {
    if depth > self.options.max_depth {
      return Err(Error::RecursionLimitExceeded {
        dir: source_dir.to_path_buf(),
        limit: self.options.max_depth,
      });
    }

    let prefix = normalize_prefix(prefix);
    if self.options.is_nested_archive(&prefix) {
      return self.write_nested_archive(&prefix, source_dir, depth);
    }

    if !source_dir.is_dir() {
      debug!(dir = %source_dir.display(), "source directory absent, nothing to write");
      return Ok(());
    }

    for child in list_children(source_dir)? {
      let entry_path = child_entry_path(&prefix, &child.name);
      if child.is_dir {
        self.write_directory(&entry_path, &child.path, depth + 1)?;
      } else {
        self.write_file(&entry_path, &child.path)?;
      }
    }

    Ok(())
  }

  /// Copy `source_file` into a single stored entry at `entry_path`.
  ///
  /// Separators are normalized to `/`. A path already in the registry is
  /// skipped without error.
  pub fn write_file(&mut self, entry_path: &str, source_file: &Path) -> Result<()> {
    let entry_path = normalize_entry_path(entry_path);
    if self.registry.contains(&entry_path) {
      debug!(entry = %entry_path, source = %source_file.display(), "entry already written, skipping");
      return Ok(());
    }

    let mut file = File::open(source_file).map_err(|e| Error::io(source_file, e))?;
    self.registry.insert(entry_path.as_str());
    self.start_entry(&entry_path)?;
    io::copy(&mut file, &mut self.zip).map_err(|e| Error::io(source_file, e))?;

    trace!(entry = %entry_path, "wrote file entry");
    self.entries.push((entry_path, EntryKind::File));
    Ok(())
  }

  /// Finalize the archive and hand back the underlying writer.
  pub fn finish(self) -> Result<W> {
    self.zip.finish().map_err(|e| Error::archive("(central directory)", e))
  }

  fn write_nested_archive(&mut self, target: &str, source_dir: &Path, depth: usize) -> Result<()> {
    if self.registry.contains(target) {
      debug!(entry = %target, "nested archive already written, skipping");
      return Ok(());
    }

    // The nested level keeps counting from the current depth so a link cycle
    // through a nested archive directory still hits the limit.
    let mut nested = ArchiveBuilder::new(Cursor::new(Vec::new()), self.options.clone());
    nested.write_directory("", source_dir, depth)?;
    let nested_entries = nested.entries.len();
    let bytes = nested.finish()?.into_inner();

    self.registry.insert(target);
    self.start_entry(target)?;
    self.zip.write_all(&bytes).map_err(|e| Error::io(Path::new(target), e))?;

    debug!(
      entry = %target,
      source = %source_dir.display(),
      entries = nested_entries,
      bytes = bytes.len(),
      "wrote nested archive"
    );
    self.entries.push((target.to_string(), EntryKind::NestedArchive));
    Ok(())
  }

  fn start_entry(&mut self, entry_path: &str) -> Result<()> {
    self
      .zip
      .start_file(entry_path, entry_options())
      .map_err(|e| Error::archive(entry_path, e))
  }
}

/// Options applied to every entry: stored, fixed timestamp, fixed mode.
fn entry_options() -> SimpleFileOptions {
  SimpleFileOptions::default()
    .compression_method(CompressionMethod::Stored)
    .last_modified_time(DateTime::default())
    .unix_permissions(0o644)
}

/// Convert a host path fragment to an archive entry path.
///
/// Backslashes become `/` and leading or trailing separators are dropped, so
/// `META-INF\`, `/META-INF` and `META-INF/` all name `META-INF`. Entry names
/// are never absolute.
pub fn normalize_entry_path(path: &str) -> String {
  path.replace('\\', "/").trim_matches('/').to_string()
}

fn normalize_prefix(prefix: &str) -> String {
  let prefix = normalize_entry_path(prefix);
  if prefix == ROOT_ENTRY { String::new() } else { prefix }
}

fn child_entry_path(prefix: &str, name: &str) -> String {
  if prefix.is_empty() {
    name.to_string()
  } else {
    format!("{}/{}", prefix, name)
  }
}

struct Child {
  name: String,
  path: PathBuf,
  is_dir: bool,
}

/// List the immediate children of `dir` in file name order.
///
/// Symbolic links are resolved to their target type; the depth limit is what
/// stops a link cycle. Dangling links and special files are skipped.
fn list_children(dir: &Path) -> Result<Vec<Child>> {
  let mut children = Vec::new();

  for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
    let entry = entry.map_err(|e| {
      let path = e.path().unwrap_or(dir).to_path_buf();
      Error::io(&path, io::Error::from(e))
    })?;

    let file_type = if entry.path_is_symlink() {
      match entry.path().metadata() {
        Ok(metadata) => metadata.file_type(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
          debug!(path = %entry.path().display(), "skipping dangling symlink");
          continue;
        }
        Err(e) => return Err(Error::io(entry.path(), e)),
      }
    } else {
      entry.file_type()
    };

    if !file_type.is_file() && !file_type.is_dir() {
      trace!(path = %entry.path().display(), "skipping special file");
      continue;
    }

    children.push(Child {
      name: entry.file_name().to_string_lossy().into_owned(),
      is_dir: file_type.is_dir(),
      path: entry.into_path(),
    });
  }

  Ok(children)
}
