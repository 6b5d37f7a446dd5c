//! Bundle assembly.
//!
//! Runs the two passes that turn a project directory into a bundle:
//!
//! 1. the build instructions (`build.properties`), which take priority
//! 2. the output directories named by `.classpath`, merged at the archive
//!    root and filling in only entries not already written
//!
//! Any failure aborts the whole assembly and the partial archive is dropped.

use std::io::{Cursor, Seek, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::Result;
use crate::archive::{ArchiveBuilder, EntryKind};
use crate::build_properties::{BuildProperties, include_resources};
use crate::classpath::{existing_output_dirs, read_output_dirs};
use crate::consts::ROOT_ENTRY;
use crate::options::BundleOptions;
use crate::util::hash::{ContentHash, hash_bytes};

/// A top-level entry of an assembled bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleEntry {
  pub name: String,
  pub kind: EntryKind,
}

/// A finalized bundle held in memory.
#[derive(Debug, Clone)]
pub struct Bundle {
  bytes: Vec<u8>,
  entries: Vec<BundleEntry>,
  digest: ContentHash,
}

impl Bundle {
  pub fn bytes(&self) -> &[u8] {
    &self.bytes
  }

  pub fn into_bytes(self) -> Vec<u8> {
    self.bytes
  }

  /// Top-level entries in the order they were written.
  pub fn entries(&self) -> &[BundleEntry] {
    &self.entries
  }

  /// SHA-256 of the archive bytes.
  pub fn digest(&self) -> &ContentHash {
    &self.digest
  }
}

/// Single-use assembly of one project into one writer.
///
/// [`BundleBuilder::build`] consumes the builder: the underlying archive is
/// finalized once and cannot be reused for a second assembly.
pub struct BundleBuilder<W: Write + Seek> {
  project_dir: PathBuf,
  archive: ArchiveBuilder<W>,
}

impl<W: Write + Seek> BundleBuilder<W> {
  pub fn new(project_dir: &Path, writer: W, options: BundleOptions) -> Self {
    Self {
      project_dir: project_dir.to_path_buf(),
      archive: ArchiveBuilder::new(writer, options),
    }
  }

  /// Assemble the bundle and return the finalized writer with the entries written.
  pub fn build(mut self) -> Result<(W, Vec<BundleEntry>)> {
    let options = self.archive.options().clone();
    info!(project = %self.project_dir.display(), "assembling bundle");

    let properties = BuildProperties::load(&self.project_dir, &options)?;
    include_resources(&mut self.archive, &self.project_dir, &properties)?;

    let outputs = read_output_dirs(&self.project_dir, &options)?;
    for dir in existing_output_dirs(&self.project_dir, &outputs) {
      debug!(dir = %dir.display(), "merging output directory");
      self.archive.write_directory(ROOT_ENTRY, &dir, 0)?;
    }

    let entries = self
      .archive
      .entries()
      .iter()
      .map(|(name, kind)| BundleEntry {
        name: name.clone(),
        kind: *kind,
      })
      .collect();
    let writer = self.archive.finish()?;

    Ok((writer, entries))
  }
}

/// Assemble `project_dir` into archive bytes using default options.
pub fn assemble(project_dir: &Path) -> Result<Vec<u8>> {
  assemble_with(project_dir, &BundleOptions::default()).map(Bundle::into_bytes)
}

/// Assemble `project_dir` into an in-memory [`Bundle`].
pub fn assemble_with(project_dir: &Path, options: &BundleOptions) -> Result<Bundle> {
  let builder = BundleBuilder::new(project_dir, Cursor::new(Vec::new()), options.clone());
  let (cursor, entries) = builder.build()?;
  let bytes = cursor.into_inner();
  let digest = hash_bytes(&bytes);

  info!(
    project = %project_dir.display(),
    entries = entries.len(),
    bytes = bytes.len(),
    digest = %digest,
    "bundle assembled"
  );

  Ok(Bundle { bytes, entries, digest })
}
