//! Dependency/output-mapping descriptor (`.classpath`).
//!
//! The descriptor is a flat XML document of `classpathentry` elements. Only
//! two kinds matter when packaging:
//!
//! - `kind="src"` with an `output` attribute: a source folder compiled to its
//!   own output directory
//! - `kind="output"` with a `path` attribute: the default output directory
//!
//! The file is read with a streaming event reader in a single pass.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::debug;

use crate::Result;
use crate::error::Error;
use crate::options::BundleOptions;
use crate::util::path::resolve_in_project;

const CLASSPATH_ENTRY: &[u8] = b"classpathentry";

/// The `kind` attribute of a `classpathentry`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClasspathKind {
  /// `src`: compiled source, optionally with its own `output` directory.
  Source,
  /// `output`: default output directory named by `path`.
  Output,
  /// Containers, libraries, variables and anything else.
  Other(String),
}

impl From<&str> for ClasspathKind {
  fn from(kind: &str) -> Self {
    match kind {
      "src" => ClasspathKind::Source,
      "output" => ClasspathKind::Output,
      other => ClasspathKind::Other(other.to_string()),
    }
  }
}

/// Read the project's `.classpath` and collect every output directory it names.
///
/// # Errors
///
/// [`Error::MissingDescriptor`] if the descriptor is absent or not a regular
/// file, [`Error::MalformedDescriptor`] if it can't be parsed.
pub fn read_output_dirs(project_dir: &Path, options: &BundleOptions) -> Result<BTreeSet<String>> {
  let path = project_dir.join(&options.classpath_file);
  if !path.is_file() {
    return Err(Error::MissingDescriptor { path });
  }

  let file = File::open(&path).map_err(|e| Error::io(&path, e))?;
  parse_classpath(&path, BufReader::new(file))
}

/// Parse descriptor markup from `reader`. `path` is only used in errors.
///
/// The event reader only checks each event in isolation, so document
/// structure (exactly one root element, properly closed, no text around it)
/// is tracked here.
pub fn parse_classpath<R: BufRead>(path: &Path, reader: R) -> Result<BTreeSet<String>> {
  let mut reader = Reader::from_reader(reader);
  let mut buf = Vec::new();
  let mut outputs = BTreeSet::new();
  let mut depth = 0usize;
  let mut seen_root = false;

  loop {
    buf.clear();
    let event = reader.read_event_into(&mut buf).map_err(|e| {
      Error::malformed(path, format!("{} (at byte {})", e, reader.error_position()))
    })?;

    match &event {
      Event::Start(element) | Event::Empty(element) => {
        if depth == 0 {
          if seen_root {
            return Err(Error::malformed(path, "content after the root element"));
          }
          seen_root = true;
        }
        if element.name().as_ref() == CLASSPATH_ENTRY
          && let Some(output) = output_of(path, element)?
        {
          outputs.insert(output);
        }
        if matches!(event, Event::Start(_)) {
          depth += 1;
        }
      }
      Event::End(_) => depth = depth.saturating_sub(1),
      Event::Text(text) if depth == 0 && !text.iter().all(u8::is_ascii_whitespace) => {
        return Err(Error::malformed(path, "text outside the root element"));
      }
      Event::CData(_) if depth == 0 => {
        return Err(Error::malformed(path, "text outside the root element"));
      }
      Event::Eof if !seen_root => {
        return Err(Error::malformed(path, "premature end of file, no root element"));
      }
      Event::Eof if depth > 0 => {
        return Err(Error::malformed(path, "premature end of file, unclosed element"));
      }
      Event::Eof => break,
      _ => {}
    }
  }

  Ok(outputs)
}

/// Keep the outputs that exist as directories under `project_dir`.
///
/// A missing output directory is normal for a module that has compiled nothing yet.
pub fn existing_output_dirs(project_dir: &Path, outputs: &BTreeSet<String>) -> Vec<PathBuf> {
  outputs
    .iter()
    .filter_map(|output| {
      let dir = resolve_in_project(project_dir, output);
      if dir.is_dir() {
        Some(dir)
      } else {
        debug!(output = %output, "output directory does not exist, skipping");
        None
      }
    })
    .collect()
}

fn output_of(path: &Path, element: &BytesStart<'_>) -> Result<Option<String>> {
  let kind = attribute(path, element, "kind")?
    .filter(|kind| !kind.is_empty())
    .ok_or_else(|| Error::malformed(path, "missing kind attribute on classpathentry"))?;

  let value = match ClasspathKind::from(kind.as_str()) {
    ClasspathKind::Source => attribute(path, element, "output")?,
    ClasspathKind::Output => attribute(path, element, "path")?,
    ClasspathKind::Other(_) => None,
  };

  Ok(value.filter(|value| !value.is_empty()))
}

fn attribute(path: &Path, element: &BytesStart<'_>, name: &str) -> Result<Option<String>> {
  let Some(attr) = element
    .try_get_attribute(name)
    .map_err(|e| Error::malformed(path, e.to_string()))?
  else {
    return Ok(None);
  };

  let value = attr
    .unescape_value()
    .map_err(|e| Error::malformed(path, e.to_string()))?;
  Ok(Some(value.into_owned()))
}
