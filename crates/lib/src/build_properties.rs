//! Build-instruction descriptor (`build.properties`).
//!
//! `bin.includes` lists what goes into the binary bundle. Each item is either
//! mapped to an output directory by an `output.<item>` key (a library, often a
//! nested `.jar`), or names a file or directory under the project root that is
//! copied as-is. The root item `.` is skipped here; the `.classpath` outputs
//! cover it.

use std::collections::HashMap;
use std::io::{Seek, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::Result;
use crate::archive::ArchiveBuilder;
use crate::consts::{BIN_INCLUDES_KEY, OUTPUT_KEY_PREFIX, ROOT_ENTRY};
use crate::error::Error;
use crate::options::{BundleOptions, split_list};
use crate::util::path::resolve_in_project;

/// One item of the inclusion list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Inclusion {
  /// Directory `source_dir` packaged under the target path `name`.
  Mapped { name: String, source_dir: String },
  /// File or directory copied from `path` under the project root.
  Direct { path: String },
}

impl Inclusion {
  /// The target path inside the bundle.
  pub fn name(&self) -> &str {
    match self {
      Inclusion::Mapped { name, .. } => name,
      Inclusion::Direct { path } => path,
    }
  }
}

/// Parsed (or synthesized) build instructions.
#[derive(Debug, Clone)]
pub struct BuildProperties {
  properties: HashMap<String, String>,
  synthesized: bool,
}

impl BuildProperties {
  /// Load the project's build instructions.
  ///
  /// When the descriptor is absent a default is synthesized with
  /// `bin.includes` set to `options.default_includes`.
  pub fn load(project_dir: &Path, options: &BundleOptions) -> Result<Self> {
    let path = project_dir.join(&options.build_properties_file);
    if !path.is_file() {
      debug!(path = %path.display(), "no build instructions, using defaults");
      return Ok(Self::synthesized(options));
    }

    let content = std::fs::read(&path).map_err(|e| Error::io(&path, e))?;
    Self::parse(&path, &content)
  }

  /// Parse properties text. `path` is only used in errors.
  pub fn parse(path: &Path, content: &[u8]) -> Result<Self> {
    let properties = java_properties::read(content).map_err(|e| Error::malformed(path, e.to_string()))?;
    Ok(Self {
      properties,
      synthesized: false,
    })
  }

  /// Instructions equivalent to a freshly converted plug-in project.
  pub fn synthesized(options: &BundleOptions) -> Self {
    let mut properties = HashMap::new();
    properties.insert(BIN_INCLUDES_KEY.to_string(), options.default_includes.clone());
    Self {
      properties,
      synthesized: true,
    }
  }

  /// Whether these instructions were synthesized because no descriptor exists.
  pub fn is_synthesized(&self) -> bool {
    self.synthesized
  }

  pub fn get(&self, key: &str) -> Option<&str> {
    self.properties.get(key).map(String::as_str)
  }

  /// Resolve `bin.includes` into inclusion entries, in list order.
  pub fn inclusions(&self) -> Vec<Inclusion> {
    let Some(includes) = self.get(BIN_INCLUDES_KEY) else {
      return Vec::new();
    };

    split_list(includes)
      .into_iter()
      .filter(|name| name != ROOT_ENTRY)
      .map(|name| match self.get(&format!("{}{}", OUTPUT_KEY_PREFIX, name)) {
        Some(source_dir) => Inclusion::Mapped {
          source_dir: source_dir.trim().to_string(),
          name,
        },
        None => Inclusion::Direct { path: name },
      })
      .collect()
  }
}

/// Write every inclusion of `properties` into `builder`.
///
/// # Errors
///
/// [`Error::MissingResource`] if a direct inclusion does not exist. Missing
/// items of synthesized instructions are skipped instead.
pub fn include_resources<W: Write + Seek>(
  builder: &mut ArchiveBuilder<W>,
  project_dir: &Path,
  properties: &BuildProperties,
) -> Result<()> {
  for inclusion in properties.inclusions() {
    match inclusion {
      Inclusion::Mapped { name, source_dir } => {
        debug!(entry = %name, source = %source_dir, "including mapped library");
        builder.write_directory(&name, &resolve_in_project(project_dir, &source_dir), 0)?;
      }
      Inclusion::Direct { path } => {
        let resource = resolve_in_project(project_dir, &path);
        if !resource.exists() {
          if properties.is_synthesized() {
            debug!(path = %path, "default include absent, skipping");
            continue;
          }
          return Err(Error::MissingResource {
            path: PathBuf::from(path),
          });
        }

        debug!(path = %path, "including resource");
        if resource.is_file() {
          builder.write_file(&path, &resource)?;
        } else {
          builder.write_directory(&path, &resource, 0)?;
        }
      }
    }
  }

  Ok(())
}
