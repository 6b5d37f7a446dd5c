//! Inspect command implementation.
//!
//! Shows the build instructions and output directories of a project without
//! writing anything.

use anyhow::{Context, Result};

use pdebundle_lib::BundleOptions;
use pdebundle_lib::build_properties::{BuildProperties, Inclusion};
use pdebundle_lib::classpath::read_output_dirs;
use pdebundle_lib::util::path::resolve_in_project;

use super::project::resolve_project;
use crate::output::{OutputFormat, Status, print_item, print_json, print_mapping, print_status, print_summary};

pub fn cmd_inspect(project: &str, format: OutputFormat) -> Result<()> {
  let project_dir = resolve_project(project)?;
  let options = BundleOptions::from_env();

  let properties = BuildProperties::load(&project_dir, &options).context("Failed to read build instructions")?;
  let inclusions = properties.inclusions();
  let outputs = read_output_dirs(&project_dir, &options).context("Failed to read output directories")?;

  if format.is_json() {
    let output_dirs: Vec<_> = outputs
      .iter()
      .map(|dir| serde_json::json!({ "path": dir, "exists": resolve_in_project(&project_dir, dir).is_dir() }))
      .collect();
    return print_json(&serde_json::json!({
      "project": project_dir,
      "synthesized": properties.is_synthesized(),
      "inclusions": inclusions,
      "output_dirs": output_dirs,
    }));
  }

  print_status(Status::Info, &format!("Project {}", project_dir.display()));
  if properties.is_synthesized() {
    print_summary(&[("Build instructions", "defaults (no build.properties)".to_string())]);
  }

  println!();
  println!("Inclusions:");
  for inclusion in &inclusions {
    match inclusion {
      Inclusion::Mapped { name, source_dir } => print_mapping(name, source_dir),
      Inclusion::Direct { path } => print_item(path),
    }
  }

  println!();
  println!("Output directories:");
  for dir in &outputs {
    print_item(dir);
  }
  for dir in outputs.iter().filter(|dir| !resolve_in_project(&project_dir, dir).is_dir()) {
    print_status(Status::Warning, &format!("Output directory {} does not exist", dir));
  }

  Ok(())
}
