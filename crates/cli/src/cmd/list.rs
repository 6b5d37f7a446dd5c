//! List command implementation.
//!
//! Assembles a project in memory and prints the top-level entries in write order.

use anyhow::{Context, Result};

use pdebundle_lib::assemble_with;

use super::BundleArgs;
use super::project::resolve_project;
use crate::output::{OutputFormat, print_entry, print_json};

pub fn cmd_list(project: &str, args: &BundleArgs, format: OutputFormat) -> Result<()> {
  let project_dir = resolve_project(project)?;
  let bundle = assemble_with(&project_dir, &args.options())
    .with_context(|| format!("Failed to assemble {}", project_dir.display()))?;

  if format.is_json() {
    return print_json(&serde_json::json!({
      "project": project_dir,
      "digest": bundle.digest(),
      "entries": bundle.entries(),
    }));
  }

  for entry in bundle.entries() {
    print_entry(entry.kind, &entry.name);
  }

  Ok(())
}
