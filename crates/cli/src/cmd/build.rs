//! Implementation of the `pdebundle build` command.
//!
//! Assembles a project in memory and writes the finished bundle to disk.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use pdebundle_lib::assemble_with;

use super::BundleArgs;
use super::project::{default_output, resolve_project};
use crate::output::{OutputFormat, Status, format_bytes, format_duration, print_json, print_status, print_summary};

pub fn cmd_build(project: &str, output: Option<PathBuf>, args: &BundleArgs, format: OutputFormat) -> Result<()> {
  let project_dir = resolve_project(project)?;
  let options = args.options();

  let start = Instant::now();
  let bundle =
    assemble_with(&project_dir, &options).with_context(|| format!("Failed to assemble {}", project_dir.display()))?;
  let elapsed = start.elapsed();

  let output = output.unwrap_or_else(|| default_output(&project_dir));
  std::fs::write(&output, bundle.bytes()).with_context(|| format!("Failed to write {}", output.display()))?;
  info!(path = %output.display(), "bundle written");

  if format.is_json() {
    print_json(&serde_json::json!({
      "project": project_dir,
      "output": output,
      "entries": bundle.entries().len(),
      "bytes": bundle.bytes().len(),
      "digest": bundle.digest(),
      "duration_ms": elapsed.as_millis() as u64,
    }))?;
  } else {
    print_status(Status::Success, &format!("Wrote {}", output.display()));
    print_summary(&[
      ("Entries", bundle.entries().len().to_string()),
      ("Size", format_bytes(bundle.bytes().len() as u64)),
      ("SHA-256", bundle.digest().to_string()),
      ("Took", format_duration(elapsed)),
    ]);
  }

  Ok(())
}
