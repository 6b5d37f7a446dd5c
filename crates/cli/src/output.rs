//! Terminal output for bundle commands.
//!
//! Status lines go to stdout, except warnings and errors which go to stderr.
//! Colors are only emitted when the target stream supports them.

use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};

use pdebundle_lib::archive::EntryKind;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

/// Leading marker of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
  Success,
  Info,
  Warning,
  Error,
}

impl Status {
  fn symbol(self) -> &'static str {
    match self {
      Status::Success => "✓",
      Status::Info => "•",
      Status::Warning => "⚠",
      Status::Error => "✗",
    }
  }
}

pub fn print_status(status: Status, message: &str) {
  let symbol = status.symbol();
  match status {
    Status::Success => println!("{} {}", symbol.if_supports_color(Stream::Stdout, |s| s.green()), message),
    Status::Info => println!("{} {}", symbol.if_supports_color(Stream::Stdout, |s| s.blue()), message),
    Status::Warning => eprintln!(
      "{} {}",
      symbol.if_supports_color(Stream::Stderr, |s| s.yellow()),
      message.if_supports_color(Stream::Stderr, |s| s.yellow())
    ),
    Status::Error => eprintln!(
      "{} {}",
      symbol.if_supports_color(Stream::Stderr, |s| s.red()),
      message.if_supports_color(Stream::Stderr, |s| s.red())
    ),
  }
}

/// Print `label: value` rows with labels right-aligned to the widest one.
pub fn print_summary(rows: &[(&str, String)]) {
  let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
  for (label, value) in rows {
    let label = format!("{:>width$}", label, width = width);
    println!("  {}: {}", label.if_supports_color(Stream::Stdout, |s| s.dimmed()), value);
  }
}

/// One top-level bundle entry; nested archives are marked.
pub fn print_entry(kind: EntryKind, name: &str) {
  match kind {
    EntryKind::File => println!("  • {}", name),
    EntryKind::NestedArchive => println!(
      "  {} {} {}",
      "+".if_supports_color(Stream::Stdout, |s| s.green()),
      name,
      "(nested archive)".if_supports_color(Stream::Stdout, |s| s.dimmed())
    ),
  }
}

/// A mapped library line: `name → source`.
pub fn print_mapping(name: &str, source: &str) {
  println!("  + {} → {}", name, source);
}

pub fn print_item(item: &str) {
  println!("  • {}", item);
}

/// Archive sizes in binary units.
pub fn format_bytes(bytes: u64) -> String {
  const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

  let mut value = bytes as f64;
  let mut unit = 0;
  while value >= 1024.0 && unit < UNITS.len() - 1 {
    value /= 1024.0;
    unit += 1;
  }

  if unit == 0 {
    format!("{} B", bytes)
  } else {
    format!("{:.1} {}", value, UNITS[unit])
  }
}

/// Assembly time: milliseconds below one second, seconds above.
pub fn format_duration(duration: Duration) -> String {
  if duration < Duration::from_secs(1) {
    format!("{}ms", duration.as_millis())
  } else {
    format!("{:.2}s", duration.as_secs_f64())
  }
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}
