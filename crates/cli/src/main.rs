mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cmd::{BundleArgs, cmd_build, cmd_inspect, cmd_list};
use output::{OutputFormat, Status, print_status};

/// pdebundle - package a compiled project directory as a module bundle
#[derive(Parser)]
#[command(name = "pdebundle")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable debug logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Assemble a project and write the bundle to disk
  Build {
    /// Project directory or eclipse-project: location
    project: String,

    /// Output file (default: <project-name>.jar in the current directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    bundle: BundleArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    output_format: OutputFormat,
  },

  /// Assemble a project in memory and list its top-level entries
  List {
    /// Project directory or eclipse-project: location
    project: String,

    #[command(flatten)]
    bundle: BundleArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    output_format: OutputFormat,
  },

  /// Show what would be packaged without assembling
  Inspect {
    /// Project directory or eclipse-project: location
    project: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    output_format: OutputFormat,
  },
}

fn main() {
  let cli = Cli::parse();

  let default_filter = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  if let Err(e) = run(cli.command) {
    print_status(Status::Error, &format!("{:#}", e));
    std::process::exit(1);
  }
}

fn run(command: Commands) -> Result<()> {
  match command {
    Commands::Build {
      project,
      output,
      bundle,
      output_format,
    } => cmd_build(&project, output, &bundle, output_format),
    Commands::List {
      project,
      bundle,
      output_format,
    } => cmd_list(&project, &bundle, output_format),
    Commands::Inspect { project, output_format } => cmd_inspect(&project, output_format),
  }
}
