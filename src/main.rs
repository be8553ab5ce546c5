mod commands;
mod config;
mod context;
mod executor;
mod hcl;
mod output;
mod salvage;
mod test_helpers;
mod tfjson;
mod traits;

use anyhow::{Context as _, Result};
use clap::Parser;
use commands::{SalvageCommand, SalvageOptions, SelectionMode};
use context::Context;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tfsalvage")]
#[command(about = "Rebuild Terraform resource blocks from state", long_about = None)]
#[command(version)]
struct Cli {
    /// Salvage only the resource addresses listed on stdin
    #[arg(long, conflicts_with = "exclude")]
    include: bool,

    /// Salvage every resource except the addresses listed on stdin
    #[arg(long)]
    exclude: bool,

    /// Terraform working directory (defaults to current directory)
    #[arg(short = 'C', long, value_name = "DIR")]
    chdir: Option<PathBuf>,

    /// Executor used to read state and schemas (terraform, opentofu)
    #[arg(short, long, env = "TFSALVAGE_EXECUTOR", value_name = "NAME")]
    executor: Option<String>,

    /// Read a saved `show -json` document instead of running the executor
    #[arg(long, value_name = "FILE")]
    state_json: Option<PathBuf>,

    /// Read a saved `providers schema -json` document instead of running the executor
    #[arg(long, value_name = "FILE")]
    schema_json: Option<PathBuf>,

    /// Write the configuration to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Only report errors on stderr
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let ctx = if cli.quiet {
        Context::quiet()
    } else {
        Context::new()
    };

    let working_dir = match cli.chdir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    let mode = if cli.include {
        SelectionMode::Include
    } else if cli.exclude {
        SelectionMode::Exclude
    } else {
        SelectionMode::All
    };

    let options = SalvageOptions {
        working_dir,
        mode,
        executor: cli.executor,
        state_json: cli.state_json,
        schema_json: cli.schema_json,
        output: cli.output,
    };

    SalvageCommand::execute(&ctx, &options)
}
