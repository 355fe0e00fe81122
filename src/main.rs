use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use jacoco2cobertura::cli;
use jacoco2cobertura::task::ConvertConfig;

/// Convert JaCoCo XML coverage reports into Cobertura XML.
#[derive(Parser)]
#[command(name = "jacoco2cobertura", version, about)]
struct Cli {
    /// Log debug output (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a JaCoCo report into one or more Cobertura reports.
    Convert {
        /// Path to the JaCoCo XML report.
        #[arg(long)]
        input: PathBuf,

        /// Path of the Cobertura XML report to write.
        #[arg(long)]
        output: PathBuf,

        /// Source root to list in the report (repeatable, default ".").
        #[arg(long = "source-dir")]
        source_dirs: Vec<String>,

        /// Write one report per package, named after the package.
        #[arg(long)]
        split_by_package: bool,
    },

    /// Print the structure of a JaCoCo report.
    Dump {
        /// Path to the JaCoCo XML report.
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let output = match args.command {
        Commands::Convert {
            input,
            output,
            source_dirs,
            split_by_package,
        } => cli::cmd_convert(&ConvertConfig {
            input,
            output,
            source_dirs,
            split_by_package,
        })?,
        Commands::Dump { file } => cli::cmd_dump(&file)?,
    };
    print!("{}", output);
    Ok(())
}
