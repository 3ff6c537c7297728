//! stitch - merge structured source files into one

mod cli;

use anyhow::Context;
use clap::{Parser, Subcommand};
use cli::coverage::{CoverageSource, run_coverage};
use cli::merge::{MergeCommandOptions, RunOptions, run_groups, run_merge};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Merge structured source files into one, deduplicating imports
#[derive(Parser)]
#[command(name = "stitch", version, about)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge input files into one output file
    Merge {
        /// Input files, in merge order
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// Module name for the output (default: first declared by an input)
        #[arg(short, long)]
        module: Option<String>,

        /// Show what would be merged without writing
        #[arg(long)]
        dry_run: bool,

        /// Fail if any input is missing
        #[arg(long)]
        strict: bool,
    },

    /// Run the merge groups of a config file
    Run {
        /// Config file
        #[arg(short, long, default_value = stitch::config::DEFAULT_CONFIG_FILE)]
        config: PathBuf,

        /// Only run this group (repeatable)
        #[arg(short, long = "group")]
        groups: Vec<String>,

        /// Show what would be merged without writing
        #[arg(long)]
        dry_run: bool,

        /// Run groups in parallel
        #[arg(long)]
        parallel: bool,

        /// Fail a group if any input is missing
        #[arg(long)]
        strict: bool,
    },

    /// Summarize `go tool cover -func` output by file
    Coverage {
        /// File holding the `-func` output (stdin if omitted or `-`)
        input: Option<PathBuf>,

        /// Run `go tool cover -func` on this profile instead
        #[arg(long, conflicts_with = "input")]
        profile: Option<PathBuf>,

        /// Only count functions whose path starts with this prefix
        #[arg(long)]
        prefix: Option<String>,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("STITCH_LOG").unwrap_or_else(|_| EnvFilter::new("error"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let summary = match cli.command {
        Commands::Merge {
            inputs,
            output,
            module,
            dry_run,
            strict,
        } => run_merge(MergeCommandOptions {
            inputs,
            output,
            module,
            dry_run,
            strict,
        })
        .context("merge failed")?,
        Commands::Run {
            config,
            groups,
            dry_run,
            parallel,
            strict,
        } => run_groups(&RunOptions {
            config: Some(config),
            groups,
            dry_run,
            parallel,
            strict,
        })
        .context("run failed")?,
        Commands::Coverage {
            input,
            profile,
            prefix,
        } => {
            let source = match (profile, input) {
                (Some(profile), _) => CoverageSource::Profile(profile),
                (None, Some(path)) if path.as_os_str() != "-" => CoverageSource::File(path),
                (None, _) => CoverageSource::Stdin,
            };
            run_coverage(&source, prefix.as_deref()).context("coverage report failed")?;
            return Ok(ExitCode::SUCCESS);
        }
    };

    Ok(if summary.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
