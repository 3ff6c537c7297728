//! Merge commands - `stitch run` and `stitch merge`

use crate::cli::CliProgress;
use crate::cli::context::CommandContext;
use crate::cli::style::{Stylize, check, cross};
use anstream::println;
use stitch::error::Result;
use stitch::merge::{GroupOutcome, MergeOptions, Merger};
use stitch::types::{GroupReport, MergeGroup, MissingPolicy};
use std::path::PathBuf;

/// Options for the run command
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Config file (defaults to `stitch.toml`)
    pub config: Option<PathBuf>,
    /// Only run these groups
    pub groups: Vec<String>,
    /// Report what would be merged without writing outputs
    pub dry_run: bool,
    /// Run groups on a thread pool
    pub parallel: bool,
    /// Fail a group when any input is missing
    pub strict: bool,
}

/// Options for the ad-hoc merge command
#[derive(Debug, Clone, Default)]
pub struct MergeCommandOptions {
    /// Input files, in merge order
    pub inputs: Vec<PathBuf>,
    /// Output file
    pub output: PathBuf,
    /// Module name for the output
    pub module: Option<String>,
    /// Report what would be merged without writing the output
    pub dry_run: bool,
    /// Fail when any input is missing
    pub strict: bool,
}

/// Summary of a command run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Groups that completed
    pub succeeded: usize,
    /// Groups that failed
    pub failed: usize,
}

impl RunSummary {
    /// Whether every group completed
    pub const fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Run the groups listed in a config file
pub fn run_groups(options: &RunOptions) -> Result<RunSummary> {
    let ctx = CommandContext::new(options.config.as_deref())?;
    let groups = ctx.groups(&options.groups)?;
    let merger = ctx.merger(options.dry_run, options.strict)?;

    if groups.is_empty() {
        println!(
            "{}",
            format!("No groups defined in {}", ctx.config_path.display()).muted()
        );
        return Ok(RunSummary::default());
    }

    println!(
        "{} {} from {}",
        "Merging".emphasis(),
        format!("{} group(s)", groups.len()).accent(),
        ctx.config_path.display()
    );

    let outcomes = merger.run_groups(&groups, options.parallel, &CliProgress);
    let summary = print_outcomes(&outcomes, options.dry_run);
    print_summary(summary);
    Ok(summary)
}

/// Merge the given inputs into one output
pub fn run_merge(options: MergeCommandOptions) -> Result<RunSummary> {
    let merger = Merger::new(MergeOptions {
        on_missing: if options.strict {
            MissingPolicy::Fail
        } else {
            MissingPolicy::Skip
        },
        dry_run: options.dry_run,
        ..MergeOptions::default()
    })?;

    let name = options
        .output
        .file_stem()
        .map_or_else(|| "merge".to_string(), |s| s.to_string_lossy().into_owned());
    let group = MergeGroup {
        name: name.clone(),
        inputs: options.inputs,
        output: options.output,
        module: options.module,
    };

    let outcome = GroupOutcome {
        name,
        result: merger.run_group(&group, &CliProgress),
    };
    Ok(print_outcomes(std::slice::from_ref(&outcome), options.dry_run))
}

fn print_outcomes(outcomes: &[GroupOutcome], dry_run: bool) -> RunSummary {
    let mut summary = RunSummary::default();

    for outcome in outcomes {
        match &outcome.result {
            Ok(report) => {
                print_report(report, dry_run);
                summary.succeeded += 1;
            }
            Err(e) => {
                println!("{} {}: {}", cross(), outcome.name.emphasis(), e.error());
                summary.failed += 1;
            }
        }
    }

    summary
}

fn print_report(report: &GroupReport, dry_run: bool) {
    let verb = if dry_run { "Would merge" } else { "Merged" };
    println!(
        "{} {} {}/{} files into {} ({})",
        check(),
        verb,
        report.inputs_read,
        report.inputs_declared,
        report.output.display().accent(),
        report.name.muted()
    );
    println!("   Total imports: {}", report.import_count.accent());
    println!("   Total code blocks: {}", report.block_count.accent());
    if !report.missing.is_empty() {
        println!(
            "   {}",
            format!("Skipped {} missing input(s)", report.missing.len()).warn()
        );
    }
}

fn print_summary(summary: RunSummary) {
    println!();
    if summary.is_success() {
        println!(
            "{}",
            format!("{} group(s) merged", summary.succeeded).success()
        );
    } else {
        println!(
            "{}, {}",
            format!("{} group(s) merged", summary.succeeded).success(),
            format!("{} failed", summary.failed).error()
        );
    }
}
