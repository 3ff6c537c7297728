//! Coverage command - summarize `go tool cover -func` output

use crate::cli::style::Stylize;
use anstream::{eprintln, print};
use stitch::coverage::{parse_func_output, run_go_cover};
use stitch::error::Result;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Where the coverage table comes from
#[derive(Debug, Clone)]
pub enum CoverageSource {
    /// Read `-func` output from a file
    File(PathBuf),
    /// Read `-func` output from stdin
    Stdin,
    /// Run `go tool cover` on a profile
    Profile(PathBuf),
}

/// Run the coverage command
pub fn run_coverage(source: &CoverageSource, prefix: Option<&str>) -> Result<()> {
    let text = match source {
        CoverageSource::File(path) => fs::read_to_string(path)?,
        CoverageSource::Stdin => io::read_to_string(io::stdin())?,
        CoverageSource::Profile(profile) => run_go_cover(profile)?,
    };

    let report = parse_func_output(&text, prefix);
    if report.files.is_empty() {
        eprintln!("{}", "No function coverage lines found".warn());
    }
    print!("{report}");
    Ok(())
}
