//! Coverage report summarization
//!
//! Turns the per-function table printed by `go tool cover -func` into a
//! ranked per-file report. Independent of the merge engine.

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Files at or above this average are [`Tier::High`]
pub const HIGH_THRESHOLD: f64 = 70.0;

/// Files at or above this average (and below high) are [`Tier::Medium`]
pub const MEDIUM_THRESHOLD: f64 = 40.0;

const RULE: &str =
    "--------------------------------------------------------------------------------";
const DOUBLE_RULE: &str =
    "================================================================================";

/// Coverage bucket of a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Average >= 70%
    High,
    /// 40% <= average < 70%
    Medium,
    /// Average < 40%
    Low,
}

impl Tier {
    /// Bucket an average percentage
    pub fn from_average(average: f64) -> Self {
        if average >= HIGH_THRESHOLD {
            Self::High
        } else if average >= MEDIUM_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `pad` so column widths in the report apply
        f.pad(match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        })
    }
}

/// Average coverage of one file
#[derive(Debug, Clone, PartialEq)]
pub struct FileCoverage {
    /// File base name
    pub file: String,
    /// Number of function lines seen for the file
    pub functions: usize,
    /// Mean of the function percentages
    pub average: f64,
}

impl FileCoverage {
    /// Tier of this file
    pub fn tier(&self) -> Tier {
        Tier::from_average(self.average)
    }
}

/// Parsed coverage table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoverageReport {
    /// Percentage token from the `total:` line, e.g. `55.0%`
    pub total: Option<String>,
    /// Files sorted by average, highest first (ties by name)
    pub files: Vec<FileCoverage>,
}

impl CoverageReport {
    /// Number of files in each tier as (high, medium, low)
    pub fn tier_counts(&self) -> (usize, usize, usize) {
        self.files
            .iter()
            .fold((0, 0, 0), |(high, medium, low), f| match f.tier() {
                Tier::High => (high + 1, medium, low),
                Tier::Medium => (high, medium + 1, low),
                Tier::Low => (high, medium, low + 1),
            })
    }

    /// Files in the low tier, in report order
    pub fn low_files(&self) -> impl Iterator<Item = &FileCoverage> {
        self.files.iter().filter(|f| f.tier() == Tier::Low)
    }
}

/// Parse `go tool cover -func` output
///
/// Function lines look like `path/file.go:12:\tName\t75.0%`. With `prefix`,
/// only function lines starting with it are counted. Lines whose last token
/// is not a percentage are ignored.
pub fn parse_func_output(text: &str, prefix: Option<&str>) -> CoverageReport {
    let mut total = None;
    let mut per_file: BTreeMap<String, Vec<f64>> = BTreeMap::new();

    for line in text.lines() {
        if line.contains("total:") {
            total = line.split_whitespace().last().map(str::to_owned);
            continue;
        }
        if prefix.is_some_and(|p| !line.starts_with(p)) {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 3 || !tokens[0].contains(':') {
            continue;
        }
        let Ok(percent) = tokens[tokens.len() - 1].trim_end_matches('%').parse::<f64>() else {
            continue;
        };

        let path = tokens[0].split(':').next().unwrap_or_default();
        let file = path.rsplit('/').next().unwrap_or(path);
        per_file.entry(file.to_owned()).or_default().push(percent);
    }

    let mut files: Vec<FileCoverage> = per_file
        .into_iter()
        .map(|(file, percents)| {
            #[allow(clippy::cast_precision_loss)]
            let average = percents.iter().sum::<f64>() / percents.len() as f64;
            FileCoverage {
                file,
                functions: percents.len(),
                average,
            }
        })
        .collect();
    files.sort_by(|a, b| b.average.total_cmp(&a.average).then_with(|| a.file.cmp(&b.file)));

    debug!(files = files.len(), total = ?total, "parsed coverage table");
    CoverageReport { total, files }
}

/// Run `go tool cover -func=<profile>` and return its stdout
pub fn run_go_cover(profile: &Path) -> Result<String> {
    let output = Command::new("go")
        .arg("tool")
        .arg("cover")
        .arg(format!("-func={}", profile.display()))
        .output()
        .map_err(|e| Error::Coverage(format!("failed to run go tool cover: {e}")))?;

    if !output.status.success() {
        return Err(Error::Coverage(format!(
            "go tool cover exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

impl fmt::Display for CoverageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (high, medium, low) = self.tier_counts();

        writeln!(f, "{DOUBLE_RULE}")?;
        writeln!(f, "Coverage report")?;
        writeln!(f, "{DOUBLE_RULE}")?;
        writeln!(f)?;
        writeln!(f, "Total coverage: {}", self.total.as_deref().unwrap_or("unknown"))?;
        writeln!(f)?;
        writeln!(f, "Per-file coverage:")?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "{:<6} {:<42} {:>9}", "tier", "file", "coverage")?;
        writeln!(f, "{RULE}")?;
        for file in &self.files {
            writeln!(f, "{:<6} {:<42} {:>8.1}%", file.tier(), file.file, file.average)?;
        }
        writeln!(f, "{RULE}")?;
        writeln!(f)?;
        writeln!(f, "Distribution:")?;
        writeln!(f, "  high   (>=70%):  {high} file(s)")?;
        writeln!(f, "  medium (40-70%): {medium} file(s)")?;
        writeln!(f, "  low    (<40%):   {low} file(s)")?;
        writeln!(f)?;
        writeln!(f, "Low coverage files (<40%):")?;
        writeln!(f, "{RULE}")?;
        if low == 0 {
            writeln!(f, "  none")?;
        } else {
            for file in self.low_files() {
                writeln!(f, "  {:<42} {:>8.1}%", file.file, file.average)?;
            }
        }
        Ok(())
    }
}
