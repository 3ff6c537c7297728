//! CLI command implementations

pub mod context;
pub mod coverage;
pub mod merge;
pub mod style;

use anstream::println;
use stitch::merge::ProgressCallback;
use std::path::Path;
use style::Stylize;

/// Progress reporter that prints warnings to the terminal
pub struct CliProgress;

impl ProgressCallback for CliProgress {
    fn on_missing_input(&self, group: &str, path: &Path) {
        println!(
            "{} {}: {} not found, skipping",
            "Warning:".warn(),
            group.emphasis(),
            path.display()
        );
    }
}
