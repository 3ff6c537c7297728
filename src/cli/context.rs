//! Shared context for config-driven commands
//!
//! Loads the config file and remembers where it lives, so relative group
//! paths resolve the same way no matter where `stitch` is invoked from.

use stitch::config::{DEFAULT_CONFIG_FILE, RunConfig, load_config};
use stitch::error::Result;
use stitch::merge::Merger;
use stitch::types::{MergeGroup, MissingPolicy};
use std::path::{Path, PathBuf};

/// Loaded configuration plus the directory it was found in
pub struct CommandContext {
    /// Parsed configuration
    pub config: RunConfig,
    /// Path of the config file
    pub config_path: PathBuf,
    /// Directory relative paths resolve against
    pub base_dir: PathBuf,
}

impl CommandContext {
    /// Load `path`, or `stitch.toml` in the current directory
    pub fn new(path: Option<&Path>) -> Result<Self> {
        let config_path = path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), Path::to_path_buf);
        let config = load_config(&config_path)?;
        let base_dir = match config_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        Ok(Self {
            config,
            config_path,
            base_dir,
        })
    }

    /// Groups to run; empty `selected` means all of them
    pub fn groups(&self, selected: &[String]) -> Result<Vec<MergeGroup>> {
        self.config.resolve_groups(&self.base_dir, selected)
    }

    /// Build a merger from the config, with `strict` forcing the fail policy
    pub fn merger(&self, dry_run: bool, strict: bool) -> Result<Merger> {
        let mut options = self.config.merge_options(dry_run);
        if strict {
            options.on_missing = MissingPolicy::Fail;
        }
        Merger::new(options)
    }
}
