//! Run configuration (`stitch.toml`)
//!
//! Lists the merge groups of a project together with the syntax tokens,
//! the default output module and the missing-input policy.

mod storage;

pub use storage::{DEFAULT_CONFIG_FILE, load_config, parse_config};

use crate::error::{Error, Result};
use crate::merge::MergeOptions;
use crate::types::{MergeGroup, MissingPolicy, Syntax};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Top-level configuration
///
/// Missing fields use defaults; unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Default module name for merged outputs
    #[serde(default)]
    pub module: Option<String>,

    /// Policy for unreadable inputs
    #[serde(default)]
    pub on_missing: MissingPolicy,

    /// Syntax tokens
    #[serde(default)]
    pub syntax: Syntax,

    /// Merge groups, in run order
    #[serde(default, rename = "group")]
    pub groups: Vec<GroupConfig>,
}

/// One `[[group]]` table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupConfig {
    /// Group name
    pub name: String,
    /// Input files, in merge order
    pub inputs: Vec<PathBuf>,
    /// Output file
    pub output: PathBuf,
    /// Module name override for this group
    #[serde(default)]
    pub module: Option<String>,
}

impl RunConfig {
    /// Check invariants serde cannot express
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for group in &self.groups {
            if group.name.trim().is_empty() {
                return Err(Error::Config("group name must not be empty".to_string()));
            }
            if !seen.insert(group.name.as_str()) {
                return Err(Error::Config(format!("duplicate group '{}'", group.name)));
            }
        }
        Ok(())
    }

    /// Merge options for this configuration
    pub fn merge_options(&self, dry_run: bool) -> MergeOptions {
        MergeOptions {
            syntax: self.syntax.clone(),
            default_module: self.module.clone(),
            on_missing: self.on_missing,
            dry_run,
        }
    }

    /// Build the groups to run, resolving relative paths against `base_dir`
    ///
    /// An empty `selected` means every group. Otherwise groups are returned
    /// in configuration order, and unknown names are an error.
    pub fn resolve_groups(&self, base_dir: &Path, selected: &[String]) -> Result<Vec<MergeGroup>> {
        if let Some(unknown) = selected
            .iter()
            .find(|name| !self.groups.iter().any(|g| &g.name == *name))
        {
            return Err(Error::Config(format!("no group named '{unknown}'")));
        }

        Ok(self
            .groups
            .iter()
            .filter(|g| selected.is_empty() || selected.contains(&g.name))
            .map(|g| MergeGroup {
                name: g.name.clone(),
                inputs: g.inputs.iter().map(|p| base_dir.join(p)).collect(),
                output: base_dir.join(&g.output),
                module: g.module.clone(),
            })
            .collect())
    }
}
