//! Loading the run configuration from disk.

use super::RunConfig;
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Config filename looked up when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "stitch.toml";

/// Parse and validate configuration text.
pub fn parse_config(content: &str) -> Result<RunConfig> {
    let config: RunConfig =
        toml::from_str(content).map_err(|e| Error::Config(format!("failed to parse: {e}")))?;
    config.validate()?;
    Ok(config)
}

/// Load configuration from `path`.
///
/// Unlike optional state files, a missing config is an error: there is
/// nothing to run without it.
pub fn load_config(path: &Path) -> Result<RunConfig> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

    parse_config(&content).map_err(|e| match e {
        Error::Config(msg) => Error::Config(format!("{}: {msg}", path.display())),
        other => other,
    })
}
