//! Error types for stitch

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while merging source files
#[derive(Debug, Error)]
pub enum Error {
    /// A declared input does not exist or could not be read
    #[error("input not found: {}", path.display())]
    InputNotFound {
        /// Path as declared in the merge group
        path: PathBuf,
        /// Underlying read failure
        #[source]
        source: std::io::Error,
    },

    /// The merged output could not be written
    #[error("failed to write {}: {source}", path.display())]
    OutputWrite {
        /// Output path of the group
        path: PathBuf,
        /// Underlying write failure
        #[source]
        source: std::io::Error,
    },

    /// No output module name was configured and none of the inputs declared one
    #[error("cannot determine module name for group '{group}'")]
    ModuleUnknown {
        /// Name of the merge group
        group: String,
    },

    /// Configuration could not be loaded or is inconsistent
    #[error("config error: {0}")]
    Config(String),

    /// A syntax token is unusable
    #[error("invalid syntax: {0}")]
    Syntax(String),

    /// The coverage tool failed or produced no usable output
    #[error("coverage error: {0}")]
    Coverage(String),

    /// Other I/O failure
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result alias using the stitch [`Error`]
pub type Result<T> = std::result::Result<T, Error>;
