//! Merge accumulation - pure functions for building the merged output
//!
//! Everything here works on sources that were already read. No I/O happens
//! in this module, which keeps the folding rules easy to unit test.

use crate::error::{Error, Result};
use crate::merge::reader::NormalizedSource;
use crate::types::{BodyBlock, ImportSet, MergedOutput};
use std::path::PathBuf;

/// A successfully read input
#[derive(Debug, Clone)]
pub struct LoadedSource {
    /// Path as declared in the group
    pub path: PathBuf,
    /// Normalized contents
    pub source: NormalizedSource,
}

/// Everything read for one group, in input order
#[derive(Debug, Clone, Default)]
pub struct GatheredInputs {
    /// Inputs that were read, in declared order
    pub loaded: Vec<LoadedSource>,
    /// Inputs that could not be read, in declared order
    pub missing: Vec<PathBuf>,
}

/// Fold gathered inputs into a [`MergedOutput`] (PURE)
///
/// Imports are unioned by exact string equality. Each non-empty body becomes
/// one block, in input order; empty bodies contribute nothing.
///
/// The module name is `module` when given, otherwise the first module
/// declaration found among the inputs.
pub fn accumulate(
    group: &str,
    gathered: &GatheredInputs,
    module: Option<&str>,
) -> Result<MergedOutput> {
    let module = module
        .map(str::to_owned)
        .or_else(|| {
            gathered
                .loaded
                .iter()
                .find_map(|loaded| loaded.source.module.clone())
        })
        .ok_or_else(|| Error::ModuleUnknown {
            group: group.to_owned(),
        })?;

    let mut imports = ImportSet::new();
    let mut blocks = Vec::new();

    for loaded in &gathered.loaded {
        imports.extend(loaded.source.imports.iter().cloned());
        if !loaded.source.body.is_empty() {
            blocks.push(BodyBlock {
                source: loaded.path.clone(),
                lines: loaded.source.body.clone(),
            });
        }
    }

    Ok(MergedOutput {
        module,
        imports,
        blocks,
    })
}
