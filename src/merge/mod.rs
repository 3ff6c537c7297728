//! Merge engine for structured source files
//!
//! Three-phase pattern:
//! 1. Gather - read and normalize every input (effectful)
//! 2. Plan - fold the inputs into a `MergedOutput` (pure, testable)
//! 3. Execute - serialize and write atomically (effectful)

mod classify;
mod emit;
mod execute;
mod plan;
mod reader;

pub use classify::{Classifier, LineKind, ScanState};
pub use emit::{emit, write_output};
pub use execute::{GroupOutcome, MergeOptions, Merger, NoProgress, ProgressCallback};
pub use plan::{GatheredInputs, LoadedSource, accumulate};
pub use reader::{NormalizedSource, normalize, read_source, trim_blank_edges};
