//! stitch - merge structured source files into one
//!
//! Each input declares a module, an import section and a body. The merged
//! file gets a single module declaration, the deduplicated union of all
//! imports, and every body in input order.
//!
//! ```no_run
//! use stitch::merge::{MergeOptions, Merger, NoProgress};
//! use stitch::types::MergeGroup;
//!
//! # fn main() -> stitch::error::Result<()> {
//! let merger = Merger::new(MergeOptions::default())?;
//! let group = MergeGroup {
//!     name: "nats".to_string(),
//!     inputs: vec!["nats_unit_test.go".into(), "nats_persistence_test.go".into()],
//!     output: "nats_test.go".into(),
//!     module: Some("eventbus".to_string()),
//! };
//! let report = merger.run_group(&group, &NoProgress)?;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod coverage;
pub mod error;
pub mod merge;
pub mod types;
