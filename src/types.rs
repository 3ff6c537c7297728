//! Core types for stitch

use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Unique import entries, iterated in lexicographic order
pub type ImportSet = BTreeSet<String>;

/// Tokens that drive line classification and emission
///
/// Defaults describe Go source files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Syntax {
    /// Keyword opening the module declaration (e.g. `package`)
    pub module_keyword: String,
    /// Keyword opening an import (e.g. `import`)
    pub import_keyword: String,
    /// Token following the import keyword to open a block
    pub block_open: String,
    /// Line that closes an import block
    pub block_close: String,
    /// Prefix of a line comment
    pub comment_prefix: String,
    /// Indentation written before each emitted import entry
    pub indent: String,
}

impl Default for Syntax {
    fn default() -> Self {
        Self {
            module_keyword: "package".to_owned(),
            import_keyword: "import".to_owned(),
            block_open: "(".to_owned(),
            block_close: ")".to_owned(),
            comment_prefix: "//".to_owned(),
            indent: "\t".to_owned(),
        }
    }
}

/// What to do when a declared input cannot be read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingPolicy {
    /// Warn and continue without the input
    #[default]
    Skip,
    /// Fail the whole group
    Fail,
}

impl std::fmt::Display for MissingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Skip => write!(f, "skip"),
            Self::Fail => write!(f, "fail"),
        }
    }
}

/// A named unit of work: several inputs merged into one output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeGroup {
    /// Group name (for reporting)
    pub name: String,
    /// Input files, in merge order
    pub inputs: Vec<PathBuf>,
    /// Output file
    pub output: PathBuf,
    /// Module name for the output; falls back to the run default
    pub module: Option<String>,
}

/// Trimmed body of one input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyBlock {
    /// File the block was read from
    pub source: PathBuf,
    /// Body lines, right-trimmed, without leading or trailing blank lines
    pub lines: Vec<String>,
}

/// The consolidated result of one merge group, before serialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedOutput {
    /// Module name written in the single module declaration
    pub module: String,
    /// Union of all import entries
    pub imports: ImportSet,
    /// One block per contributing input, in input order
    pub blocks: Vec<BodyBlock>,
}

/// Outcome of running one merge group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupReport {
    /// Group name
    pub name: String,
    /// Output path
    pub output: PathBuf,
    /// Number of inputs declared by the group
    pub inputs_declared: usize,
    /// Number of inputs successfully read
    pub inputs_read: usize,
    /// Inputs that could not be read
    pub missing: Vec<PathBuf>,
    /// Unique import entries in the output
    pub import_count: usize,
    /// Body blocks in the output
    pub block_count: usize,
    /// Whether the output file was written (false on dry run)
    pub written: bool,
}

impl std::fmt::Display for GroupReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: merged {}/{} files into {} ({} imports, {} blocks)",
            self.name,
            self.inputs_read,
            self.inputs_declared,
            self.output.display(),
            self.import_count,
            self.block_count
        )
    }
}
