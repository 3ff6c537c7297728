//! Reading and normalizing one input file

use crate::error::{Error, Result};
use crate::merge::classify::{Classifier, LineKind, ScanState};
use crate::types::ImportSet;
use std::fs;
use std::path::Path;
use tracing::debug;

/// One input file split into imports and body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedSource {
    /// Module name declared by the file, if it had a declaration
    pub module: Option<String>,
    /// Import entries found in the file
    pub imports: ImportSet,
    /// Body lines with leading and trailing blank lines removed
    pub body: Vec<String>,
}

/// Split source text into imports and a trimmed body (pure)
pub fn normalize(text: &str, classifier: &Classifier, comment_prefix: &str) -> NormalizedSource {
    let mut source = NormalizedSource::default();
    let mut state = ScanState::Header;

    for line in text.lines() {
        let (kind, next) = classifier.classify(line, state);
        match kind {
            LineKind::ModuleDeclaration(name) => source.module = Some(name.to_owned()),
            LineKind::ImportBlockOpen
            | LineKind::ImportBlockClose
            | LineKind::HeaderComment => {}
            LineKind::ImportBlockEntry(entry) => {
                add_import(&mut source.imports, entry, comment_prefix);
            }
            LineKind::SingleLineImport(entry) => {
                add_import(&mut source.imports, &entry, comment_prefix);
            }
            // Nothing reaches the body before the module declaration
            LineKind::Code | LineKind::Blank if source.module.is_none() => {}
            LineKind::Code | LineKind::Blank => source.body.push(line.trim_end().to_owned()),
        }
        state = next;
    }

    source.body = trim_blank_edges(source.body);
    source
}

/// Read `path` and normalize its contents
///
/// Any read failure (missing file, permissions, invalid UTF-8) is reported
/// as [`Error::InputNotFound`].
pub fn read_source(
    path: &Path,
    classifier: &Classifier,
    comment_prefix: &str,
) -> Result<NormalizedSource> {
    let text = fs::read_to_string(path).map_err(|source| Error::InputNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    let normalized = normalize(&text, classifier, comment_prefix);
    debug!(
        path = %path.display(),
        imports = normalized.imports.len(),
        body_lines = normalized.body.len(),
        "read source"
    );
    Ok(normalized)
}

/// Remove blank lines from both ends, keeping internal ones
pub fn trim_blank_edges(mut lines: Vec<String>) -> Vec<String> {
    let Some(first) = lines.iter().position(|l| !l.trim().is_empty()) else {
        return Vec::new();
    };
    // `first` exists, so a last non-blank line does too
    let last = lines.iter().rposition(|l| !l.trim().is_empty()).unwrap_or(first);
    lines.truncate(last + 1);
    lines.drain(..first);
    lines
}

fn add_import(imports: &mut ImportSet, entry: &str, comment_prefix: &str) {
    if entry.is_empty() || (!comment_prefix.is_empty() && entry.starts_with(comment_prefix)) {
        return;
    }
    imports.insert(entry.to_owned());
}
