//! Line classification - pure functions over (line, state)
//!
//! No grammar is involved: each line is matched against a handful of
//! patterns built from the configured [`Syntax`]. Anything unrecognized is
//! treated as code and kept verbatim.

use crate::error::{Error, Result};
use crate::types::Syntax;
use regex::Regex;

/// Where the scanner is inside one file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScanState {
    /// Only blank or comment lines seen so far; a module declaration is
    /// still possible
    #[default]
    Header,
    /// Past the header, outside any import block
    Body,
    /// Inside a delimited import block
    ImportBlock,
}

/// Block role of a single line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Module declaration, carrying the declared name
    ModuleDeclaration(&'a str),
    /// Opening line of an import block
    ImportBlockOpen,
    /// Closing line of an import block
    ImportBlockClose,
    /// Any line inside an import block, trimmed
    ImportBlockEntry(&'a str),
    /// Single-line import, carrying the normalized entry
    SingleLineImport(String),
    /// Comment line before the module declaration
    HeaderComment,
    /// Anything else that is not blank
    Code,
    /// Empty or whitespace-only line
    Blank,
}

/// Classifies lines according to a [`Syntax`]
#[derive(Debug, Clone)]
pub struct Classifier {
    module: Regex,
    block_open: Regex,
    single_import: Regex,
    block_close: String,
    comment_prefix: Option<String>,
}

impl Classifier {
    /// Build a classifier, compiling the patterns for `syntax`
    pub fn new(syntax: &Syntax) -> Result<Self> {
        for (key, token) in [
            ("module_keyword", &syntax.module_keyword),
            ("import_keyword", &syntax.import_keyword),
            ("block_open", &syntax.block_open),
            ("block_close", &syntax.block_close),
        ] {
            if token.trim().is_empty() {
                return Err(Error::Syntax(format!("{key} must not be empty")));
            }
        }

        let module_kw = regex::escape(syntax.module_keyword.trim());
        let import_kw = regex::escape(syntax.import_keyword.trim());
        let open = regex::escape(syntax.block_open.trim());
        let comment = syntax.comment_prefix.trim();
        let trailing = if comment.is_empty() {
            String::new()
        } else {
            format!(r"(?:{}.*)?", regex::escape(comment))
        };

        Ok(Self {
            module: compile(&format!(r"^{module_kw}\s+([^\s;]+)"))?,
            block_open: compile(&format!(r"^{import_kw}\s*{open}\s*{trailing}$"))?,
            single_import: compile(&format!(
                r#"^{import_kw}\s+(?:([A-Za-z_.][A-Za-z0-9_]*)\s+)?"([^"]+)""#
            ))?,
            block_close: syntax.block_close.trim().to_owned(),
            comment_prefix: (!comment.is_empty()).then(|| comment.to_owned()),
        })
    }

    /// Classify one line given the current state, returning the next state
    ///
    /// Never fails. A module declaration is only recognized in
    /// [`ScanState::Header`]. Blank and comment lines keep the header open
    /// (build constraints, package docs); any other line leaves it for good.
    pub fn classify<'a>(&self, line: &'a str, state: ScanState) -> (LineKind<'a>, ScanState) {
        let trimmed = line.trim();

        if state == ScanState::ImportBlock {
            if trimmed == self.block_close {
                return (LineKind::ImportBlockClose, ScanState::Body);
            }
            return (LineKind::ImportBlockEntry(trimmed), ScanState::ImportBlock);
        }

        if trimmed.is_empty() {
            return (LineKind::Blank, state);
        }

        if state == ScanState::Header {
            if let Some(name) = self.module.captures(trimmed).and_then(|c| c.get(1)) {
                return (LineKind::ModuleDeclaration(name.as_str()), ScanState::Body);
            }
            if self
                .comment_prefix
                .as_deref()
                .is_some_and(|prefix| trimmed.starts_with(prefix))
            {
                return (LineKind::HeaderComment, ScanState::Header);
            }
        }

        if self.block_open.is_match(trimmed) {
            return (LineKind::ImportBlockOpen, ScanState::ImportBlock);
        }

        if let Some(caps) = self.single_import.captures(trimmed) {
            let path = &caps[2];
            let entry = match caps.get(1) {
                Some(alias) => format!("{} \"{path}\"", alias.as_str()),
                None => format!("\"{path}\""),
            };
            return (LineKind::SingleLineImport(entry), ScanState::Body);
        }

        (LineKind::Code, ScanState::Body)
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| Error::Syntax(format!("bad pattern {pattern:?}: {e}")))
}
