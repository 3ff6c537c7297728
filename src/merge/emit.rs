//! Serializing a merged output and writing it to disk

use crate::error::{Error, Result};
use crate::types::{MergedOutput, Syntax};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Serialize a merged output to text (PURE)
///
/// Layout: module declaration, import block (omitted when there are no
/// imports), then the body blocks. Sections and blocks are separated by one
/// blank line and the text ends with a single newline.
pub fn emit(output: &MergedOutput, syntax: &Syntax) -> String {
    let mut sections = Vec::with_capacity(output.blocks.len() + 2);
    sections.push(format!("{} {}", syntax.module_keyword.trim(), output.module));

    if !output.imports.is_empty() {
        let mut block = format!(
            "{} {}\n",
            syntax.import_keyword.trim(),
            syntax.block_open.trim()
        );
        for entry in &output.imports {
            block.push_str(&syntax.indent);
            block.push_str(entry);
            block.push('\n');
        }
        block.push_str(syntax.block_close.trim());
        sections.push(block);
    }

    sections.extend(output.blocks.iter().map(|b| b.lines.join("\n")));

    let mut text = sections.join("\n\n");
    text.push('\n');
    text
}

/// Write `contents` to `path` atomically
///
/// The text goes to a temporary file next to `path` which is then renamed
/// over it. If anything fails the temporary file is removed and `path` is
/// left as it was.
pub fn write_output(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let to_err = |source: std::io::Error| Error::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(to_err)?;
    tmp.write_all(contents.as_bytes()).map_err(to_err)?;
    tmp.flush().map_err(to_err)?;
    tmp.as_file().sync_all().map_err(to_err)?;
    tmp.persist(path).map_err(|e| to_err(e.error))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BodyBlock, ImportSet};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn block(lines: &[&str]) -> BodyBlock {
        BodyBlock {
            source: PathBuf::from("in.go"),
            lines: lines.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    fn output(imports: &[&str], blocks: Vec<BodyBlock>) -> MergedOutput {
        MergedOutput {
            module: "eventbus".to_string(),
            imports: imports.iter().map(|s| (*s).to_string()).collect::<ImportSet>(),
            blocks,
        }
    }

    #[test]
    fn test_emit_full_layout() {
        let merged = output(
            &["\"y\"", "\"x\""],
            vec![block(&["func F(){}"]), block(&["func G(){}", "", "var v = 1"])],
        );
        let text = emit(&merged, &Syntax::default());

        assert_eq!(
            text,
            "package eventbus\n\nimport (\n\t\"x\"\n\t\"y\"\n)\n\nfunc F(){}\n\nfunc G(){}\n\nvar v = 1\n"
        );
    }

    #[test]
    fn test_emit_without_imports() {
        let merged = output(&[], vec![block(&["func F(){}"])]);
        insta::assert_snapshot!(emit(&merged, &Syntax::default()), @r"
        package eventbus

        func F(){}
        ");
    }

    #[test]
    fn test_emit_nothing_but_module() {
        let merged = output(&[], vec![]);
        assert_eq!(emit(&merged, &Syntax::default()), "package eventbus\n");
    }

    #[test]
    fn test_emit_uses_configured_indent() {
        let syntax = Syntax {
            indent: "    ".to_string(),
            ..Syntax::default()
        };
        let text = emit(&output(&["\"fmt\""], vec![]), &syntax);
        assert_eq!(text, "package eventbus\n\nimport (\n    \"fmt\"\n)\n");
    }

    #[test]
    fn test_write_output_replaces_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.go");
        fs::write(&path, "old").unwrap();

        write_output(&path, "new\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
        // Only the output remains; the temporary file was renamed
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_output_missing_parent() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("no").join("such").join("out.go");

        match write_output(&path, "x") {
            Err(Error::OutputWrite { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("Expected OutputWrite error, got: {other:?}"),
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_write_output_over_directory_leaves_it_untouched() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("taken");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep.txt"), "keep").unwrap();

        assert!(write_output(&path, "x").is_err());
        assert_eq!(fs::read_to_string(path.join("keep.txt")).unwrap(), "keep");
        // No stray temporary file next to the directory
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
    }
}
