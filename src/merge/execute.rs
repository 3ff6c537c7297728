//! Merge execution - effectful operations
//!
//! Reads the inputs of a group, folds them with the pure planning code,
//! serializes the result and writes it. Groups share no state, so several
//! of them can run on a thread pool.

use crate::error::{Error, Result};
use crate::merge::classify::Classifier;
use crate::merge::emit::{emit, write_output};
use crate::merge::plan::{GatheredInputs, LoadedSource, accumulate};
use crate::merge::reader::read_source;
use crate::types::{GroupReport, MergeGroup, MissingPolicy, Syntax};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Receives progress events while groups run
pub trait ProgressCallback: Send + Sync {
    /// An input of `group` could not be read and was skipped
    fn on_missing_input(&self, group: &str, path: &Path);
}

/// Progress sink that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_missing_input(&self, _group: &str, _path: &Path) {}
}

/// Settings shared by every group of a run
#[derive(Debug, Clone, Default)]
pub struct MergeOptions {
    /// Syntax tokens for classification and emission
    pub syntax: Syntax,
    /// Module name used when a group does not set its own
    pub default_module: Option<String>,
    /// How to treat unreadable inputs
    pub on_missing: MissingPolicy,
    /// Compute everything but leave outputs untouched
    pub dry_run: bool,
}

/// Result of one group in a multi-group run
#[derive(Debug)]
pub struct GroupOutcome {
    /// Group name
    pub name: String,
    /// Report on success, or the error that stopped this group
    pub result: Result<GroupReport>,
}

/// Runs merge groups with a fixed set of options
#[derive(Debug, Clone)]
pub struct Merger {
    options: MergeOptions,
    classifier: Classifier,
}

impl Merger {
    /// Create a merger, compiling the syntax patterns once
    pub fn new(options: MergeOptions) -> Result<Self> {
        let classifier = Classifier::new(&options.syntax)?;
        Ok(Self {
            options,
            classifier,
        })
    }

    /// Options this merger was built with
    pub const fn options(&self) -> &MergeOptions {
        &self.options
    }

    /// Read every input of a group, in order
    ///
    /// With [`MissingPolicy::Skip`], unreadable inputs are logged, reported
    /// through `progress` and recorded in [`GatheredInputs::missing`]. With
    /// [`MissingPolicy::Fail`] the first one aborts the group.
    pub fn gather(
        &self,
        group: &str,
        paths: &[PathBuf],
        progress: &dyn ProgressCallback,
    ) -> Result<GatheredInputs> {
        let mut gathered = GatheredInputs::default();

        for path in paths {
            match read_source(path, &self.classifier, &self.options.syntax.comment_prefix) {
                Ok(source) => gathered.loaded.push(LoadedSource {
                    path: path.clone(),
                    source,
                }),
                Err(Error::InputNotFound { path, source })
                    if self.options.on_missing == MissingPolicy::Skip =>
                {
                    warn!(group, path = %path.display(), error = %source, "input not found, skipping");
                    progress.on_missing_input(group, &path);
                    gathered.missing.push(path);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(gathered)
    }

    /// Merge one group and write its output (unless dry run)
    pub fn run_group(
        &self,
        group: &MergeGroup,
        progress: &dyn ProgressCallback,
    ) -> Result<GroupReport> {
        debug!(group = %group.name, inputs = group.inputs.len(), "merging group");

        let gathered = self.gather(&group.name, &group.inputs, progress)?;
        let module = group
            .module
            .as_deref()
            .or(self.options.default_module.as_deref());
        let merged = accumulate(&group.name, &gathered, module)?;
        let text = emit(&merged, &self.options.syntax);

        if !self.options.dry_run {
            write_output(&group.output, &text)?;
            debug!(group = %group.name, output = %group.output.display(), bytes = text.len(), "wrote output");
        }

        Ok(GroupReport {
            name: group.name.clone(),
            output: group.output.clone(),
            inputs_declared: group.inputs.len(),
            inputs_read: gathered.loaded.len(),
            missing: gathered.missing,
            import_count: merged.imports.len(),
            block_count: merged.blocks.len(),
            written: !self.options.dry_run,
        })
    }

    /// Run several groups, returning outcomes in the order given
    ///
    /// A failing group does not stop the others. With `parallel`, groups are
    /// spread over the rayon thread pool.
    pub fn run_groups(
        &self,
        groups: &[MergeGroup],
        parallel: bool,
        progress: &dyn ProgressCallback,
    ) -> Vec<GroupOutcome> {
        let run = |group: &MergeGroup| GroupOutcome {
            name: group.name.clone(),
            result: self.run_group(group, progress),
        };

        if parallel {
            groups.par_iter().map(run).collect()
        } else {
            groups.iter().map(run).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingProgress {
        missing: Mutex<Vec<(String, PathBuf)>>,
    }

    impl ProgressCallback for RecordingProgress {
        fn on_missing_input(&self, group: &str, path: &Path) {
            self.missing
                .lock()
                .unwrap()
                .push((group.to_string(), path.to_path_buf()));
        }
    }

    fn group(dir: &Path, name: &str, inputs: &[&str]) -> MergeGroup {
        MergeGroup {
            name: name.to_string(),
            inputs: inputs.iter().map(|i| dir.join(i)).collect(),
            output: dir.join(format!("{name}_merged.go")),
            module: None,
        }
    }

    #[test]
    fn test_gather_skips_missing_and_reports() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.go"), "package p\nvar a = 1\n").unwrap();
        let merger = Merger::new(MergeOptions::default()).unwrap();
        let progress = RecordingProgress::default();

        let paths = vec![temp.path().join("a.go"), temp.path().join("gone.go")];
        let gathered = merger.gather("g", &paths, &progress).unwrap();

        assert_eq!(gathered.loaded.len(), 1);
        assert_eq!(gathered.missing, vec![temp.path().join("gone.go")]);
        let recorded = progress.missing.lock().unwrap();
        assert_eq!(recorded.as_slice(), &[("g".to_string(), temp.path().join("gone.go"))]);
    }

    #[test]
    fn test_gather_fail_policy() {
        let temp = TempDir::new().unwrap();
        let merger = Merger::new(MergeOptions {
            on_missing: MissingPolicy::Fail,
            ..MergeOptions::default()
        })
        .unwrap();

        let result = merger.gather("g", &[temp.path().join("gone.go")], &NoProgress);
        assert!(matches!(result, Err(Error::InputNotFound { .. })));
    }

    #[test]
    fn test_run_group_dry_run_writes_nothing() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.go"), "package p\nimport \"fmt\"\nvar a = 1\n").unwrap();
        let merger = Merger::new(MergeOptions {
            dry_run: true,
            ..MergeOptions::default()
        })
        .unwrap();

        let g = group(temp.path(), "dry", &["a.go"]);
        let report = merger.run_group(&g, &NoProgress).unwrap();

        assert!(!report.written);
        assert_eq!(report.import_count, 1);
        assert_eq!(report.block_count, 1);
        assert!(!g.output.exists());
    }

    #[test]
    fn test_run_group_uses_default_module() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.go"), "package p\nvar a = 1\n").unwrap();
        let merger = Merger::new(MergeOptions {
            default_module: Some("fallback".to_string()),
            ..MergeOptions::default()
        })
        .unwrap();

        let g = group(temp.path(), "m", &["a.go"]);
        merger.run_group(&g, &NoProgress).unwrap();

        assert_eq!(
            fs::read_to_string(&g.output).unwrap(),
            "package fallback\n\nvar a = 1\n"
        );
    }

    #[test]
    fn test_run_groups_isolates_failures() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.go"), "package p\nvar a = 1\n").unwrap();
        let merger = Merger::new(MergeOptions::default()).unwrap();

        let mut broken = group(temp.path(), "broken", &["a.go"]);
        broken.output = temp.path().join("missing-dir").join("out.go");
        let ok = group(temp.path(), "ok", &["a.go"]);

        for parallel in [false, true] {
            let outcomes = merger.run_groups(&[broken.clone(), ok.clone()], parallel, &NoProgress);
            assert_eq!(outcomes.len(), 2);
            assert_eq!(outcomes[0].name, "broken");
            assert!(matches!(outcomes[0].result, Err(Error::OutputWrite { .. })));
            assert_eq!(outcomes[1].name, "ok");
            assert!(outcomes[1].result.is_ok());
        }
    }
}
