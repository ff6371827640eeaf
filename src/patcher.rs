//! File patcher: read the meeting page, apply the repair rules, write it back.
//!
//! Both rules always run, in order, on the output of the previous one. The
//! file is rewritten even when nothing matched; a second run is a no-op on
//! content.

use crate::rules::{builtin_rules, CallSite, RuleError, SubstitutionRule};
use crate::safety::{SafetyError, WorkspaceGuard};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Workspace-relative path of the page carrying the broken fetch calls.
pub const DEFAULT_TARGET: &str = "src/pages/meeting/[jobId].tsx";

/// Line printed after every successful run, whether or not anything changed.
pub const SUCCESS_MESSAGE: &str = "Fixed the syntax errors in the meeting file";

#[derive(Error, Debug)]
pub enum PatchError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Safety(#[from] SafetyError),

    #[error(transparent)]
    Rule(#[from] RuleError),
}

/// Runtime options for a patch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOptions {
    /// Directory the target path is resolved against
    pub workspace: PathBuf,
    /// Compute the result without touching the file
    pub dry_run: bool,
}

impl Default for PatchOptions {
    fn default() -> Self {
        Self {
            workspace: PathBuf::from("."),
            dry_run: false,
        }
    }
}

/// How many spans a single rule replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleOutcome {
    pub call_site: CallSite,
    pub matches: usize,
}

/// Result of a patch run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "PatchReport describes what the run did"]
pub struct PatchReport {
    pub file: PathBuf,
    pub original: String,
    pub patched: String,
    pub outcomes: Vec<RuleOutcome>,
    /// False for dry runs
    pub written: bool,
}

impl PatchReport {
    pub fn changed(&self) -> bool {
        self.original != self.patched
    }

    pub fn total_matches(&self) -> usize {
        self.outcomes.iter().map(|o| o.matches).sum()
    }
}

/// Apply `rules` in order, each to the output of the previous one.
pub fn apply_rules(content: &str, rules: &[SubstitutionRule]) -> (String, Vec<RuleOutcome>) {
    let mut current = content.to_string();
    let mut outcomes = Vec::with_capacity(rules.len());

    for rule in rules {
        let substitution = rule.apply(&current);
        outcomes.push(RuleOutcome {
            call_site: rule.call_site(),
            matches: substitution.matches,
        });
        current = substitution.content;
    }

    (current, outcomes)
}

/// Rewrites the meeting page in place using the built-in rules.
#[derive(Debug, Clone)]
pub struct FilePatcher {
    options: PatchOptions,
    rules: Vec<SubstitutionRule>,
}

impl FilePatcher {
    pub fn new(options: PatchOptions) -> Result<Self, PatchError> {
        Ok(Self {
            options,
            rules: builtin_rules()?,
        })
    }

    pub fn target_path(&self) -> PathBuf {
        self.options.workspace.join(DEFAULT_TARGET)
    }

    /// Read, substitute, and (unless dry-running) overwrite the target.
    pub fn run(&self) -> Result<PatchReport, PatchError> {
        let file = self.target_path();
        let original = fs::read_to_string(&file).map_err(|source| PatchError::Read {
            path: file.clone(),
            source,
        })?;

        let (patched, outcomes) = apply_rules(&original, &self.rules);

        if !self.options.dry_run {
            let guard = WorkspaceGuard::new(&self.options.workspace)?;
            let canonical = guard.validate_path(DEFAULT_TARGET)?;
            atomic_write(&canonical, patched.as_bytes()).map_err(|source| {
                PatchError::Write {
                    path: file.clone(),
                    source,
                }
            })?;
        }

        Ok(PatchReport {
            file,
            original,
            patched,
            outcomes,
            written: !self.options.dry_run,
        })
    }
}

/// Atomic file write: tempfile + fsync + rename, keeping the original permissions.
fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    // Same directory keeps the rename on one filesystem
    let parent = path.parent().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "Path has no parent directory",
        )
    })?;
    let permissions = fs::metadata(path)?.permissions();

    // A rename only needs directory access; the target itself must accept writes
    fs::OpenOptions::new().write(true).open(path)?;

    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    temp.write_all(content)?;
    temp.as_file().set_permissions(permissions)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;

    Ok(())
}
