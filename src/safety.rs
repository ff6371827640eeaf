//! Workspace containment for the rewritten page.
//!
//! The target is resolved through symlinks, then must sit under the
//! workspace root and outside generated or tool-owned directories.

use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Directories inside a web workspace that are generated or tool-owned.
static GENERATED_DIRS: [&str; 3] = ["node_modules", ".next", ".git"];

#[derive(Error, Debug)]
pub enum SafetyError {
    #[error("{path} resolves outside workspace {root}")]
    Escape { path: PathBuf, root: PathBuf },

    #[error("{path} is inside generated directory '{dir}'")]
    GeneratedDir { path: PathBuf, dir: &'static str },

    #[error("Failed to resolve {path}: {source}")]
    Resolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Canonical workspace root that rewrites must stay inside.
#[derive(Debug, Clone)]
pub struct WorkspaceGuard {
    root: PathBuf,
}

fn resolve(path: &Path) -> Result<PathBuf, SafetyError> {
    path.canonicalize().map_err(|source| SafetyError::Resolve {
        path: path.to_path_buf(),
        source,
    })
}

impl WorkspaceGuard {
    pub fn new(root: impl AsRef<Path>) -> Result<Self, SafetyError> {
        Ok(Self {
            root: resolve(root.as_ref())?,
        })
    }

    /// Resolve a workspace-relative path and confirm it may be rewritten.
    ///
    /// Returns the resolved absolute path.
    pub fn validate_path(&self, relative: impl AsRef<Path>) -> Result<PathBuf, SafetyError> {
        let resolved = resolve(&self.root.join(relative))?;

        let inner = resolved
            .strip_prefix(&self.root)
            .map_err(|_| SafetyError::Escape {
                path: resolved.clone(),
                root: self.root.clone(),
            })?;

        let generated = inner.components().find_map(|component| match component {
            Component::Normal(name) => GENERATED_DIRS
                .iter()
                .find(|dir| name == **dir)
                .copied(),
            _ => None,
        });
        if let Some(dir) = generated {
            return Err(SafetyError::GeneratedDir {
                path: resolved.clone(),
                dir,
            });
        }

        Ok(resolved)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
