//! Meeting Page Fixer: one-shot repair of the meeting scheduling page
//!
//! A table-column definition (the "Phone" column with its `tel:` link
//! renderer) was pasted into the request bodies of two `fetch` calls in
//! `src/pages/meeting/[jobId].tsx`. This crate removes it again.
//!
//! # Architecture
//!
//! Each broken call site has one [`SubstitutionRule`]: a multi-line regex
//! built from the expected source shape, with the call preamble captured
//! and the correct body re-emitted after it. [`FilePatcher`] reads the page,
//! applies both rules in order and overwrites the file.
//!
//! # Guarantees
//!
//! - Rules are applied unconditionally; no match is a silent no-op
//! - Re-running produces identical content
//! - Writes are atomic (tempfile + fsync + rename) and stay inside the workspace
//!
//! # Example
//!
//! ```no_run
//! use meeting_page_fixer::{FilePatcher, PatchOptions, SUCCESS_MESSAGE};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let report = FilePatcher::new(PatchOptions::default())?.run()?;
//! println!("{SUCCESS_MESSAGE}");
//! assert!(report.written);
//! # Ok(())
//! # }
//! ```

pub mod diff;
pub mod patcher;
pub mod rules;
pub mod safety;
pub mod shape;

// Re-exports
pub use diff::render_diff;
pub use patcher::{
    apply_rules, FilePatcher, PatchError, PatchOptions, PatchReport, RuleOutcome,
    DEFAULT_TARGET, SUCCESS_MESSAGE,
};
pub use rules::{builtin_rules, CallSite, RuleError, Substitution, SubstitutionRule};
pub use safety::{SafetyError, WorkspaceGuard};
pub use shape::shape_pattern;
