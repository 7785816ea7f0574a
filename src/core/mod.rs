//! Rewrite engine.
//!
//! - `index`: reverse lookup from translated text to key path
//! - `diagnostics`: lint report parsing and per-file grouping
//! - `rewrite`: locating a reported string and replacing it
//! - `scope`: hook import and binding insertion
//! - `source_file`: line buffer of a file being rewritten
//! - `linter`: running the external linter
//! - `pipeline`: a complete run over a report

pub mod diagnostics;
pub mod index;
pub mod linter;
pub mod pipeline;
pub mod rewrite;
pub mod scope;
pub mod source_file;

pub use diagnostics::{IssuesByFile, LintIssue, ReportLine, ReportParser, group_by_file};
pub use index::TranslationIndex;
pub use linter::{LintOutput, LintStatus, run_linter};
pub use pipeline::{
    AppliedReplacement, FileChange, Pipeline, ReportSource, RunReport, RunSummary, SkipReason,
    SkippedIssue, run,
};
pub use rewrite::{LineRewriter, Replacement, locate_line, rewrite_line};
pub use scope::{Augmentation, ScopeAugmenter};
pub use source_file::SourceFile;
