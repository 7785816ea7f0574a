//! A full rewrite run.
//!
//! ```text
//! locale JSON ──► TranslationIndex
//! lint report ──► ReportParser ──► group_by_file
//!                                        │
//!                 per file (descending line order)
//!                   LineRewriter ──► ScopeAugmenter ──► write back
//! ```
//!
//! Only a missing or invalid dictionary (or a failed write) aborts the run.
//! Everything else is recorded as a skipped issue.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::{
    diagnostics::{LintIssue, ReportParser, group_by_file},
    index::TranslationIndex,
    linter::{LintStatus, run_linter},
    rewrite::{LineRewriter, Replacement},
    scope::{Augmentation, ScopeAugmenter},
    source_file::SourceFile,
};
use crate::config::Config;

/// Where the lint report comes from.
#[derive(Debug, Clone)]
pub enum ReportSource {
    /// Run the configured lint command.
    Linter,
    /// A report that was already captured.
    Text(String),
}

/// Aggregate counts of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub files_modified: usize,
    pub strings_replaced: usize,
    pub strings_skipped: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No translation key has this exact value.
    NoKey,
    /// The string is no longer anywhere in the file.
    NotFound,
    /// The reported file does not exist.
    MissingFile,
    /// The reported file exists but could not be read as UTF-8 text.
    Unreadable,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoKey => write!(f, "no translation key for this text"),
            SkipReason::NotFound => write!(f, "text not found in file"),
            SkipReason::MissingFile => write!(f, "file does not exist"),
            SkipReason::Unreadable => write!(f, "file could not be read"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SkippedIssue {
    pub issue: LintIssue,
    pub reason: SkipReason,
}

#[derive(Debug, Clone)]
pub struct AppliedReplacement {
    pub issue: LintIssue,
    pub key: String,
    pub replacement: Replacement,
}

/// Everything that happened to one changed file.
#[derive(Debug, Clone)]
pub struct FileChange {
    pub path: PathBuf,
    pub replacements: Vec<AppliedReplacement>,
    pub augmentation: Augmentation,
}

#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub summary: RunSummary,
    pub changes: Vec<FileChange>,
    pub skipped: Vec<SkippedIssue>,
    /// `None` when the report was supplied instead of produced by the linter.
    pub lint_status: Option<LintStatus>,
    pub indexed_strings: usize,
    pub dry_run: bool,
}

impl RunReport {
    fn skip(&mut self, issue: LintIssue, reason: SkipReason) {
        debug!(file = ?issue.file, line = issue.line, string = %issue.string, %reason, "skipped");
        self.summary.strings_skipped += 1;
        self.skipped.push(SkippedIssue { issue, reason });
    }
}

/// The per-run state: dictionary index and the compiled text patterns.
#[derive(Debug)]
pub struct Pipeline {
    project_root: PathBuf,
    lint_command: Vec<String>,
    index: TranslationIndex,
    parser: ReportParser,
    rewriter: LineRewriter,
    augmenter: ScopeAugmenter,
}

impl Pipeline {
    /// Build a pipeline, loading the primary locale dictionary.
    ///
    /// Fails if the dictionary cannot be read or parsed.
    pub fn new(config: &Config, project_root: &Path) -> Result<Self> {
        let messages_file = config.primary_messages_file(project_root);
        let index = TranslationIndex::load(&messages_file)?;
        debug!(file = ?messages_file, strings = index.len(), "indexed primary locale");

        Self::with_index(config, project_root, index)
    }

    pub fn with_index(
        config: &Config,
        project_root: &Path,
        index: TranslationIndex,
    ) -> Result<Self> {
        Ok(Self {
            project_root: project_root.to_path_buf(),
            lint_command: config.lint_command.clone(),
            index,
            parser: ReportParser::new(config, project_root)?,
            rewriter: LineRewriter::new(&config.translate_fn, config.search_radius),
            augmenter: ScopeAugmenter::new(config)?,
        })
    }

    pub fn run(&self, source: ReportSource, dry_run: bool) -> Result<RunReport> {
        let (text, lint_status) = match source {
            ReportSource::Linter => {
                let output = run_linter(&self.lint_command, &self.project_root);
                (output.text, Some(output.status))
            }
            ReportSource::Text(text) => (text, None),
        };

        let mut report = self.process_report(&text, dry_run)?;
        report.lint_status = lint_status;
        Ok(report)
    }

    /// Parse a lint report and rewrite every file it mentions.
    pub fn process_report(&self, text: &str, dry_run: bool) -> Result<RunReport> {
        let issues = self.parser.parse(text);
        info!(issues = issues.len(), "parsed lint report");

        let mut report = RunReport {
            indexed_strings: self.index.len(),
            dry_run,
            ..Default::default()
        };

        for (path, file_issues) in group_by_file(issues) {
            self.process_file(&path, file_issues, dry_run, &mut report)?;
        }

        Ok(report)
    }

    fn process_file(
        &self,
        path: &Path,
        mut issues: Vec<LintIssue>,
        dry_run: bool,
        report: &mut RunReport,
    ) -> Result<()> {
        if !path.is_file() {
            for issue in issues {
                report.skip(issue, SkipReason::MissingFile);
            }
            return Ok(());
        }

        let mut file = match SourceFile::read(path) {
            Ok(file) => file,
            Err(err) => {
                warn!(file = ?path, "skipping unreadable file: {:#}", err);
                for issue in issues {
                    report.skip(issue, SkipReason::Unreadable);
                }
                return Ok(());
            }
        };

        // Bottom-up, so an edit never moves a line that is still to be processed.
        issues.sort_by(|a, b| b.line.cmp(&a.line));

        let mut replacements = Vec::new();
        for issue in issues {
            let Some(key) = self.index.lookup(&issue.string) else {
                report.skip(issue, SkipReason::NoKey);
                continue;
            };
            match self
                .rewriter
                .replace(&mut file.lines, issue.line, &issue.string, key)
            {
                Some(replacement) => {
                    debug!(file = ?path, line = replacement.line_index + 1, key, "replaced");
                    replacements.push(AppliedReplacement {
                        key: key.to_string(),
                        issue,
                        replacement,
                    });
                }
                None => report.skip(issue, SkipReason::NotFound),
            }
        }

        if replacements.is_empty() {
            return Ok(());
        }

        file.mark_changed();
        let augmentation = self.augmenter.augment(&mut file.lines);
        if !dry_run {
            file.flush()?;
        }

        report.summary.files_modified += 1;
        report.summary.strings_replaced += replacements.len();
        report.changes.push(FileChange {
            path: path.to_path_buf(),
            replacements,
            augmentation,
        });

        Ok(())
    }
}

/// Load the dictionary, obtain the report and rewrite the files it mentions.
pub fn run(
    config: &Config,
    project_root: &Path,
    source: ReportSource,
    dry_run: bool,
) -> Result<RunReport> {
    Pipeline::new(config, project_root)?.run(source, dry_run)
}
