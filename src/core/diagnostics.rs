//! Parsing of the hardcoded-string linter's text report.
//!
//! The report is free text. Two kinds of lines carry information:
//!
//! ```text
//! src/components/Button.tsx
//!   15: Hardcoded string: "Click me"
//!   20: Hardcoded string: 'Submit'
//! ```
//!
//! A file header names a path under the source root; every issue line after
//! it belongs to that file until the next header. Everything else (banners,
//! success marks, blank lines) is ignored.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::Result;
use regex::Regex;

use crate::config::Config;

/// A hardcoded string reported by the linter.
///
/// `line` comes from the linter and may be stale by the time the file is
/// rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintIssue {
    pub file: PathBuf,
    pub line: usize,
    pub string: String,
}

/// Issues grouped by file, in the order files first appear in the report.
pub type IssuesByFile = Vec<(PathBuf, Vec<LintIssue>)>;

/// Classification of a single report line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportLine {
    /// Path of the file the following issues belong to, as written in the report.
    FileHeader(String),
    Issue { line: usize, string: String },
    Other,
}

#[derive(Debug)]
pub struct ReportParser {
    project_root: PathBuf,
    header_regex: Regex,
    issue_regex: Regex,
}

impl ReportParser {
    pub fn new(config: &Config, project_root: &Path) -> Result<Self> {
        let source_root = config
            .source_root
            .trim()
            .trim_start_matches("./")
            .trim_end_matches('/');
        let extensions = config
            .extensions
            .iter()
            .map(|ext| regex::escape(ext.trim_start_matches('.')))
            .collect::<Vec<_>>()
            .join("|");

        let header_regex = Regex::new(&format!(
            r"(?:^|\s)((?:\./)?{}/\S*?\.(?:{}))\s*:?$",
            regex::escape(source_root),
            extensions
        ))?;
        let issue_regex = Regex::new(&format!(
            r"^\s+(\d+):\s*{}\s*(.*?)\s*$",
            regex::escape(config.issue_marker.trim())
        ))?;

        Ok(Self {
            project_root: project_root.to_path_buf(),
            header_regex,
            issue_regex,
        })
    }

    pub fn classify_line(&self, line: &str) -> ReportLine {
        if let Some(caps) = self.issue_regex.captures(line)
            && let Ok(line_number) = caps[1].parse::<usize>()
        {
            return ReportLine::Issue {
                line: line_number,
                string: strip_matching_quotes(&caps[2]).to_string(),
            };
        }

        if let Some(caps) = self.header_regex.captures(line.trim()) {
            return ReportLine::FileHeader(caps[1].to_string());
        }

        ReportLine::Other
    }

    /// Parse a whole report into issues, in report order.
    pub fn parse(&self, report: &str) -> Vec<LintIssue> {
        let mut current_file: Option<PathBuf> = None;
        let mut issues = Vec::new();

        for raw in report.lines() {
            match self.classify_line(raw) {
                ReportLine::FileHeader(path) => {
                    current_file = Some(self.resolve(&path));
                }
                ReportLine::Issue { line, string } => {
                    // Issues before the first header have no file to go to.
                    if let Some(file) = &current_file {
                        issues.push(LintIssue {
                            file: file.clone(),
                            line,
                            string,
                        });
                    }
                }
                ReportLine::Other => {}
            }
        }

        issues
    }

    fn resolve(&self, header_path: &str) -> PathBuf {
        self.project_root
            .join(header_path.trim_start_matches("./"))
    }
}

/// Strips one matching pair of `"` or `'` around the text.
fn strip_matching_quotes(text: &str) -> &str {
    let bytes = text.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if first == last && (first == b'"' || first == b'\'') {
            return &text[1..text.len() - 1];
        }
    }
    text
}

/// Group issues by file, keeping their relative order inside each file.
pub fn group_by_file(issues: Vec<LintIssue>) -> IssuesByFile {
    let mut grouped: IssuesByFile = Vec::new();
    let mut positions: HashMap<PathBuf, usize> = HashMap::new();

    for issue in issues {
        match positions.get(&issue.file) {
            Some(&pos) => grouped[pos].1.push(issue),
            None => {
                positions.insert(issue.file.clone(), grouped.len());
                grouped.push((issue.file.clone(), vec![issue]));
            }
        }
    }

    grouped
}
