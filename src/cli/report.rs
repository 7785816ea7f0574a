//! Report formatting and printing utilities.
//!
//! Output is cargo-style: a clickable `--> path:line` location followed by
//! the affected source line. Kept separate from the pipeline so the engine
//! can be used as a library without printing anything.

use std::{
    io::{self, Write},
    path::Path,
};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::core::{FileChange, LintStatus, RunReport, RunSummary, SkippedIssue};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print the whole run report to stdout (warnings go to stderr).
pub fn print(report: &RunReport, project_root: &Path, verbose: bool) {
    print_lint_warning_to(report.lint_status.as_ref(), &mut io::stderr().lock());
    print_to(report, project_root, verbose, &mut io::stdout().lock());
}

/// Print the run report to a custom writer.
pub fn print_to<W: Write>(report: &RunReport, project_root: &Path, verbose: bool, writer: &mut W) {
    // A dry run is only useful if it shows what would change.
    if report.dry_run || verbose {
        for change in &report.changes {
            print_change(change, project_root, writer);
        }
    }

    if verbose && !report.skipped.is_empty() {
        print_skipped(&report.skipped, project_root, writer);
    }

    print_summary_to(&report.summary, report.dry_run, writer);
}

/// Print the summary counts as JSON.
pub fn print_json(summary: &RunSummary) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}

pub fn print_lint_warning_to<W: Write>(status: Option<&LintStatus>, writer: &mut W) {
    if let Some(LintStatus::NotStarted { error }) = status {
        let _ = writeln!(writer, "{} {}", "warning:".bold().yellow(), error);
    }
}

pub fn print_summary_to<W: Write>(summary: &RunSummary, dry_run: bool, writer: &mut W) {
    if summary.strings_replaced == 0 && summary.strings_skipped == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            "No hardcoded strings to replace".green()
        );
        return;
    }

    if summary.strings_replaced > 0 {
        let verb = if dry_run {
            "Would replace".yellow().bold()
        } else {
            "Replaced".green().bold()
        };
        let _ = writeln!(
            writer,
            "{} {} string(s) in {} file(s).",
            verb, summary.strings_replaced, summary.files_modified
        );
    }

    if summary.strings_skipped > 0 {
        let _ = writeln!(
            writer,
            "{} Skipped {} string(s) (use {} for details).",
            FAILURE_MARK.red(),
            summary.strings_skipped,
            "-v".cyan()
        );
    }

    if dry_run && summary.strings_replaced > 0 {
        let _ = writeln!(writer, "Run without {} to apply.", "--dry-run".cyan());
    }
}

fn print_change<W: Write>(change: &FileChange, project_root: &Path, writer: &mut W) {
    let file_path = display_path(&change.path, project_root);
    let max_line_width = change
        .replacements
        .iter()
        .map(|applied| (applied.replacement.line_index + 1).to_string().len())
        .max()
        .unwrap_or(1);

    for applied in &change.replacements {
        let replacement = &applied.replacement;
        let line = replacement.line_index + 1;

        let _ = writeln!(writer, "  {} {}:{}", "-->".blue(), file_path, line);
        let _ = writeln!(
            writer,
            "{:>width$} {}",
            "",
            "|".blue(),
            width = max_line_width
        );
        let _ = writeln!(
            writer,
            "{:>width$} {} {}",
            "-".red(),
            "|".blue(),
            replacement.before.red(),
            width = max_line_width
        );
        let _ = writeln!(
            writer,
            "{:>width$} {} {}",
            "+".green(),
            "|".blue(),
            replacement.after.green(),
            width = max_line_width
        );

        // Caret under the first changed character.
        let prefix = common_prefix(&replacement.before, &replacement.after);
        let caret_padding = UnicodeWidthStr::width(prefix);
        let _ = writeln!(
            writer,
            "{:>width$} {} {:>padding$}{} {}",
            "",
            "|".blue(),
            "",
            "^".green(),
            applied.key.dimmed().cyan(),
            width = max_line_width,
            padding = caret_padding
        );
        let _ = writeln!(writer);
    }

    if change.augmentation.import_added {
        let _ = writeln!(writer, "  {} {}: hook import", "+".green().bold(), file_path);
    }
    if change.augmentation.binding_added {
        let _ = writeln!(writer, "  {} {}: hook binding", "+".green().bold(), file_path);
    }
    if change.augmentation.import_added || change.augmentation.binding_added {
        let _ = writeln!(writer);
    }
}

fn print_skipped<W: Write>(skipped: &[SkippedIssue], project_root: &Path, writer: &mut W) {
    for skip in skipped {
        let issue = &skip.issue;
        let _ = writeln!(
            writer,
            "{}: \"{}\"",
            "skipped".bold().yellow(),
            issue.string
        );
        let _ = writeln!(
            writer,
            "  {} {}:{}",
            "-->".blue(),
            display_path(&issue.file, project_root),
            issue.line
        );
        let _ = writeln!(writer, "   {} {}", "=".blue(), skip.reason);
        let _ = writeln!(writer);
    }
}

fn display_path(path: &Path, project_root: &Path) -> String {
    path.strip_prefix(project_root)
        .unwrap_or(path)
        .display()
        .to_string()
}

fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let end = a
        .char_indices()
        .zip(b.chars())
        .find(|((_, ca), cb)| ca != cb)
        .map(|((index, _), _)| index)
        .unwrap_or_else(|| a.len().min(b.len()));
    &a[..end]
}
