use std::{
    path::Path,
    process::{Command, Stdio},
};

use tracing::{debug, warn};

/// How the lint command ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LintStatus {
    Success,
    /// Non-zero exit. Linters usually exit this way when they found something.
    Failed { code: Option<i32> },
    /// The command could not be started at all.
    NotStarted { error: String },
}

/// Captured report of a lint run.
///
/// `text` is parsed the same way whatever the status is.
#[derive(Debug, Clone)]
pub struct LintOutput {
    pub status: LintStatus,
    pub text: String,
}

/// Run the lint command in `project_root`, capturing stdout and stderr.
pub fn run_linter(command: &[String], project_root: &Path) -> LintOutput {
    let Some((program, args)) = command.split_first() else {
        return LintOutput {
            status: LintStatus::NotStarted {
                error: "empty lint command".to_string(),
            },
            text: String::new(),
        };
    };

    debug!(program = %program, ?args, "running linter");

    let output = Command::new(program)
        .args(args)
        .current_dir(project_root)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output();

    match output {
        Ok(output) => {
            let mut text = String::from_utf8_lossy(&output.stdout).to_string();
            let stderr = String::from_utf8_lossy(&output.stderr);
            if !stderr.is_empty() {
                if !text.is_empty() && !text.ends_with('\n') {
                    text.push('\n');
                }
                text.push_str(&stderr);
            }

            let status = if output.status.success() {
                LintStatus::Success
            } else {
                debug!(code = ?output.status.code(), "linter exited with failure");
                LintStatus::Failed {
                    code: output.status.code(),
                }
            };
            LintOutput { status, text }
        }
        Err(err) => {
            warn!(program = %program, error = %err, "failed to start linter");
            let error = format!("Failed to run {}: {}", command.join(" "), err);
            LintOutput {
                status: LintStatus::NotStarted {
                    error: error.clone(),
                },
                text: error,
            }
        }
    }
}
