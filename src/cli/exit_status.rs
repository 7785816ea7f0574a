use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): Run completed
/// - `Failure` (1): Run completed but `--check` found skipped strings
/// - `Error` (2): Run failed (missing dictionary, invalid config, I/O error)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
