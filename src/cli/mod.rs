use anyhow::Result;
use tracing_subscriber::EnvFilter;

pub mod args;
mod exit_status;
pub mod report;
mod run;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;

/// Environment variable holding a `tracing` filter, e.g. `AUTOTRANSLATE_LOG=debug`.
pub const LOG_ENV: &str = "AUTOTRANSLATE_LOG";

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    init_logging(args.verbose());
    run::run(args)
}

/// Diagnostic logging to stderr. User-facing output goes through `report`.
fn init_logging(verbose: bool) {
    let default_directive = if verbose {
        "autotranslate=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
