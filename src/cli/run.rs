use std::{
    env, fs,
    io::{self, Read},
    path::Path,
};

use anyhow::{Context, Result, bail};
use colored::Colorize;
use tracing::debug;

use super::{
    args::{Arguments, Command, RunCommand},
    exit_status::ExitStatus,
    report::{self, SUCCESS_MARK},
};
use crate::{
    config::{CONFIG_FILE_NAME, default_config_json, load_config},
    core::{Pipeline, ReportSource},
};

/// Dispatches to the command handler for the parsed arguments.
pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Run(cmd)) => run_command(&cmd),
        Some(Command::Init) => {
            init()?;
            println!("{} Created {}", SUCCESS_MARK.green(), CONFIG_FILE_NAME);
            Ok(ExitStatus::Success)
        }
        None => bail!("No command provided. Use --help to see available commands."),
    }
}

fn run_command(cmd: &RunCommand) -> Result<ExitStatus> {
    let cwd = env::current_dir().context("Failed to get current directory")?;
    let loaded = load_config(&cwd)?;
    let mut config = loaded.config;
    cmd.apply_overrides(&mut config);
    config.validate()?;

    debug!(
        project_root = ?loaded.project_root,
        from_file = loaded.from_file,
        "loaded configuration"
    );

    let source = match &cmd.report {
        Some(path) => ReportSource::Text(read_report(path)?),
        None => ReportSource::Linter,
    };

    let pipeline = Pipeline::new(&config, &loaded.project_root)?;
    let run_report = pipeline.run(source, cmd.dry_run)?;

    if cmd.json {
        report::print_lint_warning_to(run_report.lint_status.as_ref(), &mut io::stderr().lock());
        report::print_json(&run_report.summary)?;
    } else {
        report::print(&run_report, &loaded.project_root, cmd.verbose);
    }

    if cmd.check && run_report.summary.strings_skipped > 0 {
        Ok(ExitStatus::Failure)
    } else {
        Ok(ExitStatus::Success)
    }
}

fn read_report(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read lint report from stdin")?;
        return Ok(text);
    }

    fs::read_to_string(path).with_context(|| format!("Failed to read lint report: {:?}", path))
}

fn init() -> Result<()> {
    let config_path = Path::new(CONFIG_FILE_NAME);
    if config_path.exists() {
        bail!("{} already exists", CONFIG_FILE_NAME);
    }

    fs::write(config_path, default_config_json()?)?;
    Ok(())
}
