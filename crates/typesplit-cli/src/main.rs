use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use typesplit_core::{Config, OutputTarget, Pipeline, Result, TypesplitError, WriteOutcome};

mod args;
use args::{Cli, Shell};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(parse_failure_code(&e));
        }
    };

    init_tracing(cli.verbose);

    if let Some(shell) = cli.completions {
        handle_completions(shell);
        return ExitCode::SUCCESS;
    }

    let result = match &cli.init_config {
        Some(path) => handle_init_config(path),
        None => handle_run(&cli),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            report_error(&e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

/// Exit code for a clap parse failure; --help and --version also arrive here
fn parse_failure_code(e: &clap::Error) -> u8 {
    if !e.use_stderr() {
        return 0;
    }
    let err = TypesplitError::InvalidArguments {
        message: e.to_string(),
    };
    err.exit_code() as u8
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let shell = match shell {
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Zsh => clap_complete::Shell::Zsh,
        Shell::Fish => clap_complete::Shell::Fish,
        Shell::PowerShell => clap_complete::Shell::PowerShell,
        Shell::Elvish => clap_complete::Shell::Elvish,
    };
    generate(shell, &mut cmd, "typesplit", &mut io::stdout());
}

fn handle_init_config(path: &Path) -> Result<u8> {
    let existed = path.exists();
    let path = Config::init(path)?;
    if existed {
        println!("{} {}", "Config already exists:".yellow(), path.display());
    } else {
        println!("{} {}", "Config written:".green(), path.display());
    }
    Ok(0)
}

/// Returns the process exit code of a completed run
fn handle_run(cli: &Cli) -> Result<u8> {
    let config = Config::discover(cli.config.as_deref())?;
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let options = config.to_run_options(cli.overrides(), cwd);
    debug!(?options, files = cli.files.len(), "resolved run options");
    let pipeline = Pipeline::new(options);

    let verbose = cli.verbose;
    let on_write = |target: &OutputTarget, result: &Result<WriteOutcome>| match result {
        Ok(WriteOutcome::Written { lines }) if verbose => {
            println!(
                "  {} {} ({} values)",
                "[OK]".green(),
                target.path.display(),
                lines
            );
        }
        Ok(WriteOutcome::Skipped) if verbose => {
            println!(
                "  {} {} (no {} values)",
                "[SKIP]".yellow(),
                target.path.display(),
                target.category
            );
        }
        Ok(_) => {}
        Err(e) => report_error(e),
    };

    let report = pipeline.run(&cli.files, Some(&on_write))?;

    for failure in &report.read_failures {
        report_error(failure);
    }

    for line in &report.stats {
        println!("{}", line);
    }

    if verbose {
        println!();
        println!("Summary:");
        println!("  Integers: {}", report.partition.integers.len());
        println!("  Floats: {}", report.partition.floats.len());
        println!("  Strings: {}", report.partition.strings.len());
    }

    Ok(report.exit_code() as u8)
}

fn report_error(e: &TypesplitError) {
    eprintln!("{} {}", "[ERROR]".red().bold(), e);
}
