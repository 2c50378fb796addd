//! Command-line runtime for the `tsdetect` binary.
//!
//! Splits the arguments into configuration flags and command flags, loads the
//! layered configuration, installs logging, and runs the bundled detector.
//! Detector findings never fail the process: a missing test list and a
//! non-zero detector exit both end in success. Configuration, usage, and run
//! errors are written to stderr and end in failure.

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use tsdetect_runner::{
    ArtifactSource, EmbeddedArtifact, RunConfig, RunPlan, Runner, StructuredRunReporter,
    install_signal_cleanup,
};

mod cli;
mod config;
mod errors;
pub mod telemetry;

use cli::Cli;
use config::{ConfigLoader, OrthoConfigLoader, split_config_arguments};
pub(crate) use errors::AppError;

/// Runs the CLI using the provided arguments and IO handles.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    run_with_loader(args, stdout, stderr, &OrthoConfigLoader, EmbeddedArtifact::new())
}

/// Runs the CLI with a substitute configuration loader and detector source.
pub(crate) fn run_with_loader<I, W, E, L, A>(
    args: I,
    stdout: &mut W,
    stderr: &mut E,
    loader: &L,
    artifact: A,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
    L: ConfigLoader,
    A: ArtifactSource,
{
    let args: Vec<OsString> = args.into_iter().collect();
    let split = split_config_arguments(&args);

    let cli = match Cli::try_parse_from(&split.command_arguments) {
        Ok(cli) => cli,
        // --help and --version arrive as errors that belong on stdout.
        Err(error) if !error.use_stderr() => {
            drop(write!(stdout, "{}", error.render()));
            return ExitCode::SUCCESS;
        }
        Err(error) => return report_failure(stderr, &AppError::CliUsage(error)),
    };

    let result = loader
        .load(&split.config_arguments)
        .and_then(|config| execute(&cli, &config, artifact, stdout));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => report_failure(stderr, &error),
    }
}

fn execute<W, A>(
    cli: &Cli,
    config: &tsdetect_config::Config,
    artifact: A,
    stdout: &mut W,
) -> Result<(), AppError>
where
    W: Write,
    A: ArtifactSource,
{
    telemetry::initialise(config)?;

    let run_config = RunConfig::new(config.manifest_path());
    let runner = Runner::new(artifact, StructuredRunReporter::new());

    if cli.dry_run {
        let plan = runner.plan(&run_config)?;
        return write_plan(stdout, &plan).map_err(AppError::WritePlan);
    }

    install_signal_cleanup()?;
    // A skipped run and a failing detector are both reported by the runner.
    runner.run(&run_config)?;
    Ok(())
}

fn write_plan<W: Write>(stdout: &mut W, plan: &RunPlan) -> std::io::Result<()> {
    let presence = if plan.manifest_present {
        "present"
    } else {
        "missing"
    };
    let detector = if plan.tool_available {
        "bundled"
    } else {
        "not bundled"
    };
    writeln!(stdout, "test list: {} ({presence})", plan.manifest.display())?;
    writeln!(stdout, "detector: {detector}")?;
    writeln!(stdout, "command: {}", plan.invocation)?;
    stdout.flush()
}

fn report_failure<E: Write>(stderr: &mut E, error: &AppError) -> ExitCode {
    drop(writeln!(stderr, "{error}"));
    ExitCode::FAILURE
}
