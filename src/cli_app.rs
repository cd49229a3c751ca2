//! Top-level CLI definition and dispatch.

use std::io;
use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell as CompletionShell, generate};
use colored::Colorize;
use colored::control;

use paperstat::core::config::{BackendMode, Config};
use paperstat::core::errors::Result;
use paperstat::runner::{self, RunOutcome};
use paperstat::telemetry::collector::{Collector, reported_hostname};

/// paperstat — host telemetry on a 2.13" e-paper panel.
#[derive(Debug, Parser)]
#[command(
    name = "paperstat",
    author,
    version,
    about = "Host telemetry on an e-paper panel, or a PNG preview without one",
    long_about = None,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Override config file path.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Force JSON output mode.
    #[arg(long, global = true)]
    json: bool,
    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
    /// Force the file-preview backend regardless of host name.
    #[arg(long, global = true)]
    mock: bool,
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Collect telemetry, render a frame, and present it.
    Show,
    /// Print collected telemetry values without rendering.
    Status,
    /// Print the effective configuration as TOML.
    Config,
    /// Generate shell completions.
    Completions(CompletionsArgs),
}

#[derive(Debug, Clone, Args)]
struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum)]
    shell: CompletionShell,
}

/// Dispatch the parsed CLI.
pub fn run(cli: &Cli) -> Result<()> {
    if cli.no_color {
        control::set_override(false);
    }
    let config = Config::load(cli.config.as_deref())?;

    match &cli.command {
        Command::Show => run_show(cli, &config),
        Command::Status => run_status(cli, &config),
        Command::Config => {
            println!("{}", config.to_toml()?);
            Ok(())
        }
        Command::Completions(args) => {
            generate(args.shell, &mut Cli::command(), "paperstat", &mut io::stdout());
            Ok(())
        }
    }
}

/// Backend mode is a pure function of the reported host name, with the
/// `--mock` flag as an explicit development override.
fn resolve_mode(cli: &Cli, config: &Config) -> Result<BackendMode> {
    if cli.mock {
        return Ok(BackendMode::Mock);
    }
    Ok(BackendMode::resolve(&reported_hostname()?, &config.device))
}

fn run_show(cli: &Cli, config: &Config) -> Result<()> {
    match runner::run_with_mode(resolve_mode(cli, config)?, config)? {
        RunOutcome::Presented => Ok(()),
        RunOutcome::Interrupted => {
            // Clean interrupt: short confirmation, no diagnostics.
            println!();
            println!("OK");
            Ok(())
        }
    }
}

fn run_status(cli: &Cli, config: &Config) -> Result<()> {
    let mode = resolve_mode(cli, config)?;
    let readings = Collector::new(mode, config).collect()?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&readings)?);
        return Ok(());
    }

    let rows = [
        ("host", &readings.hostname),
        ("ip", &readings.ip),
        ("wifi", &readings.wifi),
        ("time", &readings.time),
        ("mem", &readings.memory),
        ("disk", &readings.disk),
        ("temp", &readings.temperature),
        ("up", &readings.uptime),
    ];
    for (name, value) in rows {
        println!("{:>5}  {value}", name.bold());
    }
    Ok(())
}
