mod cli;

use modeswitch::command::HELP_TEXT;
use modeswitch::config::Config;
use modeswitch::driver::{self, RunOptions, RunSummary};
use modeswitch::modeset::ModeSet;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::Path;

/// Initialize stderr logging.
///
/// RUST_LOG takes precedence over the configured filter.
fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn handle_interactive(config: &Config) -> Result<RunSummary> {
    let stdin = io::stdin();
    let options = RunOptions {
        interactive: stdin.is_terminal(),
        strict: false,
    };
    let mut set = ModeSet::new();
    driver::run(&mut set, config, stdin.lock(), &mut io::stdout(), options)
}

fn handle_run(config: &Config, script: &Path, strict: bool) -> Result<RunSummary> {
    let file =
        File::open(script).with_context(|| format!("Failed to open {}", script.display()))?;
    let options = RunOptions {
        interactive: false,
        strict,
    };
    let mut set = ModeSet::new();
    driver::run(
        &mut set,
        config,
        BufReader::new(file),
        &mut io::stdout(),
        options,
    )
}

fn handle_exec(config: &Config, commands: &[String]) -> Result<RunSummary> {
    let script = commands.join("\n");
    let mut set = ModeSet::new();
    driver::run(
        &mut set,
        config,
        script.as_bytes(),
        &mut io::stdout(),
        RunOptions::default(),
    )
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    init_logging(&config);
    tracing::debug!(?config, "modeswitch starting");

    // Failed lines in an interactive session were already reported.
    let (summary, scripted) = match cli.command {
        None => (handle_interactive(&config)?, false),
        Some(Commands::Run { script, strict }) => (handle_run(&config, &script, strict)?, true),
        Some(Commands::Exec { commands }) => (handle_exec(&config, &commands)?, true),
        Some(Commands::Commands) => {
            println!("{}", HELP_TEXT);
            return Ok(());
        }
    };

    tracing::info!(
        executed = summary.executed,
        failed = summary.failed,
        "modeswitch finished"
    );

    if scripted && summary.failed > 0 {
        std::process::exit(1);
    }

    Ok(())
}
