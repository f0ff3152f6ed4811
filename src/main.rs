use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use connect_four::config::{AppConfig, Mode};
use connect_four::{logging, repl, ui};

/// Play Connect Four in the terminal.
#[derive(Parser)]
#[command(name = "connect_four", about = "Two-player Connect Four in the terminal")]
struct Cli {
    /// Front end to use (overrides the config file)
    #[arg(long, value_enum)]
    mode: Option<Mode>,

    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(mode) = cli.mode {
        config.ui.mode = mode;
    }

    let target = logging::init(&config.log, config.ui.mode).context("initialising logging")?;
    info!(
        config = %cli.config.display(),
        found = cli.config.exists(),
        mode = ?config.ui.mode,
        log = ?target,
        "starting connect four"
    );

    match config.ui.mode {
        Mode::Plain => {
            let stdin = io::stdin();
            repl::run(stdin.lock(), io::stdout().lock()).context("running plain game")?;
        }
        Mode::Tui => ui::run(config.ui.start_column).context("running terminal UI")?,
    }

    Ok(())
}
