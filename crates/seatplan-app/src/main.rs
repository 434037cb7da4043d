//! Command-line entry point.

use clap::Parser;
use seatplan_app::{App, AppConfig, ShortcutRegistry};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "seatplan", about = "Replay a floor-plan editing session and save the result")]
struct Cli {
    /// Session script (JSON).
    #[arg(required_unless_present = "shortcuts")]
    script: Option<PathBuf>,

    /// Editor config file (JSON).
    #[arg(long, env = "SEATPLAN_CONFIG")]
    config: Option<PathBuf>,

    /// Directory plans are saved to.
    #[arg(long, env = "SEATPLAN_OUT")]
    out: Option<PathBuf>,

    /// Name the plan is saved under.
    #[arg(long, default_value = "default")]
    name: String,

    /// Background color of the final frame (hex, e.g. "#f0f0f0").
    #[arg(long)]
    background: Option<String>,

    /// Leave the grid out of the final frame.
    #[arg(long)]
    no_grid: bool,

    /// Print the keyboard shortcuts and exit.
    #[arg(long)]
    shortcuts: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    if cli.shortcuts {
        println!("{}", ShortcutRegistry::help_text());
        return ExitCode::SUCCESS;
    }
    let Some(script) = cli.script else {
        log::error!("No session script given");
        return ExitCode::FAILURE;
    };

    let config = AppConfig {
        script,
        config: cli.config,
        out: cli.out,
        name: cli.name,
        background: cli.background,
        grid: !cli.no_grid,
    };
    log::info!("Replaying {}", config.script.display());
    match App::run(&config) {
        Ok(summary) => {
            println!("{}", summary.describe());
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
