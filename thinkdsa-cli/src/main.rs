mod cli;
mod commands;
mod render;

use clap::Parser;
use cli::{Cli, Command};
use std::error::Error;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.quiet);
    debug!(command = ?cli.command, config = ?cli.config, "CLI arguments parsed");

    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Extension Error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, Box<dyn Error>> {
    let config_path = cli.config.as_deref();
    let code = match cli.command {
        Command::Hint(args) => commands::hint(config_path, args).await?,
        Command::Score { title, json } => commands::score(config_path, title.as_deref(), json)?,
        Command::Init { force } => commands::init(config_path, force)?,
    };
    info!("ThinkDSA finished");
    Ok(code)
}

fn init_tracing(quiet: bool) {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let filter = if quiet {
            EnvFilter::new("off")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
        };
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_level(true)
            .with_writer(std::io::stderr)
            .init();
    });
}
