//! pa-tuner CLI
//!
//! Command-line interface for the linear advance calibration tool.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::debug;

use pa_tuner::cli::commands;
use pa_tuner::cli::{Cli, Commands};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logger
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    debug!("pa-tuner v{}", env!("CARGO_PKG_VERSION"));

    let succeeded = match cli.command {
        Some(cmd) => handle_command(cmd)?,
        None => {
            println!("pa-tuner v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            true
        }
    };

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn handle_command(cmd: Commands) -> anyhow::Result<bool> {
    match cmd {
        Commands::Heights { input } => commands::show_heights(&input)
            .with_context(|| format!("failed to list heights in {}", input.display())),
        Commands::Process(args) => commands::process(&args)
            .with_context(|| format!("failed to process {}", args.input.display())),
        Commands::Calc {
            start,
            step,
            measured,
        } => Ok(commands::calc(&start, &step, &measured)?),
    }
}
