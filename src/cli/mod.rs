//! CLI Module
//!
//! Command-line front end for pa-tuner.

pub mod commands;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// pa-tuner - step Marlin linear advance (M900 K) per layer for calibration prints
#[derive(Parser, Debug)]
#[command(name = "pa-tuner")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the distinct layer heights found in a G-code file
    #[command(name = "heights")]
    Heights {
        /// G-code file to scan
        input: PathBuf,
    },

    /// Insert per-layer M900 commands
    #[command(name = "process")]
    Process(ProcessArgs),

    /// Compute the final K value from a measured test pattern
    #[command(name = "calc")]
    Calc {
        /// K value at the start layer
        #[arg(long, allow_hyphen_values = true)]
        start: String,

        /// K increment per layer
        #[arg(long, allow_hyphen_values = true)]
        step: String,

        /// Layers counted up from the start layer to the best-looking one
        #[arg(long, allow_hyphen_values = true)]
        measured: String,
    },
}

#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// G-code file to annotate
    pub input: PathBuf,

    /// Where to write the annotated G-code (omit to preview only)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// JSON preset with start/end/step/start_height/pause_at_start
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// First K value [default: 0.0]
    #[arg(long, allow_hyphen_values = true)]
    pub start: Option<String>,

    /// Last K value [default: 0.3]
    #[arg(long, allow_hyphen_values = true)]
    pub end: Option<String>,

    /// K increment per layer [default: 0.002]
    #[arg(long, allow_hyphen_values = true)]
    pub step: Option<String>,

    /// Layer height to start at (must be one listed by `heights`) [default: lowest]
    #[arg(long)]
    pub start_height: Option<String>,

    /// Insert an M0 pause at the start layer
    #[arg(long)]
    pub pause: bool,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_process() {
        let cli = Cli::try_parse_from([
            "pa-tuner", "process", "cube.gcode", "-o", "out.gcode", "--start", "0.01",
            "--step", "0.005", "--start-height", "0.4", "--pause",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Process(args)) => {
                assert_eq!(args.input, PathBuf::from("cube.gcode"));
                assert_eq!(args.output, Some(PathBuf::from("out.gcode")));
                assert_eq!(args.start.as_deref(), Some("0.01"));
                assert_eq!(args.end, None);
                assert_eq!(args.start_height.as_deref(), Some("0.4"));
                assert!(args.pause);
                assert!(!args.json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_calc_keeps_raw_text() {
        let cli = Cli::try_parse_from([
            "pa-tuner", "calc", "--start", "x", "--step", "0.002", "--measured", "15",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Calc { ref start, .. }) if start == "x"
        ));
    }
}
