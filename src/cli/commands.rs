//! CLI Command Implementations
//!
//! Each command drives a [`Session`] through a [`ConsoleHost`]. Session
//! failures are already rendered to stderr, so commands report them as
//! `Ok(false)`; `Err` is reserved for problems outside the session.

use std::path::Path;

use log::info;

use crate::app::{ConsoleHost, Session};
use crate::cli::ProcessArgs;
use crate::error::Result;
use crate::gcode::HeightLabel;
use crate::tuning::{RawTuningInput, TuningPreset};

/// Print each distinct layer height on its own line.
pub fn show_heights(input: &Path) -> Result<bool> {
    info!("Scanning layer heights in: {}", input.display());

    let mut host = ConsoleHost::new(Some(input.to_path_buf()), None);
    let mut session = Session::new();

    match session.load_file(&mut host) {
        Some(heights) if heights.is_empty() => {
            println!("No layer heights found.");
            Ok(true)
        }
        Some(heights) => {
            for height in heights.iter() {
                println!("{}", HeightLabel(height));
            }
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Build the raw settings: defaults, then the preset, then explicit flags.
pub fn tuning_input(args: &ProcessArgs) -> Result<RawTuningInput> {
    let preset = match &args.config {
        Some(path) => TuningPreset::load(path)?,
        None => TuningPreset::default(),
    };

    let mut raw = RawTuningInput::from(&preset);
    if let Some(start) = &args.start {
        raw.start = start.clone();
    }
    if let Some(end) = &args.end {
        raw.end = end.clone();
    }
    if let Some(step) = &args.step {
        raw.step = step.clone();
    }
    if args.start_height.is_some() {
        raw.start_height = args.start_height.clone();
    }
    raw.pause_at_start |= args.pause;

    Ok(raw)
}

/// Annotate a file and print the per-layer summary.
pub fn process(args: &ProcessArgs) -> Result<bool> {
    info!("Processing: {}", args.input.display());

    let raw = tuning_input(args)?;
    let mut host = ConsoleHost::new(Some(args.input.clone()), args.output.clone()).quiet(args.json);
    let mut session = Session::new();

    if session.load_file(&mut host).is_none() {
        return Ok(false);
    }

    match session.process_layers(&mut host, &raw) {
        Some(report) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Compute `start + step * measured` and print it.
pub fn calc(start: &str, step: &str, measured: &str) -> Result<bool> {
    let mut host = ConsoleHost::default();
    let session = Session::new();
    Ok(session.calculate(&mut host, start, step, measured).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn args(input: PathBuf) -> ProcessArgs {
        ProcessArgs {
            input,
            output: None,
            config: None,
            start: None,
            end: None,
            step: None,
            start_height: None,
            pause: false,
            json: false,
        }
    }

    #[test]
    fn test_flags_override_preset() {
        let dir = tempdir().unwrap();
        let preset = dir.path().join("preset.json");
        fs::write(&preset, r#"{"start": 0.1, "end": 0.2, "pause_at_start": true}"#).unwrap();

        let mut process_args = args(dir.path().join("in.gcode"));
        process_args.config = Some(preset);
        process_args.end = Some("0.5".to_string());

        let raw = tuning_input(&process_args).unwrap();
        assert_eq!(raw.start, "0.1");
        assert_eq!(raw.end, "0.5");
        assert_eq!(raw.step, "0.002");
        assert_eq!(raw.start_height, None);
        assert!(raw.pause_at_start);
    }

    #[test]
    fn test_process_writes_output() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.gcode");
        let output = dir.path().join("out.gcode");
        fs::write(&input, "G1 Z0.2\nG1 Z0.4\n").unwrap();

        let mut process_args = args(input);
        process_args.output = Some(output.clone());
        process_args.json = true;

        assert!(process(&process_args).unwrap());
        assert_eq!(
            fs::read_to_string(output).unwrap(),
            "G1 Z0.2\nM900 K0.0000\nG1 Z0.4\nM900 K0.0020"
        );
    }

    #[test]
    fn test_process_missing_input() {
        let dir = tempdir().unwrap();
        assert!(!process(&args(dir.path().join("missing.gcode"))).unwrap());
    }

    #[test]
    fn test_calc() {
        assert!(calc("0.0", "0.002", "15").unwrap());
        assert!(!calc("0.0", "abc", "15").unwrap());
    }
}
