//! Layer annotation
//!
//! Rewrites a loaded document so that, from the chosen start layer upward,
//! every height-bearing line is followed by an `M900 K<value>` command with
//! the value stepping up each time, until it passes the configured end.
//!
//! # Stepping
//!
//! The running value is global to the walk. A layer with several
//! height-bearing lines receives one command per line, each with the next
//! value. The summary is computed separately, one entry per distinct layer,
//! so for such files it will not line up one to one with the inserted
//! commands.

use std::fmt;

use log::{debug, info};
use serde::Serialize;

use crate::error::{PaError, Result};
use crate::gcode::extract::{detect_height, HeightIndex, HeightLabel};
use crate::tuning::TuningConfig;

/// Marlin "wait for user" line inserted once at the start layer.
pub const PAUSE_MARKER: &str = "M0 Click to continue";

/// Marlin linear advance command for a K value, always 4 decimals.
pub fn format_advance(value: f64) -> String {
    format!("M900 K{:.4}", value)
}

/// One line of the per-layer report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryEntry {
    pub height: f64,
    pub value: f64,
    pub is_pause: bool,
}

impl fmt::Display for SummaryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Z Height: {} - PA Value: {:.4}",
            HeightLabel(self.height),
            self.value
        )?;
        if self.is_pause {
            write!(f, " (Pause)")?;
        }
        Ok(())
    }
}

/// Output of [`annotate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotatedDocument {
    pub lines: Vec<String>,
    pub summary: Vec<SummaryEntry>,
    inserted_advances: usize,
}

impl AnnotatedDocument {
    /// Number of `M900` lines that were inserted. Commands already present
    /// in the source are not counted.
    pub fn advance_commands(&self) -> usize {
        self.inserted_advances
    }
}

fn check_finite(name: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PaError::invalid(name, format!("{} is not a finite number", value)))
    }
}

/// Insert pause and linear advance commands into `lines`.
///
/// Every original line is kept, in order. `step` is not validated: a zero
/// step repeats `start` on every qualifying line, a negative one never
/// passes `end`. Both stay bounded by the document length.
///
/// # Errors
/// * `EmptyHeightIndex` - `heights` is empty
/// * `InvalidParameter` - a value is not finite, or `start_height` is not
///   in `heights`
pub fn annotate(
    lines: &[String],
    heights: &HeightIndex,
    config: &TuningConfig,
) -> Result<AnnotatedDocument> {
    if heights.is_empty() {
        return Err(PaError::EmptyHeightIndex);
    }

    check_finite("start", config.start)?;
    check_finite("end", config.end)?;
    check_finite("step", config.step)?;

    let z_index = heights.position(config.start_height).ok_or_else(|| {
        PaError::invalid(
            "start_height",
            format!(
                "{} is not one of the detected layer heights",
                HeightLabel(config.start_height)
            ),
        )
    })?;

    let mut output = Vec::with_capacity(lines.len() + heights.len() - z_index + 1);
    let mut current = config.start;
    let mut pause_emitted = false;
    let mut inserted_advances = 0;

    for line in lines {
        output.push(line.clone());

        let layer_index = match detect_height(line).and_then(|z| heights.position(z)) {
            Some(index) if index >= z_index => index,
            _ => continue,
        };

        if config.pause_at_start && layer_index == z_index && !pause_emitted {
            output.push(PAUSE_MARKER.to_string());
            pause_emitted = true;
        }

        if current <= config.end {
            output.push(format_advance(current));
            inserted_advances += 1;
            current += config.step;
        }
    }

    let summary = summarize(heights, z_index, config);

    info!(
        "Annotated {} lines from Z{}: {} commands inserted",
        lines.len(),
        HeightLabel(config.start_height),
        output.len() - lines.len()
    );
    debug!("Summary covers {} layers", summary.len());

    Ok(AnnotatedDocument {
        lines: output,
        summary,
        inserted_advances,
    })
}

/// One entry per layer from `z_index` upward while the value stays within
/// `end`, with its own counter starting back at `start`.
fn summarize(heights: &HeightIndex, z_index: usize, config: &TuningConfig) -> Vec<SummaryEntry> {
    let mut summary = Vec::new();
    let mut current = config.start;

    for height in heights.iter().skip(z_index) {
        if current > config.end {
            break;
        }
        summary.push(SummaryEntry {
            height,
            value: current,
            is_pause: config.pause_at_start && height == config.start_height,
        });
        current += config.step;
    }

    summary
}
