//! Tool session
//!
//! Holds the currently loaded document and turns user actions (load,
//! process, calculate) into calls on the G-code and tuning modules. Every
//! action ends in exactly one `render` on success or failure; errors never
//! escape to the caller.

use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Serialize;

use crate::app::host::{Host, Rendered};
use crate::error::{PaError, Result};
use crate::gcode::{annotate, read_document, write_document, HeightIndex, SourceDocument, SummaryEntry};
use crate::tuning::{calculate, RawTuningInput};

/// A document and the heights extracted from it. Always replaced together.
#[derive(Debug, Clone)]
struct LoadedDocument {
    path: PathBuf,
    document: SourceDocument,
    heights: HeightIndex,
}

/// Outcome of a successful processing run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessReport {
    /// Where the annotated file went; `None` if saving was cancelled
    pub output_path: Option<PathBuf>,
    /// Number of lines inserted (pause plus `M900` commands)
    pub inserted_lines: usize,
    pub summary: Vec<SummaryEntry>,
}

impl ProcessReport {
    /// Text shown to the user after processing.
    pub fn display_lines(&self) -> Vec<String> {
        let saved_to = self
            .output_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();

        let mut lines = Vec::with_capacity(self.summary.len() + 2);
        lines.push(format!("Modified G-code saved to: {}", saved_to));
        lines.push(String::new());
        lines.extend(self.summary.iter().map(|entry| entry.to_string()));
        lines
    }
}

#[derive(Debug, Default)]
pub struct Session {
    loaded: Option<LoadedDocument>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Heights of the loaded document, if any.
    pub fn heights(&self) -> Option<&HeightIndex> {
        self.loaded.as_ref().map(|l| &l.heights)
    }

    /// Path of the loaded document, if any.
    pub fn source_path(&self) -> Option<&Path> {
        self.loaded.as_ref().map(|l| l.path.as_path())
    }

    /// Ask the host for a file and load it, replacing the current document.
    ///
    /// Returns the new height list. A cancelled picker changes nothing; a
    /// failed load is rendered and keeps the previous document.
    pub fn load_file<H: Host + ?Sized>(&mut self, host: &mut H) -> Option<&HeightIndex> {
        let path = host.choose_open_path()?;

        match read_document(&path) {
            Ok((document, heights)) => {
                if heights.is_empty() {
                    warn!("No layer heights found in {}", path.display());
                }
                let loaded = self.loaded.insert(LoadedDocument {
                    path,
                    document,
                    heights,
                });
                Some(&loaded.heights)
            }
            Err(err) => {
                report_error(host, &err);
                None
            }
        }
    }

    /// Annotate the loaded document and save it wherever the host says.
    ///
    /// Nothing is written unless every input validates and annotation
    /// succeeds.
    pub fn process_layers<H: Host + ?Sized>(
        &self,
        host: &mut H,
        input: &RawTuningInput,
    ) -> Option<ProcessReport> {
        match self.try_process(host, input) {
            Ok(report) => {
                host.render(Rendered::Lines(report.display_lines()));
                Some(report)
            }
            Err(err) => {
                report_error(host, &err);
                None
            }
        }
    }

    fn try_process<H: Host + ?Sized>(
        &self,
        host: &mut H,
        input: &RawTuningInput,
    ) -> Result<ProcessReport> {
        let loaded = self.loaded.as_ref().ok_or(PaError::EmptyHeightIndex)?;
        let config = input.resolve(&loaded.heights)?;
        let annotated = annotate(loaded.document.lines(), &loaded.heights, &config)?;

        let output_path = host.choose_save_path();
        match &output_path {
            Some(path) => write_document(path, &annotated.lines)?,
            None => info!("Save cancelled; annotated G-code discarded"),
        }

        Ok(ProcessReport {
            output_path,
            inserted_lines: annotated.lines.len() - loaded.document.len(),
            summary: annotated.summary,
        })
    }

    /// Run the calculator on raw input and render `Result: <value>`.
    pub fn calculate<H: Host + ?Sized>(
        &self,
        host: &mut H,
        start: &str,
        step: &str,
        measured: &str,
    ) -> Option<f64> {
        match calculate(start, step, measured) {
            Ok(value) => {
                host.render(Rendered::Lines(vec![format!("Result: {:.4}", value)]));
                Some(value)
            }
            Err(err) => {
                warn!("Calculation failed: {}", err);
                host.render(Rendered::Error("Result: Invalid input".to_string()));
                None
            }
        }
    }
}

fn report_error<H: Host + ?Sized>(host: &mut H, err: &PaError) {
    warn!("{} ({})", err, err.error_code());
    host.render(Rendered::Error(err.friendly_message()));
}
