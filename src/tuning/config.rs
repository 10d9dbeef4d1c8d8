//! Tuning configuration
//!
//! Values arrive as untrusted text (form fields, command-line flags) and are
//! only turned into a [`TuningConfig`] once every field parses and the start
//! height is one of the detected layers.

use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{PaError, Result};
use crate::gcode::HeightIndex;

/// Default first K value.
pub const DEFAULT_START: f64 = 0.0;
/// Default last K value.
pub const DEFAULT_END: f64 = 0.3;
/// Default K increment per layer.
pub const DEFAULT_STEP: f64 = 0.002;

/// Parse one numeric field typed by the user.
///
/// Surrounding whitespace is ignored. Empty, non-numeric, and non-finite
/// values are rejected as `InvalidParameter`; `inf` and `nan` parse as
/// floats but are refused here.
pub fn parse_param(name: &str, raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PaError::invalid(name, "value is empty"));
    }

    let value: f64 = trimmed
        .parse()
        .map_err(|_| PaError::invalid(name, format!("'{}' is not a number", trimmed)))?;

    if !value.is_finite() {
        return Err(PaError::invalid(name, format!("'{}' is not finite", trimmed)));
    }

    Ok(value)
}

/// Validated calibration settings for one processing run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TuningConfig {
    /// First K value emitted
    pub start: f64,
    /// Emission stops once the running value exceeds this
    pub end: f64,
    /// Increment applied after every emitted command
    pub step: f64,
    /// Layer at which emission begins; must be a detected height
    pub start_height: f64,
    /// Insert a one-time pause at the start layer
    pub pause_at_start: bool,
}

impl TuningConfig {
    pub fn new(start: f64, end: f64, step: f64, start_height: f64, pause_at_start: bool) -> Self {
        TuningConfig {
            start,
            end,
            step,
            start_height,
            pause_at_start,
        }
    }
}

/// Preset file contents. Every field is optional; missing ones fall back to
/// the defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TuningPreset {
    pub start: Option<f64>,
    pub end: Option<f64>,
    pub step: Option<f64>,
    pub start_height: Option<f64>,
    pub pause_at_start: Option<bool>,
}

impl TuningPreset {
    /// Load a preset from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PaError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let text = fs::read_to_string(path).map_err(|source| PaError::FileReadError {
            path: path.to_path_buf(),
            source,
        })?;
        let preset: TuningPreset = serde_json::from_str(&text)?;

        info!("Loaded tuning preset from {}", path.display());
        Ok(preset)
    }
}

/// Settings exactly as the user entered them.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTuningInput {
    pub start: String,
    pub end: String,
    pub step: String,
    /// `None` selects the lowest detected height
    pub start_height: Option<String>,
    pub pause_at_start: bool,
}

impl Default for RawTuningInput {
    fn default() -> Self {
        Self::from(&TuningPreset::default())
    }
}

impl From<&TuningPreset> for RawTuningInput {
    fn from(preset: &TuningPreset) -> Self {
        RawTuningInput {
            start: preset.start.unwrap_or(DEFAULT_START).to_string(),
            end: preset.end.unwrap_or(DEFAULT_END).to_string(),
            step: preset.step.unwrap_or(DEFAULT_STEP).to_string(),
            start_height: preset.start_height.map(|h| h.to_string()),
            pause_at_start: preset.pause_at_start.unwrap_or(false),
        }
    }
}

impl RawTuningInput {
    /// Validate against the loaded heights.
    ///
    /// # Errors
    /// * `EmptyHeightIndex` - no heights have been loaded
    /// * `InvalidParameter` - a field is not numeric, or the start height is
    ///   not one of `heights`
    pub fn resolve(&self, heights: &HeightIndex) -> Result<TuningConfig> {
        let first = heights.first().ok_or(PaError::EmptyHeightIndex)?;

        let start = parse_param("start", &self.start)?;
        let end = parse_param("end", &self.end)?;
        let step = parse_param("step", &self.step)?;

        let start_height = match &self.start_height {
            Some(raw) => {
                let height = parse_param("start_height", raw)?;
                if !heights.contains(height) {
                    return Err(PaError::invalid(
                        "start_height",
                        format!("{} is not one of the detected layer heights", height),
                    ));
                }
                height
            }
            None => first,
        };

        let config = TuningConfig::new(start, end, step, start_height, self.pause_at_start);
        debug!("Resolved tuning config: {:?}", config);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn heights() -> HeightIndex {
        HeightIndex::from_values([0.2, 0.4, 0.6])
    }

    #[test]
    fn test_parse_param() {
        assert_eq!(parse_param("start", " 0.05 ").unwrap(), 0.05);
        assert_eq!(parse_param("start", "1e-3").unwrap(), 0.001);
        assert_eq!(parse_param("start", "-2").unwrap(), -2.0);

        for bad in ["", "   ", "x", "0.1.2", "inf", "NaN"] {
            let err = parse_param("start", bad).unwrap_err();
            assert_eq!(err.error_code(), "INVALID_PARAMETER", "input {:?}", bad);
        }
    }

    #[test]
    fn test_defaults() {
        let raw = RawTuningInput::default();
        let config = raw.resolve(&heights()).unwrap();
        assert_eq!(config.start, DEFAULT_START);
        assert_eq!(config.end, DEFAULT_END);
        assert_eq!(config.step, DEFAULT_STEP);
        assert_eq!(config.start_height, 0.2);
        assert!(!config.pause_at_start);
    }

    #[test]
    fn test_resolve_start_height() {
        let raw = RawTuningInput {
            start_height: Some("0.4".to_string()),
            ..Default::default()
        };
        assert_eq!(raw.resolve(&heights()).unwrap().start_height, 0.4);

        let raw = RawTuningInput {
            start_height: Some("0.5".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            raw.resolve(&heights()),
            Err(PaError::InvalidParameter { ref name, .. }) if name == "start_height"
        ));
    }

    #[test]
    fn test_resolve_rejects_bad_fields() {
        let raw = RawTuningInput {
            step: "fast".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            raw.resolve(&heights()),
            Err(PaError::InvalidParameter { ref name, .. }) if name == "step"
        ));
    }

    #[test]
    fn test_resolve_without_heights() {
        let raw = RawTuningInput::default();
        assert!(matches!(
            raw.resolve(&HeightIndex::default()),
            Err(PaError::EmptyHeightIndex)
        ));
    }

    #[test]
    fn test_preset_roundtrip_through_raw() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"start": 0.02, "step": 0.005, "pause_at_start": true}}"#).unwrap();

        let preset = TuningPreset::load(file.path()).unwrap();
        let raw = RawTuningInput::from(&preset);
        let config = raw.resolve(&heights()).unwrap();

        assert_eq!(config.start, 0.02);
        assert_eq!(config.end, DEFAULT_END);
        assert_eq!(config.step, 0.005);
        assert!(config.pause_at_start);
    }

    #[test]
    fn test_preset_rejects_unknown_fields() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"strat": 0.02}}"#).unwrap();
        assert!(matches!(TuningPreset::load(file.path()), Err(PaError::Serialization(_))));
    }

    #[test]
    fn test_preset_missing_file() {
        let err = TuningPreset::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_NOT_FOUND");
    }
}
