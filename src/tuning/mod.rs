//! Tuning Module
//!
//! Calibration settings and the K value calculator.

pub mod calculator;
pub mod config;

pub use calculator::{advance_for, calculate};
pub use config::{
    parse_param, RawTuningInput, TuningConfig, TuningPreset, DEFAULT_END, DEFAULT_START,
    DEFAULT_STEP,
};
