//! pa-tuner - Linear Advance Calibration for Marlin
//!
//! Takes a sliced calibration print and inserts `M900 K` commands so that
//! every layer from a chosen height upward prints with a slightly higher K
//! value. After printing, the best-looking layer is measured and mapped back
//! to its K value with the calculator.
//!
//! # Architecture
//!
//! - `gcode`: height extraction, command insertion, file I/O
//! - `tuning`: validated settings and the K value calculator
//! - `app`: the session controller, driven through a `Host` front end
//! - `cli`: command-line front end

pub mod app;
pub mod cli;
pub mod error;
pub mod gcode;
pub mod tuning;

pub use error::{PaError, Result};
