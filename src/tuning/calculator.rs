//! K value calculator
//!
//! Maps the layer a user picked off a printed test pattern back to the K
//! value that was active there: `start + step * measured`.

use crate::error::Result;
use crate::tuning::config::parse_param;

/// Final K value for a measured layer count.
#[inline]
pub fn advance_for(start: f64, step: f64, measured: f64) -> f64 {
    start + step * measured
}

/// Same as [`advance_for`], from raw user input.
///
/// # Errors
/// * `InvalidParameter` - any of the three inputs is not a finite number
pub fn calculate(start: &str, step: &str, measured: &str) -> Result<f64> {
    let start = parse_param("start", start)?;
    let step = parse_param("step", step)?;
    let measured = parse_param("measured", measured)?;
    Ok(advance_for(start, step, measured))
}
