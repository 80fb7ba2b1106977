// Units and rounding helpers shared by the calculators
use super::error::CalcError;

/// Measurement unit of a vibration reading, as far as severity ladders care.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VibrationUnit {
    /// Acceleration, reported as "G"
    Acceleration,
    /// Velocity, reported as "mm/s"
    Velocity,
}

impl VibrationUnit {
    /// Anything that is not exactly "G" falls through to the velocity ladder.
    pub fn parse(unit: &str) -> Self {
        if unit == "G" {
            VibrationUnit::Acceleration
        } else {
            VibrationUnit::Velocity
        }
    }
}

pub fn microns_to_mm(microns: f64) -> f64 {
    microns / 1000.0
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Reject a derived value that overflowed or lost meaning, so it never
/// reaches a response body as `null`.
pub fn require_finite(field: &'static str, value: f64) -> Result<f64, CalcError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::InvalidInput {
            field,
            reason: "result is outside the calculable range",
        })
    }
}
