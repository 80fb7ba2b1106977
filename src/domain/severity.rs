// Vibration severity classification (ISO 20816-3 style zones)
use super::units::VibrationUnit;
use serde::{Deserialize, Serialize};

/// Velocity ladder upper bounds, inclusive (mm/s)
pub const VELOCITY_ZONE_A_MAX: f64 = 2.8;
pub const VELOCITY_ZONE_C_MAX: f64 = 4.5;

/// Acceleration ladder upper bounds, exclusive (G)
pub const ACCELERATION_ZONE_A_LIMIT: f64 = 1.5;
pub const ACCELERATION_ZONE_C_LIMIT: f64 = 3.0;

/// Severity zone of a machine. Ordered from healthiest to most severe.
///
/// `B` exists in the zone model but neither ladder produces it.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum SeverityLevel {
    #[default]
    A,
    B,
    C,
    D,
}

impl SeverityLevel {
    pub const ALL: [SeverityLevel; 4] = [
        SeverityLevel::A,
        SeverityLevel::B,
        SeverityLevel::C,
        SeverityLevel::D,
    ];

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "A" => Some(SeverityLevel::A),
            "B" => Some(SeverityLevel::B),
            "C" => Some(SeverityLevel::C),
            "D" => Some(SeverityLevel::D),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            SeverityLevel::A => "A",
            SeverityLevel::B => "B",
            SeverityLevel::C => "C",
            SeverityLevel::D => "D",
        }
    }

    pub fn health_score(&self) -> u8 {
        match self {
            SeverityLevel::A | SeverityLevel::B => 100,
            SeverityLevel::C => 55,
            SeverityLevel::D => 15,
        }
    }
}

/// Classify a single reading.
///
/// Comparisons are written so that NaN fails every threshold and lands in `D`.
pub fn classify(value: f64, unit: &str) -> SeverityLevel {
    match VibrationUnit::parse(unit) {
        VibrationUnit::Acceleration => {
            if value < ACCELERATION_ZONE_A_LIMIT {
                SeverityLevel::A
            } else if value < ACCELERATION_ZONE_C_LIMIT {
                SeverityLevel::C
            } else {
                SeverityLevel::D
            }
        }
        VibrationUnit::Velocity => {
            if value <= VELOCITY_ZONE_A_MAX {
                SeverityLevel::A
            } else if value <= VELOCITY_ZONE_C_MAX {
                SeverityLevel::C
            } else {
                SeverityLevel::D
            }
        }
    }
}

/// Worst severity across several classifications, `A` when there are none.
/// Stops at the first `D`.
pub fn worst<I>(levels: I) -> SeverityLevel
where
    I: IntoIterator<Item = SeverityLevel>,
{
    let mut worst = SeverityLevel::A;
    for level in levels {
        if level == SeverityLevel::D {
            return SeverityLevel::D;
        }
        if level > worst {
            worst = level;
        }
    }
    worst
}

/// Health score for a raw severity code. Unknown codes score 100.
pub fn health_score_for_code(code: &str) -> u8 {
    SeverityLevel::from_code(code)
        .map(|level| level.health_score())
        .unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_velocity_boundaries() {
        assert_eq!(classify(2.8, "mm/s"), SeverityLevel::A);
        assert_eq!(classify(2.80001, "mm/s"), SeverityLevel::C);
        assert_eq!(classify(4.5, "mm/s"), SeverityLevel::C);
        assert_eq!(classify(4.50001, "mm/s"), SeverityLevel::D);
        assert_eq!(classify(0.0, "mm/s"), SeverityLevel::A);
    }

    #[test]
    fn test_acceleration_boundaries() {
        assert_eq!(classify(1.49999, "G"), SeverityLevel::A);
        assert_eq!(classify(1.5, "G"), SeverityLevel::C);
        assert_eq!(classify(2.99999, "G"), SeverityLevel::C);
        assert_eq!(classify(3.0, "G"), SeverityLevel::D);
    }

    #[test]
    fn test_unknown_unit_uses_velocity_ladder() {
        assert_eq!(classify(2.0, "in/s"), SeverityLevel::A);
        assert_eq!(classify(5.0, ""), SeverityLevel::D);
    }

    #[test]
    fn test_nan_fails_safe() {
        assert_eq!(classify(f64::NAN, "mm/s"), SeverityLevel::D);
        assert_eq!(classify(f64::NAN, "G"), SeverityLevel::D);
    }

    #[test]
    fn test_velocity_monotonic() {
        let mut previous = SeverityLevel::A;
        for step in 0..1000 {
            let level = classify(step as f64 * 0.01, "mm/s");
            assert!(level >= previous, "regressed at step {}", step);
            assert_ne!(level, SeverityLevel::B);
            previous = level;
        }
    }

    #[test]
    fn test_worst() {
        use SeverityLevel::*;
        assert_eq!(worst(Vec::new()), A);
        assert_eq!(worst([A, C, A]), C);
        assert_eq!(worst([A, B]), B);
        assert_eq!(worst([C, D, B]), D);
    }

    #[test]
    fn test_health_score() {
        assert_eq!(SeverityLevel::A.health_score(), 100);
        assert_eq!(SeverityLevel::B.health_score(), 100);
        assert_eq!(SeverityLevel::C.health_score(), 55);
        assert_eq!(SeverityLevel::D.health_score(), 15);
        assert_eq!(health_score_for_code("Z"), 100);
        assert_eq!(health_score_for_code("D"), 15);
    }
}
