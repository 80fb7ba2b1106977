// ISO 286-2 shaft and housing fit tolerances
use super::error::CalcError;
use super::units::microns_to_mm;
use serde::{Deserialize, Serialize};

/// One diameter range `(min, max]` of a fit class with its deviations in µm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviationBand {
    pub min_mm: f64,
    pub max_mm: f64,
    pub upper_um: f64,
    pub lower_um: f64,
}

impl DeviationBand {
    const fn new(min_mm: f64, max_mm: f64, upper_um: f64, lower_um: f64) -> Self {
        Self {
            min_mm,
            max_mm,
            upper_um,
            lower_um,
        }
    }

    /// Open on the left, closed on the right.
    pub fn contains(&self, diameter: f64) -> bool {
        self.min_mm < diameter && diameter <= self.max_mm
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FitClass {
    pub name: &'static str,
    pub bands: &'static [DeviationBand],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartKind {
    Shaft,
    Housing,
}

pub static SHAFT_FITS: &[FitClass] = &[
    FitClass {
        name: "h6",
        bands: &[
            DeviationBand::new(18.0, 30.0, 0.0, -13.0),
            DeviationBand::new(30.0, 50.0, 0.0, -16.0),
            DeviationBand::new(50.0, 80.0, 0.0, -19.0),
            DeviationBand::new(80.0, 120.0, 0.0, -22.0),
        ],
    },
    FitClass {
        name: "j6",
        bands: &[
            DeviationBand::new(18.0, 30.0, 9.0, -4.0),
            DeviationBand::new(30.0, 50.0, 11.0, -5.0),
            DeviationBand::new(50.0, 80.0, 12.0, -7.0),
            DeviationBand::new(80.0, 120.0, 13.0, -9.0),
        ],
    },
    FitClass {
        name: "k6",
        bands: &[
            DeviationBand::new(18.0, 30.0, 15.0, 2.0),
            DeviationBand::new(30.0, 50.0, 18.0, 2.0),
            DeviationBand::new(50.0, 80.0, 21.0, 2.0),
            DeviationBand::new(80.0, 120.0, 25.0, 3.0),
        ],
    },
    FitClass {
        name: "m6",
        bands: &[
            DeviationBand::new(18.0, 30.0, 21.0, 8.0),
            DeviationBand::new(30.0, 50.0, 25.0, 9.0),
            DeviationBand::new(50.0, 80.0, 30.0, 11.0),
            DeviationBand::new(80.0, 120.0, 35.0, 13.0),
        ],
    },
    FitClass {
        name: "n6",
        bands: &[
            DeviationBand::new(18.0, 30.0, 28.0, 15.0),
            DeviationBand::new(30.0, 50.0, 33.0, 17.0),
            DeviationBand::new(50.0, 80.0, 39.0, 20.0),
            DeviationBand::new(80.0, 120.0, 45.0, 23.0),
        ],
    },
];

pub static HOUSING_FITS: &[FitClass] = &[
    FitClass {
        name: "H7",
        bands: &[
            DeviationBand::new(18.0, 30.0, 21.0, 0.0),
            DeviationBand::new(30.0, 50.0, 25.0, 0.0),
            DeviationBand::new(50.0, 80.0, 30.0, 0.0),
            DeviationBand::new(80.0, 120.0, 35.0, 0.0),
            DeviationBand::new(120.0, 180.0, 40.0, 0.0),
        ],
    },
    FitClass {
        name: "J7",
        bands: &[
            DeviationBand::new(18.0, 30.0, 12.0, -9.0),
            DeviationBand::new(30.0, 50.0, 14.0, -11.0),
            DeviationBand::new(50.0, 80.0, 18.0, -12.0),
            DeviationBand::new(80.0, 120.0, 22.0, -13.0),
        ],
    },
    FitClass {
        name: "K7",
        bands: &[
            DeviationBand::new(18.0, 30.0, 2.0, -19.0),
            DeviationBand::new(30.0, 50.0, 2.0, -23.0),
            DeviationBand::new(50.0, 80.0, 2.0, -28.0),
            DeviationBand::new(80.0, 120.0, 3.0, -32.0),
        ],
    },
    FitClass {
        name: "M7",
        bands: &[
            DeviationBand::new(18.0, 30.0, -1.0, -22.0),
            DeviationBand::new(30.0, 50.0, -2.0, -27.0),
            DeviationBand::new(50.0, 80.0, -3.0, -33.0),
            DeviationBand::new(80.0, 120.0, -3.0, -38.0),
        ],
    },
    FitClass {
        name: "P7",
        bands: &[
            DeviationBand::new(18.0, 30.0, -11.0, -32.0),
            DeviationBand::new(30.0, 50.0, -14.0, -39.0),
            DeviationBand::new(50.0, 80.0, -17.0, -47.0),
            DeviationBand::new(80.0, 120.0, -20.0, -55.0),
        ],
    },
];

impl PartKind {
    pub fn catalog(&self) -> &'static [FitClass] {
        match self {
            PartKind::Shaft => SHAFT_FITS,
            PartKind::Housing => HOUSING_FITS,
        }
    }

    /// Fit class selected when switching to this catalog.
    pub fn default_fit_class(&self) -> &'static str {
        match self {
            PartKind::Shaft => "k6",
            PartKind::Housing => "H7",
        }
    }

    pub fn fit_class(&self, name: &str) -> Option<&'static FitClass> {
        self.catalog().iter().find(|fit| fit.name == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToleranceResult {
    pub nominal_diameter: f64,
    pub upper_limit: f64,
    pub lower_limit: f64,
    pub tolerance_band: f64,
    pub upper_deviation_mm: f64,
    pub lower_deviation_mm: f64,
    pub upper_deviation_um: f64,
    pub lower_deviation_um: f64,
}

/// Resolve the limits of a nominal diameter (mm) for a fit class.
///
/// Every `Err` is a "not found" outcome: unknown class, unusable diameter,
/// or a diameter outside the class's table (including the table's own lower
/// edge, which the open interval excludes).
pub fn lookup(
    nominal_diameter: f64,
    fit_class: &str,
    part: PartKind,
) -> Result<ToleranceResult, CalcError> {
    if !nominal_diameter.is_finite() || nominal_diameter <= 0.0 {
        return Err(CalcError::InvalidInput {
            field: "nominalDiameter",
            reason: "must be a positive number",
        });
    }

    let fit = part
        .fit_class(fit_class)
        .ok_or_else(|| CalcError::UnknownFitClass(fit_class.to_string()))?;

    let band = fit
        .bands
        .iter()
        .find(|band| band.contains(nominal_diameter))
        .ok_or(CalcError::OutOfRange {
            diameter: nominal_diameter,
        })?;

    let upper_mm = microns_to_mm(band.upper_um);
    let lower_mm = microns_to_mm(band.lower_um);

    Ok(ToleranceResult {
        nominal_diameter,
        upper_limit: nominal_diameter + upper_mm,
        lower_limit: nominal_diameter + lower_mm,
        tolerance_band: upper_mm - lower_mm,
        upper_deviation_mm: upper_mm,
        lower_deviation_mm: lower_mm,
        upper_deviation_um: band.upper_um,
        lower_deviation_um: band.lower_um,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_right_closed_boundary() {
        // 30 belongs to (18, 30], not (30, 50]
        let at_30 = lookup(30.0, "k6", PartKind::Shaft).unwrap();
        assert_eq!(at_30.upper_limit, 30.0 + 0.015);
        assert_eq!(at_30.upper_deviation_um, 15.0);

        let above_30 = lookup(30.0001, "k6", PartKind::Shaft).unwrap();
        assert_eq!(above_30.upper_deviation_um, 18.0);
    }

    #[test]
    fn test_first_lower_edge_is_not_found() {
        let err = lookup(18.0, "k6", PartKind::Shaft).unwrap_err();
        assert_eq!(err, CalcError::OutOfRange { diameter: 18.0 });
        assert!(lookup(18.0001, "k6", PartKind::Shaft).is_ok());
    }

    #[test]
    fn test_out_of_range_and_invalid() {
        assert!(matches!(
            lookup(120.5, "k6", PartKind::Shaft),
            Err(CalcError::OutOfRange { .. })
        ));
        assert!(matches!(
            lookup(0.0, "k6", PartKind::Shaft),
            Err(CalcError::InvalidInput { .. })
        ));
        assert!(matches!(
            lookup(-5.0, "H7", PartKind::Housing),
            Err(CalcError::InvalidInput { .. })
        ));
        assert!(matches!(
            lookup(f64::NAN, "H7", PartKind::Housing),
            Err(CalcError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_catalogs_are_separate() {
        assert_eq!(
            lookup(50.0, "H7", PartKind::Shaft).unwrap_err(),
            CalcError::UnknownFitClass("H7".to_string())
        );
        assert!(lookup(50.0, "k6", PartKind::Housing).is_err());
        assert_eq!(PartKind::Shaft.default_fit_class(), "k6");
        assert_eq!(PartKind::Housing.default_fit_class(), "H7");
        assert!(PartKind::Housing.fit_class(PartKind::Housing.default_fit_class()).is_some());
    }

    #[test]
    fn test_housing_limits() {
        let result = lookup(50.0, "K7", PartKind::Housing).unwrap();
        assert!((result.upper_limit - 50.002).abs() < EPS);
        assert!((result.lower_limit - 49.977).abs() < EPS);
        assert!((result.tolerance_band - 0.025).abs() < EPS);

        // H7 runs one band further than the other housing classes
        let result = lookup(150.0, "H7", PartKind::Housing).unwrap();
        assert!((result.upper_limit - 150.040).abs() < EPS);
        assert!(lookup(150.0, "P7", PartKind::Housing).is_err());
    }

    #[test]
    fn test_tables_are_contiguous() {
        for part in [PartKind::Shaft, PartKind::Housing] {
            for fit in part.catalog() {
                for pair in fit.bands.windows(2) {
                    assert_eq!(pair[0].max_mm, pair[1].min_mm, "gap in {}", fit.name);
                }
                for band in fit.bands {
                    assert!(band.upper_um > band.lower_um, "inverted band in {}", fit.name);
                }
            }
        }
    }
}
