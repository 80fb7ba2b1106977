// Shaft alignment tolerances and misalignment energy-loss model
use super::error::CalcError;
use super::units::require_finite;
use serde::{Deserialize, Serialize};

/// Loss per unit of severity ratio above 1
pub const LOSS_SLOPE: f64 = 0.015;
/// Loss ceiling (fraction)
pub const LOSS_CAP: f64 = 0.10;
/// kg CO2 per kWh
pub const EMISSIONS_FACTOR: f64 = 0.4;
/// Loss percentage under which a misaligned drive is still acceptable
pub const ACCEPTABLE_LOSS_PERCENT: f64 = 3.0;

/// Offset limits in mm, angular limits in mm/100mm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeedBand {
    pub rpm_min: f64,
    pub rpm_max: f64,
    pub offset_excellent: f64,
    pub offset_acceptable: f64,
    pub angular_excellent: f64,
    pub angular_acceptable: f64,
}

pub static SPEED_BANDS: [SpeedBand; 4] = [
    SpeedBand {
        rpm_min: 0.0,
        rpm_max: 1000.0,
        offset_excellent: 0.08,
        offset_acceptable: 0.13,
        angular_excellent: 0.06,
        angular_acceptable: 0.10,
    },
    SpeedBand {
        rpm_min: 1000.0,
        rpm_max: 2000.0,
        offset_excellent: 0.05,
        offset_acceptable: 0.08,
        angular_excellent: 0.04,
        angular_acceptable: 0.07,
    },
    SpeedBand {
        rpm_min: 2000.0,
        rpm_max: 3000.0,
        offset_excellent: 0.04,
        offset_acceptable: 0.06,
        angular_excellent: 0.03,
        angular_acceptable: 0.05,
    },
    SpeedBand {
        rpm_min: 3000.0,
        rpm_max: 10000.0,
        offset_excellent: 0.03,
        offset_acceptable: 0.04,
        angular_excellent: 0.02,
        angular_acceptable: 0.03,
    },
];

const DEFAULT_BAND: usize = 1;

/// Band for a speed. The top band has no ceiling; unusable or negative
/// speeds use the 1000-2000 rpm band.
pub fn band_for(rpm: f64) -> &'static SpeedBand {
    let last = &SPEED_BANDS[SPEED_BANDS.len() - 1];
    if rpm >= last.rpm_min {
        return last;
    }
    SPEED_BANDS
        .iter()
        .find(|band| band.rpm_min <= rpm && rpm < band.rpm_max)
        .unwrap_or(&SPEED_BANDS[DEFAULT_BAND])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignmentStatus {
    Excellent,
    Acceptable,
    Critical,
    Invalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Channel {
    VerticalOffset,
    VerticalAngular,
    HorizontalOffset,
    HorizontalAngular,
}

impl Channel {
    pub fn is_offset(&self) -> bool {
        matches!(self, Channel::VerticalOffset | Channel::HorizontalOffset)
    }

    /// (excellent, acceptable) limits for this channel in a band.
    pub fn limits(&self, band: &SpeedBand) -> (f64, f64) {
        if self.is_offset() {
            (band.offset_excellent, band.offset_acceptable)
        } else {
            (band.angular_excellent, band.angular_acceptable)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignmentMeasurement {
    pub vertical_offset: f64,
    pub vertical_angular: f64,
    pub horizontal_offset: f64,
    pub horizontal_angular: f64,
}

impl AlignmentMeasurement {
    pub fn channels(&self) -> [(Channel, f64); 4] {
        [
            (Channel::VerticalOffset, self.vertical_offset),
            (Channel::VerticalAngular, self.vertical_angular),
            (Channel::HorizontalOffset, self.horizontal_offset),
            (Channel::HorizontalAngular, self.horizontal_angular),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatingParams {
    pub power_kw: f64,
    pub operating_hours_per_year: f64,
    pub load_factor_percent: f64,
    pub energy_price_per_kwh: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelAssessment {
    pub channel: Channel,
    pub measured: f64,
    pub excellent_limit: f64,
    pub acceptable_limit: f64,
    pub ratio: f64,
    pub status: AlignmentStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LossEstimate {
    pub band: SpeedBand,
    pub channels: Vec<ChannelAssessment>,
    pub severity_ratio: f64,
    /// Fraction of consumption lost, 0..=0.10
    pub loss_fraction: f64,
    pub loss_percent: f64,
    pub annual_consumption_kwh: f64,
    pub energy_kwh: f64,
    pub annual_cost_savings: f64,
    pub co2_saved_tons: f64,
    pub status: AlignmentStatus,
}

pub fn channel_status(value: f64, excellent: f64, acceptable: f64) -> AlignmentStatus {
    let value = value.abs();
    if value.is_nan() {
        AlignmentStatus::Invalid
    } else if value <= excellent {
        AlignmentStatus::Excellent
    } else if value <= acceptable {
        AlignmentStatus::Acceptable
    } else {
        AlignmentStatus::Critical
    }
}

/// Linear above a ratio of 1, zero below, capped at 10 %.
pub fn loss_fraction(severity_ratio: f64) -> f64 {
    ((severity_ratio - 1.0) * LOSS_SLOPE).clamp(0.0, LOSS_CAP)
}

pub fn overall_status(severity_ratio: f64, loss_percent: f64) -> AlignmentStatus {
    if severity_ratio <= 1.0 {
        AlignmentStatus::Excellent
    } else if loss_percent < ACCEPTABLE_LOSS_PERCENT {
        AlignmentStatus::Acceptable
    } else {
        AlignmentStatus::Critical
    }
}

pub fn estimate_loss(
    measurement: &AlignmentMeasurement,
    rpm: f64,
    params: &OperatingParams,
) -> Result<LossEstimate, CalcError> {
    for (channel, value) in measurement.channels() {
        if !value.is_finite() {
            return Err(CalcError::InvalidInput {
                field: channel_field(channel),
                reason: "must be a number",
            });
        }
    }
    let operating = [
        ("powerKw", params.power_kw),
        ("operatingHoursPerYear", params.operating_hours_per_year),
        ("loadFactorPercent", params.load_factor_percent),
        ("energyPricePerKwh", params.energy_price_per_kwh),
    ];
    for (field, value) in operating {
        if !value.is_finite() || value < 0.0 {
            return Err(CalcError::InvalidInput {
                field,
                reason: "must be zero or a positive number",
            });
        }
    }

    let band = band_for(rpm);
    let channels: Vec<ChannelAssessment> = measurement
        .channels()
        .into_iter()
        .map(|(channel, measured)| {
            let (excellent, acceptable) = channel.limits(band);
            ChannelAssessment {
                channel,
                measured,
                excellent_limit: excellent,
                acceptable_limit: acceptable,
                ratio: measured.abs() / excellent,
                status: channel_status(measured, excellent, acceptable),
            }
        })
        .collect();

    let severity_ratio = require_finite(
        "severityRatio",
        channels.iter().map(|c| c.ratio).fold(0.0, f64::max),
    )?;
    let loss = loss_fraction(severity_ratio);
    let loss_percent = loss * 100.0;

    let annual_consumption_kwh = require_finite(
        "annualConsumptionKwh",
        params.power_kw * params.operating_hours_per_year * (params.load_factor_percent / 100.0),
    )?;
    let energy_kwh = require_finite("energyKwh", annual_consumption_kwh * loss)?;
    let annual_cost_savings =
        require_finite("annualCostSavings", energy_kwh * params.energy_price_per_kwh)?;
    let co2_saved_tons = require_finite("co2SavedTons", energy_kwh * EMISSIONS_FACTOR / 1000.0)?;

    Ok(LossEstimate {
        band: *band,
        channels,
        severity_ratio,
        loss_fraction: loss,
        loss_percent,
        annual_consumption_kwh,
        energy_kwh,
        annual_cost_savings,
        co2_saved_tons,
        status: overall_status(severity_ratio, loss_percent),
    })
}

fn channel_field(channel: Channel) -> &'static str {
    match channel {
        Channel::VerticalOffset => "verticalOffset",
        Channel::VerticalAngular => "verticalAngular",
        Channel::HorizontalOffset => "horizontalOffset",
        Channel::HorizontalAngular => "horizontalAngular",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn motor() -> OperatingParams {
        OperatingParams {
            power_kw: 75.0,
            operating_hours_per_year: 8000.0,
            load_factor_percent: 85.0,
            energy_price_per_kwh: 0.18,
        }
    }

    #[test]
    fn test_band_selection() {
        assert_eq!(band_for(0.0).rpm_min, 0.0);
        assert_eq!(band_for(999.9).rpm_min, 0.0);
        assert_eq!(band_for(1000.0).rpm_min, 1000.0);
        assert_eq!(band_for(1500.0).rpm_min, 1000.0);
        assert_eq!(band_for(2999.0).rpm_min, 2000.0);
        assert_eq!(band_for(3000.0).rpm_min, 3000.0);
        assert_eq!(band_for(25000.0).rpm_min, 3000.0);
    }

    #[test]
    fn test_band_fallback() {
        assert_eq!(band_for(f64::NAN).rpm_min, 1000.0);
        assert_eq!(band_for(-50.0).rpm_min, 1000.0);
    }

    #[test]
    fn test_within_excellent_has_zero_loss() {
        let aligned = AlignmentMeasurement {
            vertical_offset: 0.05,
            vertical_angular: -0.04,
            horizontal_offset: 0.01,
            horizontal_angular: 0.0,
        };
        let params = OperatingParams {
            power_kw: 5000.0,
            operating_hours_per_year: 8760.0,
            ..motor()
        };
        let result = estimate_loss(&aligned, 1500.0, &params).unwrap();
        assert!(result.severity_ratio <= 1.0);
        assert_eq!(result.loss_fraction, 0.0);
        assert_eq!(result.energy_kwh, 0.0);
        assert_eq!(result.annual_cost_savings, 0.0);
        assert_eq!(result.co2_saved_tons, 0.0);
        assert_eq!(result.status, AlignmentStatus::Excellent);
    }

    #[test]
    fn test_misaligned_drive() {
        let measured = AlignmentMeasurement {
            vertical_offset: 0.15,
            vertical_angular: 0.12,
            horizontal_offset: 0.06,
            horizontal_angular: 0.08,
        };
        let result = estimate_loss(&measured, 1500.0, &motor()).unwrap();

        // vertical angular dominates: 0.12 / 0.04 = 3
        assert!((result.severity_ratio - 3.0).abs() < EPS);
        assert!((result.loss_fraction - 0.03).abs() < EPS);
        assert!((result.annual_consumption_kwh - 510_000.0).abs() < 1e-6);
        assert!((result.energy_kwh - 15_300.0).abs() < 1e-6);
        assert!((result.annual_cost_savings - 2_754.0).abs() < 1e-6);
        assert!((result.co2_saved_tons - 6.12).abs() < 1e-9);

        let statuses: Vec<AlignmentStatus> = result.channels.iter().map(|c| c.status).collect();
        assert_eq!(
            statuses,
            vec![
                AlignmentStatus::Critical,
                AlignmentStatus::Critical,
                AlignmentStatus::Acceptable,
                AlignmentStatus::Critical,
            ]
        );
    }

    #[test]
    fn test_loss_is_capped() {
        assert_eq!(loss_fraction(0.5), 0.0);
        assert_eq!(loss_fraction(1.0), 0.0);
        assert!((loss_fraction(2.0) - 0.015).abs() < EPS);
        assert_eq!(loss_fraction(50.0), LOSS_CAP);
    }

    #[test]
    fn test_overall_status() {
        assert_eq!(overall_status(1.0, 0.0), AlignmentStatus::Excellent);
        assert_eq!(overall_status(2.0, 1.5), AlignmentStatus::Acceptable);
        assert_eq!(overall_status(5.0, 6.0), AlignmentStatus::Critical);
    }

    #[test]
    fn test_channel_status() {
        assert_eq!(channel_status(-0.05, 0.05, 0.08), AlignmentStatus::Excellent);
        assert_eq!(channel_status(0.08, 0.05, 0.08), AlignmentStatus::Acceptable);
        assert_eq!(channel_status(0.09, 0.05, 0.08), AlignmentStatus::Critical);
        assert_eq!(channel_status(f64::NAN, 0.05, 0.08), AlignmentStatus::Invalid);
    }

    #[test]
    fn test_invalid_inputs() {
        let measured = AlignmentMeasurement {
            vertical_offset: f64::NAN,
            vertical_angular: 0.0,
            horizontal_offset: 0.0,
            horizontal_angular: 0.0,
        };
        assert!(matches!(
            estimate_loss(&measured, 1500.0, &motor()),
            Err(CalcError::InvalidInput { field: "verticalOffset", .. })
        ));

        let measured = AlignmentMeasurement {
            vertical_offset: 0.0,
            ..measured
        };
        let params = OperatingParams {
            power_kw: -1.0,
            ..motor()
        };
        assert!(estimate_loss(&measured, 1500.0, &params).is_err());
    }

    #[test]
    fn test_overflowing_results_are_rejected() {
        let huge_offset = AlignmentMeasurement {
            vertical_offset: 1e308,
            vertical_angular: 0.0,
            horizontal_offset: 0.0,
            horizontal_angular: 0.0,
        };
        assert!(matches!(
            estimate_loss(&huge_offset, 1500.0, &motor()),
            Err(CalcError::InvalidInput { field: "severityRatio", .. })
        ));

        let misaligned = AlignmentMeasurement {
            vertical_offset: 0.2,
            ..huge_offset
        };
        let params = OperatingParams {
            power_kw: 1e200,
            operating_hours_per_year: 1e200,
            ..motor()
        };
        assert!(matches!(
            estimate_loss(&misaligned, 1500.0, &params),
            Err(CalcError::InvalidInput { field: "annualConsumptionKwh", .. })
        ));
    }
}
