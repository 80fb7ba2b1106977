// Permissible residual unbalance (ISO 21940-11)
use super::error::CalcError;
use super::units::require_finite;
use serde::{Deserialize, Serialize};

/// 60 000 / 2π, relates grade (mm/s) and speed (rpm) to eccentricity (µm = g·mm/kg)
pub const GRADE_CONSTANT: f64 = 9549.0;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct BalanceGrade {
    pub g: f64,
    pub label: &'static str,
    pub typical_use: &'static str,
}

pub static BALANCE_GRADES: &[BalanceGrade] = &[
    BalanceGrade {
        g: 0.4,
        label: "G0.4",
        typical_use: "High-precision spindles, discs and armatures",
    },
    BalanceGrade {
        g: 1.0,
        label: "G1",
        typical_use: "Small electric motors, tape recorder drives",
    },
    BalanceGrade {
        g: 2.5,
        label: "G2.5",
        typical_use: "Gas and steam turbines, turbo-compressors",
    },
    BalanceGrade {
        g: 6.3,
        label: "G6.3",
        typical_use: "General machinery parts, pumps, fans",
    },
    BalanceGrade {
        g: 16.0,
        label: "G16",
        typical_use: "Agricultural machinery, belt pulleys",
    },
    BalanceGrade {
        g: 40.0,
        label: "G40",
        typical_use: "Car wheels and rims",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceInput {
    pub rotor_mass_kg: f64,
    pub speed_rpm: f64,
    pub grade_g: f64,
    /// Measured residual mass (g)
    pub unbalance_mass_g: f64,
    /// Radius of the residual mass (mm)
    pub unbalance_radius_mm: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BalanceStatus {
    Compliant,
    NonCompliant,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceAssessment {
    /// e_per, g·mm/kg
    pub specific_unbalance: f64,
    /// U_per, g·mm
    pub permissible_unbalance: f64,
    /// g·mm
    pub measured_unbalance: f64,
    pub status: BalanceStatus,
}

pub fn specific_unbalance(grade_g: f64, speed_rpm: f64) -> Result<f64, CalcError> {
    require_positive("speedRpm", speed_rpm)?;
    require_non_negative("gradeG", grade_g)?;
    require_finite("specificUnbalance", GRADE_CONSTANT * grade_g / speed_rpm)
}

pub fn assess(input: &BalanceInput) -> Result<BalanceAssessment, CalcError> {
    require_positive("rotorMassKg", input.rotor_mass_kg)?;
    let specific = specific_unbalance(input.grade_g, input.speed_rpm)?;
    require_non_negative("unbalanceMassG", input.unbalance_mass_g)?;
    require_non_negative("unbalanceRadiusMm", input.unbalance_radius_mm)?;

    let permissible = require_finite("permissibleUnbalance", specific * input.rotor_mass_kg)?;
    let measured = require_finite(
        "measuredUnbalance",
        input.unbalance_mass_g * input.unbalance_radius_mm,
    )?;
    let status = if measured <= permissible {
        BalanceStatus::Compliant
    } else {
        BalanceStatus::NonCompliant
    };

    Ok(BalanceAssessment {
        specific_unbalance: specific,
        permissible_unbalance: permissible,
        measured_unbalance: measured,
        status,
    })
}

fn require_positive(field: &'static str, value: f64) -> Result<(), CalcError> {
    if value == 0.0 {
        return Err(CalcError::ZeroDenominator { field });
    }
    if !value.is_finite() || value < 0.0 {
        return Err(CalcError::InvalidInput {
            field,
            reason: "must be a positive number",
        });
    }
    Ok(())
}

fn require_non_negative(field: &'static str, value: f64) -> Result<(), CalcError> {
    if !value.is_finite() || value < 0.0 {
        return Err(CalcError::InvalidInput {
            field,
            reason: "must be zero or a positive number",
        });
    }
    Ok(())
}
