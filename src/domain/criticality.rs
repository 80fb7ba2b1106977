// Criticality scoring and risk-matrix placement
use super::error::CalcError;
use super::units::round_to;
use serde::{Deserialize, Serialize};

pub const RATING_MIN: u8 = 1;
pub const RATING_MAX: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriticalityAssessment {
    pub probability: u8,
    pub impact_environment: u8,
    pub impact_economic: u8,
    pub impact_human: u8,
}

impl Default for CriticalityAssessment {
    fn default() -> Self {
        Self {
            probability: RATING_MIN,
            impact_environment: RATING_MIN,
            impact_economic: RATING_MIN,
            impact_human: RATING_MIN,
        }
    }
}

impl CriticalityAssessment {
    pub fn new(
        probability: u8,
        impact_environment: u8,
        impact_economic: u8,
        impact_human: u8,
    ) -> Result<Self, CalcError> {
        let assessment = Self {
            probability,
            impact_environment,
            impact_economic,
            impact_human,
        };
        assessment.validate()?;
        Ok(assessment)
    }

    pub fn validate(&self) -> Result<(), CalcError> {
        let fields = [
            ("probability", self.probability),
            ("impactEnvironment", self.impact_environment),
            ("impactEconomic", self.impact_economic),
            ("impactHuman", self.impact_human),
        ];
        for (field, value) in fields {
            if !(RATING_MIN..=RATING_MAX).contains(&value) {
                return Err(CalcError::InvalidInput {
                    field,
                    reason: "rating must be between 1 and 5",
                });
            }
        }
        Ok(())
    }

    /// Mean of the three impact ratings, unrounded.
    pub fn impact(&self) -> f64 {
        (self.impact_environment as f64 + self.impact_economic as f64 + self.impact_human as f64)
            / 3.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CriticalityLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl CriticalityLevel {
    pub fn from_score(score: f64) -> Self {
        if score > 15.0 {
            CriticalityLevel::Critical
        } else if score > 10.0 {
            CriticalityLevel::High
        } else if score > 5.0 {
            CriticalityLevel::Medium
        } else {
            CriticalityLevel::Low
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CriticalityScore {
    pub probability: f64,
    pub impact: f64,
    pub score: f64,
    pub level: CriticalityLevel,
}

/// Score an assessment; a missing one counts as the minimum-risk default.
pub fn score(assessment: Option<&CriticalityAssessment>) -> CriticalityScore {
    let assessment = assessment.copied().unwrap_or_default();
    let probability = assessment.probability as f64;
    let impact = assessment.impact();
    let score = probability * impact;
    CriticalityScore {
        probability,
        impact,
        score,
        level: CriticalityLevel::from_score(score),
    }
}

/// Integer coordinate on the 5x5 matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GridCell {
    pub probability: u8,
    pub impact: u8,
}

impl CriticalityScore {
    pub fn grid_cell(&self) -> GridCell {
        GridCell {
            probability: to_grid(self.probability),
            impact: to_grid(self.impact),
        }
    }
}

fn to_grid(value: f64) -> u8 {
    round_to(value, 0).clamp(RATING_MIN as f64, RATING_MAX as f64) as u8
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskCell {
    pub probability: u8,
    pub impact: u8,
    pub level: CriticalityLevel,
    pub asset_ids: Vec<String>,
}

/// All 25 cells, probability-major, each holding every asset placed on it.
#[derive(Debug, Clone, Serialize)]
pub struct RiskMatrix {
    pub cells: Vec<RiskCell>,
}

impl RiskMatrix {
    pub fn build<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Option<&'a CriticalityAssessment>)>,
    {
        let mut cells = Vec::with_capacity(25);
        for probability in RATING_MIN..=RATING_MAX {
            for impact in RATING_MIN..=RATING_MAX {
                cells.push(RiskCell {
                    probability,
                    impact,
                    level: CriticalityLevel::from_score(probability as f64 * impact as f64),
                    asset_ids: Vec::new(),
                });
            }
        }

        for (asset_id, assessment) in entries {
            let cell = score(assessment).grid_cell();
            let idx = (cell.probability - RATING_MIN) as usize * 5 + (cell.impact - RATING_MIN) as usize;
            cells[idx].asset_ids.push(asset_id.to_string());
        }

        Self { cells }
    }

    pub fn cell(&self, probability: u8, impact: u8) -> Option<&RiskCell> {
        self.cells
            .iter()
            .find(|c| c.probability == probability && c.impact == impact)
    }
}
