// FMECA risk priority numbers
use super::units::round_to;
use serde::{Deserialize, Serialize};

pub const RATING_MIN: u8 = 1;
pub const RATING_MAX: u8 = 10;

/// A failure mode with current and after-action ratings.
///
/// `rpn` and `resRPN` are derived from the ratings on every read and on
/// serialization; values for them in incoming JSON are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", into = "FailureModeRecord")]
pub struct FailureMode {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub component: String,
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub effect: String,
    #[serde(default)]
    pub cause: String,
    #[serde(default)]
    pub action: String,
    pub severity: u8,
    pub occurrence: u8,
    pub detection: u8,
    pub res_severity: u8,
    pub res_occurrence: u8,
    pub res_detection: u8,
}

/// Serialized form of a [`FailureMode`], carrying both RPNs.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FailureModeRecord {
    id: String,
    component: String,
    mode: String,
    effect: String,
    cause: String,
    action: String,
    severity: u8,
    occurrence: u8,
    detection: u8,
    res_severity: u8,
    res_occurrence: u8,
    res_detection: u8,
    rpn: u16,
    #[serde(rename = "resRPN")]
    res_rpn: u16,
}

impl From<FailureMode> for FailureModeRecord {
    fn from(mode: FailureMode) -> Self {
        let rpn = mode.rpn();
        let res_rpn = mode.res_rpn();
        Self {
            id: mode.id,
            component: mode.component,
            mode: mode.mode,
            effect: mode.effect,
            cause: mode.cause,
            action: mode.action,
            severity: mode.severity,
            occurrence: mode.occurrence,
            detection: mode.detection,
            res_severity: mode.res_severity,
            res_occurrence: mode.res_occurrence,
            res_detection: mode.res_detection,
            rpn,
            res_rpn,
        }
    }
}

impl FailureMode {
    pub fn new(id: impl Into<String>, severity: u8, occurrence: u8, detection: u8) -> Self {
        recompute(Self {
            id: id.into(),
            component: String::new(),
            mode: String::new(),
            effect: String::new(),
            cause: String::new(),
            action: String::new(),
            severity,
            occurrence,
            detection,
            res_severity: severity,
            res_occurrence: occurrence,
            res_detection: detection,
        })
    }

    pub fn with_residual(mut self, severity: u8, occurrence: u8, detection: u8) -> Self {
        self.res_severity = severity;
        self.res_occurrence = occurrence;
        self.res_detection = detection;
        recompute(self)
    }

    /// Product of the current ratings, each read clamped into [1, 10].
    pub fn rpn(&self) -> u16 {
        rpn(
            clamp_rating(self.severity),
            clamp_rating(self.occurrence),
            clamp_rating(self.detection),
        )
    }

    pub fn res_rpn(&self) -> u16 {
        rpn(
            clamp_rating(self.res_severity),
            clamp_rating(self.res_occurrence),
            clamp_rating(self.res_detection),
        )
    }

    pub fn band(&self) -> RpnBand {
        RpnBand::from_rpn(self.rpn())
    }

    pub fn residual_band(&self) -> RpnBand {
        RpnBand::from_rpn(self.res_rpn())
    }

    /// Percentage drop from `rpn` to `res_rpn`, only when there is one.
    pub fn improvement_percent(&self) -> Option<u32> {
        let (rpn, res_rpn) = (self.rpn(), self.res_rpn());
        if rpn > res_rpn {
            let drop = (rpn - res_rpn) as f64 / rpn as f64 * 100.0;
            Some(round_to(drop, 0) as u32)
        } else {
            None
        }
    }
}

fn clamp_rating(rating: u8) -> u8 {
    rating.clamp(RATING_MIN, RATING_MAX)
}

pub fn rpn(severity: u8, occurrence: u8, detection: u8) -> u16 {
    severity as u16 * occurrence as u16 * detection as u16
}

/// Clamp every stored rating into [1, 10].
pub fn recompute(mut mode: FailureMode) -> FailureMode {
    mode.severity = clamp_rating(mode.severity);
    mode.occurrence = clamp_rating(mode.occurrence);
    mode.detection = clamp_rating(mode.detection);
    mode.res_severity = clamp_rating(mode.res_severity);
    mode.res_occurrence = clamp_rating(mode.res_occurrence);
    mode.res_detection = clamp_rating(mode.res_detection);
    mode
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RpnBand {
    Acceptable,
    Elevated,
    Critical,
}

impl RpnBand {
    pub fn from_rpn(rpn: u16) -> Self {
        if rpn > 200 {
            RpnBand::Critical
        } else if rpn > 100 {
            RpnBand::Elevated
        } else {
            RpnBand::Acceptable
        }
    }
}
