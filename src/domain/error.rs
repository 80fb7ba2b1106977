// Calculator error taxonomy
use thiserror::Error;

/// Why a calculator could not produce a value.
///
/// Every variant is a terminal, deterministic outcome: the same input always
/// yields the same error, so callers branch on it instead of retrying.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: &'static str },

    #[error("unknown fit class '{0}'")]
    UnknownFitClass(String),

    #[error("nominal diameter {diameter} mm is outside the tolerance table")]
    OutOfRange { diameter: f64 },

    #[error("{field} must be non-zero")]
    ZeroDenominator { field: &'static str },
}

impl CalcError {
    /// Short machine-readable code used by the HTTP envelope.
    pub fn code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "invalid_input",
            CalcError::UnknownFitClass(_) => "unknown_fit_class",
            CalcError::OutOfRange { .. } => "out_of_range",
            CalcError::ZeroDenominator { .. } => "invalid",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CalcError::OutOfRange { diameter: 18.0 };
        assert_eq!(
            err.to_string(),
            "nominal diameter 18 mm is outside the tolerance table"
        );
        assert_eq!(err.code(), "out_of_range");

        let err = CalcError::ZeroDenominator { field: "rpm" };
        assert_eq!(err.to_string(), "rpm must be non-zero");
        assert_eq!(err.code(), "invalid");
    }
}
