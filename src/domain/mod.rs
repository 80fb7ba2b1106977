// Domain layer - Condition classification and engineering calculators
pub mod alignment;
pub mod anomaly;
pub mod asset;
pub mod balancing;
pub mod criticality;
pub mod error;
pub mod fmeca;
pub mod kpi;
pub mod severity;
pub mod tolerance;
pub mod units;
