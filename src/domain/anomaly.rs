// Z-score anomaly flagging over a sensor history
use super::asset::SensorReading;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const Z_SCORE_LIMIT: f64 = 2.5;
pub const MIN_SAMPLES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    pub anomaly_score: f64,
    pub is_anomaly: bool,
}

/// Score every reading against the population mean and deviation of the
/// whole history. Short histories are returned unscored.
pub fn score_history(history: &[SensorReading]) -> Vec<AnomalyPoint> {
    if history.len() < MIN_SAMPLES {
        return history
            .iter()
            .map(|r| AnomalyPoint {
                timestamp: r.timestamp,
                value: r.value,
                anomaly_score: 0.0,
                is_anomaly: false,
            })
            .collect();
    }

    let n = history.len() as f64;
    let mean = history.iter().map(|r| r.value).sum::<f64>() / n;
    let variance = history.iter().map(|r| (r.value - mean).powi(2)).sum::<f64>() / n;
    let std_dev = match variance.sqrt() {
        sd if sd > 0.0 => sd,
        _ => 1.0,
    };

    history
        .iter()
        .map(|r| {
            let z = ((r.value - mean) / std_dev).abs();
            AnomalyPoint {
                timestamp: r.timestamp,
                value: r.value,
                anomaly_score: z,
                is_anomaly: z > Z_SCORE_LIMIT,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn series(values: &[f64]) -> Vec<SensorReading> {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, v)| SensorReading::new(start + Duration::hours(i as i64), *v))
            .collect()
    }

    #[test]
    fn test_short_history_is_unscored() {
        let points = score_history(&series(&[1.0, 50.0, 1.0, 1.0]));
        assert_eq!(points.len(), 4);
        assert!(points.iter().all(|p| p.anomaly_score == 0.0 && !p.is_anomaly));
    }

    #[test]
    fn test_spike_is_flagged() {
        let mut values = vec![1.0; 19];
        values.push(10.0);
        let points = score_history(&series(&values));
        let flagged: Vec<usize> = points
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_anomaly)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(flagged, vec![19]);
    }

    #[test]
    fn test_flat_history_uses_unit_deviation() {
        let points = score_history(&series(&[2.0; 6]));
        assert!(points.iter().all(|p| p.anomaly_score == 0.0));
    }
}
