// Asset and sensor domain models
use super::criticality::CriticalityAssessment;
use super::fmeca::{self, FailureMode};
use super::severity::{self, SeverityLevel};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorType {
    Vibration,
    Temperature,
    Flow,
    Pressure,
    Current,
    Ultrasound,
}

impl SensorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SensorType::Vibration => "vibration",
            SensorType::Temperature => "temperature",
            SensorType::Flow => "flow",
            SensorType::Pressure => "pressure",
            SensorType::Current => "current",
            SensorType::Ultrasound => "ultrasound",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Continuous,
    Periodic,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

impl SensorReading {
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetStatus {
    #[default]
    Operational,
    Warning,
    Critical,
    Maintenance,
}

impl AssetStatus {
    pub fn from_severity(severity: SeverityLevel) -> Self {
        match severity {
            SeverityLevel::D => AssetStatus::Critical,
            SeverityLevel::C => AssetStatus::Warning,
            SeverityLevel::A | SeverityLevel::B => AssetStatus::Operational,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sensor {
    pub id: String,
    #[serde(rename = "type")]
    pub sensor_type: SensorType,
    #[serde(default)]
    pub label: String,
    pub unit: String,
    #[serde(default)]
    pub threshold_min: f64,
    pub threshold_max: f64,
    pub data_source: DataSource,
    #[serde(default)]
    current_value: f64,
    #[serde(default)]
    history: Vec<SensorReading>,
}

impl Sensor {
    pub fn new(
        id: impl Into<String>,
        sensor_type: SensorType,
        unit: impl Into<String>,
        threshold_max: f64,
        data_source: DataSource,
    ) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            sensor_type,
            unit: unit.into(),
            threshold_min: 0.0,
            threshold_max,
            data_source,
            current_value: 0.0,
            history: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn current_value(&self) -> f64 {
        self.current_value
    }

    pub fn history(&self) -> &[SensorReading] {
        &self.history
    }

    pub fn is_vibration(&self) -> bool {
        self.sensor_type == SensorType::Vibration
    }

    pub fn exceeds_threshold(&self) -> bool {
        self.current_value > self.threshold_max
    }

    /// Insert a reading in timestamp order, keeping at most `limit` readings
    /// (at least one; oldest dropped). `current_value` follows the newest
    /// reading, so a late-arriving old sample never replaces it.
    pub fn push_reading(&mut self, reading: SensorReading, limit: usize) {
        let at = self
            .history
            .partition_point(|r| r.timestamp <= reading.timestamp);
        self.history.insert(at, reading);

        let limit = limit.max(1);
        if self.history.len() > limit {
            let excess = self.history.len() - limit;
            self.history.drain(..excess);
        }
        self.sync_current_value();
    }

    /// Swap in an imported series; an empty series reads as 0.
    pub fn replace_history(&mut self, mut readings: Vec<SensorReading>) {
        readings.sort_by_key(|r| r.timestamp);
        self.current_value = readings.last().map(|r| r.value).unwrap_or(0.0);
        self.history = readings;
    }

    fn sync_current_value(&mut self) {
        self.history.sort_by_key(|r| r.timestamp);
        if let Some(last) = self.history.last() {
            self.current_value = last.value;
        }
    }

    pub fn classify(&self) -> SeverityLevel {
        severity::classify(self.current_value, &self.unit)
    }
}

/// A monitored machine.
///
/// `severity`, `health_score` and `status` are derived from the vibration
/// sensors and only change through [`Asset::recompute_condition`]. Incoming
/// JSON values for them are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub mtbf: f64,
    #[serde(default)]
    pub mttr: f64,
    #[serde(default)]
    pub sensors: Vec<Sensor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criticality: Option<CriticalityAssessment>,
    #[serde(default)]
    fmeca: Vec<FailureMode>,
    #[serde(default)]
    pub in_maintenance: bool,
    #[serde(skip_deserializing)]
    severity: SeverityLevel,
    #[serde(skip_deserializing)]
    health_score: u8,
    #[serde(skip_deserializing)]
    status: AssetStatus,
}

impl Asset {
    pub fn new(id: impl Into<String>, name: impl Into<String>, location: impl Into<String>) -> Self {
        let mut asset = Self {
            id: id.into(),
            name: name.into(),
            location: location.into(),
            mtbf: 0.0,
            mttr: 0.0,
            sensors: Vec::new(),
            criticality: None,
            fmeca: Vec::new(),
            in_maintenance: false,
            severity: SeverityLevel::A,
            health_score: 0,
            status: AssetStatus::Operational,
        };
        asset.recompute_condition();
        asset
    }

    pub fn severity(&self) -> SeverityLevel {
        self.severity
    }

    pub fn health_score(&self) -> u8 {
        self.health_score
    }

    pub fn status(&self) -> AssetStatus {
        self.status
    }

    pub fn fmeca(&self) -> &[FailureMode] {
        &self.fmeca
    }

    /// Replace the FMECA worksheet, rederiving every RPN.
    pub fn set_fmeca(&mut self, modes: Vec<FailureMode>) {
        self.fmeca = modes.into_iter().map(fmeca::recompute).collect();
    }

    pub fn sensor(&self, id: &str) -> Option<&Sensor> {
        self.sensors.iter().find(|s| s.id == id)
    }

    /// Bring every derived field back in line with its sources. Used after
    /// an asset arrives from outside (store document, request body).
    pub fn normalize(&mut self) {
        for sensor in &mut self.sensors {
            sensor.sync_current_value();
        }
        let modes = std::mem::take(&mut self.fmeca);
        self.set_fmeca(modes);
        self.recompute_condition();
    }

    /// Worst classification over the vibration sensors, each in its own unit.
    pub fn recompute_condition(&mut self) {
        let severity = severity::worst(
            self.sensors
                .iter()
                .filter(|s| s.is_vibration())
                .map(Sensor::classify),
        );
        self.severity = severity;
        self.health_score = severity.health_score();
        self.status = if self.in_maintenance {
            AssetStatus::Maintenance
        } else {
            AssetStatus::from_severity(severity)
        };
    }

    /// Feed a live reading to the continuous sensor of `sensor_type`,
    /// creating it on first contact. Returns the index of the sensor.
    pub fn record_live_reading(
        &mut self,
        sensor_type: SensorType,
        reading: SensorReading,
        history_limit: usize,
    ) -> usize {
        let idx = match self
            .sensors
            .iter()
            .position(|s| s.sensor_type == sensor_type && s.data_source == DataSource::Continuous)
        {
            Some(idx) => idx,
            None => {
                let unit = if sensor_type == SensorType::Vibration {
                    "mm/s"
                } else {
                    "°C"
                };
                let sensor = Sensor::new(
                    format!("IOT-{}", sensor_type.as_str().to_uppercase()),
                    sensor_type,
                    unit,
                    4.5,
                    DataSource::Continuous,
                )
                .with_label(format!("{} (Online)", sensor_type.as_str()));
                self.sensors.push(sensor);
                self.sensors.len() - 1
            }
        };

        self.sensors[idx].push_reading(reading, history_limit);
        self.recompute_condition();
        idx
    }

    /// Load an imported trend into the periodic vibration sensor for a
    /// measurement point. Returns the index of the sensor.
    pub fn import_trend(&mut self, point_tag: &str, unit: &str, readings: Vec<SensorReading>) -> usize {
        let sensor_id = format!("{}_{}", point_tag, unit);
        let idx = match self
            .sensors
            .iter()
            .position(|s| s.id == sensor_id && s.data_source == DataSource::Periodic)
        {
            Some(idx) => idx,
            None => {
                let threshold_max = if unit == "G" { 3.0 } else { 4.5 };
                let sensor = Sensor::new(
                    sensor_id,
                    SensorType::Vibration,
                    unit,
                    threshold_max,
                    DataSource::Periodic,
                )
                .with_label(format!("{} ({})", point_tag, unit));
                self.sensors.push(sensor);
                self.sensors.len() - 1
            }
        };

        self.sensors[idx].replace_history(readings);
        self.recompute_condition();
        idx
    }
}
