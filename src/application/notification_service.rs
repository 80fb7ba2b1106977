// Notification service - Threshold alerts with per-asset de-duplication
use crate::application::alert_limiter::AlertLimiter;
use crate::domain::asset::{Asset, Sensor};
use crate::domain::severity::SeverityLevel;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl AlertLevel {
    pub fn from_severity(severity: SeverityLevel) -> Self {
        match severity {
            SeverityLevel::A => AlertLevel::Low,
            SeverityLevel::B => AlertLevel::Medium,
            SeverityLevel::C => AlertLevel::High,
            SeverityLevel::D => AlertLevel::Critical,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceAlert {
    pub id: String,
    pub asset_id: String,
    pub asset_name: String,
    pub sensor_id: String,
    pub level: AlertLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl MaintenanceAlert {
    pub fn threshold_violation(asset: &Asset, sensor: &Sensor, now: DateTime<Utc>) -> Self {
        Self {
            id: format!("alert-{}-{}", asset.id, now.timestamp_millis()),
            asset_id: asset.id.clone(),
            asset_name: asset.name.clone(),
            sensor_id: sensor.id.clone(),
            level: AlertLevel::from_severity(asset.severity()),
            message: format!(
                "{} at {}: {} reads {}{} above alarm limit {}{} (severity {})",
                asset.name,
                asset.location,
                sensor.label,
                sensor.current_value(),
                sensor.unit,
                sensor.threshold_max,
                sensor.unit,
                asset.severity().code(),
            ),
            timestamp: now,
        }
    }
}

/// Delivery channel for alerts.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, alert: &MaintenanceAlert) -> anyhow::Result<()>;
}

#[derive(Clone)]
pub struct AlertService {
    notifier: Arc<dyn Notifier>,
    limiter: Arc<Mutex<AlertLimiter>>,
}

impl AlertService {
    pub fn new(notifier: Arc<dyn Notifier>, limiter: AlertLimiter) -> Self {
        Self {
            notifier,
            limiter: Arc::new(Mutex::new(limiter)),
        }
    }

    /// Raise an alert when `sensor` is over its alarm limit, unless the asset
    /// was already notified inside the cooldown window.
    pub async fn check_threshold(
        &self,
        asset: &Asset,
        sensor: &Sensor,
        now: DateTime<Utc>,
    ) -> Option<MaintenanceAlert> {
        if !sensor.exceeds_threshold() {
            return None;
        }

        {
            let mut limiter = self.limiter.lock().await;
            if !limiter.should_notify(&asset.id, now) {
                tracing::debug!(
                    asset_id = %asset.id,
                    sensor_id = %sensor.id,
                    cooldown_secs = limiter.cooldown().num_seconds(),
                    "Alert suppressed by cooldown"
                );
                return None;
            }
        }

        let alert = MaintenanceAlert::threshold_violation(asset, sensor, now);
        match self.notifier.send(&alert).await {
            Ok(()) => Some(alert),
            Err(e) => {
                tracing::error!(asset_id = %asset.id, error = %e, "Failed to deliver alert");
                self.limiter.lock().await.forget(&asset.id, now);
                None
            }
        }
    }
}
