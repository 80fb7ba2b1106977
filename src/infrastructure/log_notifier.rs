// Notifier that delivers alerts to the log
use crate::application::notification_service::{MaintenanceAlert, Notifier};
use async_trait::async_trait;

/// Writes each alert as a structured `warn` event. `recipient` is only
/// carried in the event for whoever tails the log.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier {
    recipient: Option<String>,
}

impl LogNotifier {
    pub fn new(recipient: Option<String>) -> Self {
        Self {
            recipient: recipient.filter(|r| !r.is_empty()),
        }
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, alert: &MaintenanceAlert) -> anyhow::Result<()> {
        tracing::warn!(
            alert_id = %alert.id,
            asset_id = %alert.asset_id,
            sensor_id = %alert.sensor_id,
            level = ?alert.level,
            recipient = self.recipient.as_deref().unwrap_or("-"),
            "{}",
            alert.message
        );
        Ok(())
    }
}
