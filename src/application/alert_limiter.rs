// Per-asset alert de-duplication window
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

/// Remembers when each asset was last notified and suppresses repeats
/// inside the cooldown window.
#[derive(Debug, Clone)]
pub struct AlertLimiter {
    cooldown: Duration,
    last_notified: HashMap<String, DateTime<Utc>>,
}

impl AlertLimiter {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_notified: HashMap::new(),
        }
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// True when `asset_id` may be notified at `now`; the attempt is then
    /// recorded as the asset's latest notification.
    pub fn should_notify(&mut self, asset_id: &str, now: DateTime<Utc>) -> bool {
        if let Some(last) = self.last_notified.get(asset_id) {
            if now - *last < self.cooldown {
                return false;
            }
        }
        self.last_notified.insert(asset_id.to_string(), now);
        true
    }

    /// Forget the notification recorded at `recorded_at`, e.g. when its
    /// delivery failed. A newer entry for the asset is kept.
    pub fn forget(&mut self, asset_id: &str, recorded_at: DateTime<Utc>) {
        if self.last_notified.get(asset_id) == Some(&recorded_at) {
            self.last_notified.remove(asset_id);
        }
    }

    pub fn reset(&mut self) {
        self.last_notified.clear();
    }
}
