use anyhow::Context;
use chrono::TimeDelta;
use serde::Deserialize;

pub const CONFIG_FILE: &str = "config/app";
pub const ENV_PREFIX: &str = "RELIABILITY";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub alerts: AlertSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
    #[serde(default)]
    pub seed: SeedSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AlertSettings {
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: u64,
    #[serde(default)]
    pub recipient: String,
}

impl AlertSettings {
    pub fn cooldown(&self) -> anyhow::Result<TimeDelta> {
        i64::try_from(self.cooldown_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .with_context(|| format!("alerts.cooldown_secs {} is out of range", self.cooldown_secs))
    }
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            cooldown_secs: default_cooldown_secs(),
            recipient: String::new(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelemetrySettings {
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeedSettings {
    #[serde(default = "default_true")]
    pub demo_assets: bool,
}

impl Default for SeedSettings {
    fn default() -> Self {
        Self { demo_assets: true }
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_cooldown_secs() -> u64 {
    300
}

fn default_history_limit() -> usize {
    40
}

fn default_true() -> bool {
    true
}

/// Load `config/app.toml` (optional) overlaid with `RELIABILITY__*` env vars,
/// e.g. `RELIABILITY__SERVER__BIND_ADDR=127.0.0.1:9000`.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(CONFIG_FILE).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let cfg: AppConfig = settings.try_deserialize()?;
    cfg.validate()?;
    Ok(cfg)
}

impl AppConfig {
    /// Reject values that would only fail later, at first use.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.telemetry.history_limit > 0,
            "telemetry.history_limit must be at least 1"
        );
        self.alerts.cooldown()?;
        Ok(())
    }
}
