use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration build error: {0}")]
    Build(#[from] config::ConfigError),
    #[error("Invalid configuration: {0}")]
    Validation(String),
}

#[derive(Clone, Debug, Deserialize)]
pub struct AlarmConfig {
    /// Run the background dispatcher that turns due alarms into notifications.
    #[serde(default = "default_alarms_enabled")]
    pub enabled: bool,
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

impl Default for AlarmConfig {
    fn default() -> Self {
        Self {
            enabled: default_alarms_enabled(),
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    /// Without a database the service still starts, but every query comes back empty.
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    #[serde(default)]
    pub alarms: AlarmConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            listen_addr: default_listen_addr(),
            alarms: AlarmConfig::default(),
        }
    }
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_alarms_enabled() -> bool {
    true
}

fn default_poll_interval_secs() -> u64 {
    60
}

impl AppConfig {
    /// Deserialize and validate an already built configuration.
    pub fn from_config(cfg: config::Config) -> Result<Self, ConfigError> {
        let app: AppConfig = cfg.try_deserialize()?;

        if app.alarms.poll_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "alarms.poll_interval_secs must be > 0".into(),
            ));
        }
        if app.database_url.as_deref().is_some_and(|url| url.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "database_url must not be empty when set".into(),
            ));
        }

        Ok(app)
    }
}

/// Load application configuration from `config.yaml` + environment overrides.
///
/// The file is optional. Environment variables use the key path separated by
/// double underscores without a prefix, e.g. `ALARMS__POLL_INTERVAL_SECS=30`.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    use config::{Config, Environment, File};
    let cfg = Config::builder()
        .add_source(File::with_name("config.yaml").required(false))
        .add_source(Environment::default().separator("__"))
        .build()?;

    AppConfig::from_config(cfg)
}

/// Convenience helper for binaries wanting panic-on-error behaviour.
pub fn load_config_or_panic() -> AppConfig {
    match load_config() {
        Ok(c) => c,
        Err(e) => panic!("Failed to load configuration: {e}"),
    }
}
