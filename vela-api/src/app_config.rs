use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub guard: GuardConfig,
    pub business_rules: BusinessRules,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GuardConfig {
    pub window_ms: i64,
    pub max_requests: u32,
    pub csrf_ttl_seconds: i64,
    #[serde(default = "default_token_length")]
    pub csrf_token_length: usize,
    pub csrf_header: String,
    pub session_header: String,
    pub sweep_interval_seconds: u64,
    pub allowed_origins: Vec<String>,
}

fn default_token_length() -> usize {
    32
}

#[derive(Debug, Deserialize, Clone)]
pub struct BusinessRules {
    /// Flat platform-wide tax rate. Intentionally a single knob until
    /// per-jurisdiction rates land.
    pub tax_rate: f64,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Environment-specific overrides, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `VELA__SERVER__PORT=9000`
            .add_source(config::Environment::with_prefix("VELA").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
