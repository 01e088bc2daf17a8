use std::{net::SocketAddr, path::Path, time::Duration};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

mod logging;

pub use config::ConfigError;
pub use logging::setup_logging;

pub type AppConfig = TranscriptConfig;

pub const CONFIG_DIR: &str = "config";
pub const ENV_PREFIX: &str = "TRANSCRIPT_SERVICE";
pub const DEVELOPMENT_ENV: &str = "development";
const DEFAULT_RUN_ENV: &str = "production";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default = "default_run_env")]
    pub run_env: String,
    #[serde(default)]
    pub service: ServiceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Compact,
    Pretty,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub captions: CaptionsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptionsConfig {
    #[serde(default = "default_captions_base_url")]
    pub base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Zero leaves the outbound call without a local timeout.
    #[serde(default)]
    pub request_timeout_secs: u64,
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            run_env: default_run_env(),
            service: ServiceConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_secs: default_window_secs(),
            max_requests: default_max_requests(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

impl Default for CaptionsConfig {
    fn default() -> Self {
        Self {
            base_url: default_captions_base_url(),
            user_agent: default_user_agent(),
            request_timeout_secs: 0,
        }
    }
}

impl TranscriptConfig {
    pub fn is_development(&self) -> bool {
        self.run_env.eq_ignore_ascii_case(DEVELOPMENT_ENV)
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

impl RateLimitConfig {
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs.max(1))
    }
}

impl CaptionsConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

/// Loads configuration for the environment named by `RUN_ENV`.
///
/// Precedence, lowest first: defaults, `config/default.toml`,
/// `config/{RUN_ENV}.toml`, `TRANSCRIPT_SERVICE__*` variables, `PORT`.
pub fn load_config() -> Result<TranscriptConfig, ConfigError> {
    let run_env = std::env::var("RUN_ENV").unwrap_or_else(|_| default_run_env());
    let port = std::env::var("PORT").ok().filter(|port| !port.is_empty());
    load_config_from(Path::new(CONFIG_DIR), &run_env, port)
}

pub fn load_config_from(
    config_dir: &Path,
    run_env: &str,
    port_override: Option<String>,
) -> Result<TranscriptConfig, ConfigError> {
    load_layers(config_dir, run_env, port_override, service_environment())
}

fn service_environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
}

fn load_layers(
    config_dir: &Path,
    run_env: &str,
    port_override: Option<String>,
    environment: Environment,
) -> Result<TranscriptConfig, ConfigError> {
    Config::builder()
        .add_source(Config::try_from(&TranscriptConfig::default())?)
        .add_source(File::from(config_dir.join("default")).required(false))
        .add_source(File::from(config_dir.join(run_env)).required(false))
        .add_source(environment)
        .set_override("run_env", run_env)?
        .set_override_option("server.port", port_override)?
        .build()?
        .try_deserialize()
}

fn default_run_env() -> String {
    DEFAULT_RUN_ENV.to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3004
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

fn default_window_secs() -> u64 {
    15 * 60
}

fn default_max_requests() -> u32 {
    100
}

fn default_sweep_interval_secs() -> u64 {
    60
}

fn default_captions_base_url() -> String {
    "https://www.youtube.com".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/120.0.0.0 Safari/537.36"
        .to_string()
}
