use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    #[serde(default = "default_num_threads")]
    pub num_threads: usize,
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Secret used to sign access tokens. Required, never logged.
    pub secret: String,
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
    #[serde(default = "default_max_login_attempts")]
    pub max_login_attempts_per_minute: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_console")]
    pub console: bool,
}

// Default value functions
fn default_num_threads() -> usize {
    num_cpus::get()
}

fn default_request_timeout() -> u64 {
    10
}

fn default_bcrypt_cost() -> u32 {
    10
}

fn default_max_login_attempts() -> u32 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_console() -> bool {
    false
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let mut config: Config = toml::from_str(&content)
            .context("Failed to parse config file")?;

        // 0 means "use every CPU", resolved here so the runtime builder
        // never sees a zero worker count
        if config.server.num_threads == 0 {
            config.server.num_threads = num_cpus::get();
        }

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            bail!("Server port must be greater than 0");
        }

        if self.server.request_timeout == 0 {
            bail!("request_timeout must be greater than 0");
        }

        if self.auth.secret.is_empty() {
            bail!("auth secret must not be empty");
        }

        // bcrypt rejects costs outside this range at hash time
        if !(4..=31).contains(&self.auth.bcrypt_cost) {
            bail!(
                "bcrypt_cost must be between 4 and 31, got {}",
                self.auth.bcrypt_cost
            );
        }

        if self.auth.max_login_attempts_per_minute == 0 {
            bail!("max_login_attempts_per_minute must be greater than 0");
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            bail!(
                "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                self.logging.level
            );
        }

        let valid_formats = ["json", "console"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            bail!(
                "Invalid log format '{}'. Must be one of: json, console",
                self.logging.format
            );
        }

        Ok(())
    }
}
