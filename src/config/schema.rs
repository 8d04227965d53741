use crate::error::ConfigError;
use crate::selection::{BillingPlan, PerformanceTier};
use anyhow::{Context, Result};
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Catalog API base URL baked in at build time, if the builder provided one.
pub const DEFAULT_API_BASE_URL: &str = match option_env!("GAMEHOST_API_BASE_URL") {
    Some(url) => url,
    None => "https://api.gamehost.example",
};

/// Hosting provider's checkout link builder.
pub const DEFAULT_CHECKOUT_URL: &str = "https://checkout.gamehost.example/";

// ── Top-level config ──────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the catalog API (`games.json`, `locations.json`).
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
    /// Checkout link builder endpoint.
    #[serde(default = "default_checkout_url")]
    pub checkout_url: String,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.into()
}

fn default_checkout_url() -> String {
    DEFAULT_CHECKOUT_URL.into()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            checkout_url: default_checkout_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    concat!("gamehost/", env!("CARGO_PKG_VERSION")).into()
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Starting plan and tier for a fresh selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default)]
    pub plan: BillingPlan,
    #[serde(default)]
    pub tier: PerformanceTier,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// "trace" | "debug" | "info" | "warn" | "error"
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "warn".into()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

// ── Loading / saving ──────────────────────────────────────────────

impl Config {
    /// Load `~/.gamehost/config.toml`, falling back to defaults when the
    /// file does not exist. Environment overrides are applied last.
    pub fn load_or_default() -> Result<Self> {
        let mut config = Self::load_from(&Self::default_path()?)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// `~/.gamehost/config.toml`. Nothing is read.
    pub fn default_path() -> Result<PathBuf> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        Ok(home.join(".gamehost").join("config.toml"))
    }

    /// Write a default config to `path` without parsing what is there, so a
    /// broken file can be replaced. An existing file is kept unless `force`.
    pub fn write_default(path: &Path, force: bool) -> Result<Self> {
        if path.exists() && !force {
            return Err(ConfigError::Load(format!(
                "{} already exists (use --force to overwrite)",
                path.display()
            ))
            .into());
        }
        let config = Config {
            config_path: path.to_path_buf(),
            ..Config::default()
        };
        config.save()?;
        Ok(config)
    }

    /// Load a config file without touching the environment.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = fs::read_to_string(path).context("Failed to read config file")?;
            toml::from_str::<Config>(&contents)
                .map_err(|e| ConfigError::Load(e.to_string()))
                .context("Failed to parse config file")?
        } else {
            Config::default()
        };
        config.config_path = path.to_path_buf();
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("GAMEHOST_API_BASE_URL") {
            if !url.is_empty() {
                self.api.base_url = url;
            }
        }

        if let Ok(url) = std::env::var("GAMEHOST_CHECKOUT_URL") {
            if !url.is_empty() {
                self.api.checkout_url = url;
            }
        }

        if let Ok(secs) = std::env::var("GAMEHOST_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse::<u64>() {
                if secs > 0 {
                    self.http.timeout_secs = secs;
                }
            }
        }

        if let Ok(level) = std::env::var("GAMEHOST_LOG_LEVEL") {
            if !level.is_empty() {
                self.observability.log_level = level;
            }
        }
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        validate_http_url("api.base_url", &self.api.base_url)?;
        validate_http_url("api.checkout_url", &self.api.checkout_url)?;
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "http.timeout_secs must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let toml_str = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&self.config_path, toml_str).context("Failed to write config file")?;
        Ok(())
    }
}

fn validate_http_url(key: &str, value: &str) -> std::result::Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::Validation(format!("{key} is not a valid URL: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation(format!(
            "{key} must use http or https, got {}",
            url.scheme()
        )));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(ConfigError::Validation(format!(
            "{key} must not carry a query string or fragment"
        )));
    }
    Ok(())
}
