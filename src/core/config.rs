use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::PathBuf, time::Duration};
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.freecurrencyapi.com";
pub const DEFAULT_OUTPUT_PATH: &str =
    "app/src/commonMain/composeResources/files/exchange_rates.json";
/// Environment variable consulted when no key is configured explicitly.
pub const API_KEY_ENV: &str = "CURRENCY_EXCHANGE_API_KEY";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProviderConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub timeout_secs: Option<u64>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

impl ProviderConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub output_path: Option<String>,
    #[serde(default)]
    pub provider: ProviderConfig,
}

// Hand-written so the key never ends up in debug logs.
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("output_path", &self.output_path)
            .field("provider", &self.provider)
            .finish()
    }
}

impl AppConfig {
    /// Loads the config from the default location, falling back to defaults
    /// when no file has been set up yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "xrate", "xrate")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// Destination of the rate document, relative paths resolve against the
    /// working directory.
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(self.output_path.as_deref().unwrap_or(DEFAULT_OUTPUT_PATH))
    }

    /// Resolves the provider credential from the config, then the environment.
    pub fn resolve_api_key(&self) -> Result<String> {
        self.resolve_api_key_with(std::env::var(API_KEY_ENV).ok())
    }

    pub fn resolve_api_key_with(&self, env_value: Option<String>) -> Result<String> {
        let key = self
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| env_value.filter(|k| !k.trim().is_empty()));

        match key {
            Some(key) => Ok(key.trim().to_string()),
            None => bail!(
                "API key is not configured. Set `api_key` in the config file, pass --api-key or export {API_KEY_ENV}"
            ),
        }
    }
}
