use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application data directory (session cache, local fallback store)
    pub data_dir: PathBuf,

    /// Remote persistence backend
    #[serde(default)]
    pub drive: DriveConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriveConfig {
    /// Base URL of the drive proxy endpoint
    pub api_base_url: String,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://travelbook.vercel.app/api/drive".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("travelbook");

        Self {
            data_dir,
            drive: DriveConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let contents =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.drive.api_base_url).with_context(|| {
            format!("Invalid drive.api_base_url: {}", self.drive.api_base_url)
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            anyhow::bail!(
                "drive.api_base_url must use http or https, got: {}",
                url.scheme()
            );
        }
        if url.host().is_none() {
            anyhow::bail!("drive.api_base_url must have a host");
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(&config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("travelbook");

        Ok(config_dir.join("config.toml"))
    }
}
