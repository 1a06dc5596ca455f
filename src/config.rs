use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub places: PlacesConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database filename inside the data directory
    pub filename: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacesConfig {
    /// Base URL of the upstream places search API
    pub api_base_url: String,
    /// Server-held API key; empty means the upstream fallback is disabled
    #[serde(default)]
    pub api_key: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// Default search radius in meters when the caller omits one
    pub default_radius_meters: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Session lifetime in days
    pub session_ttl_days: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_days: 30,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                filename: "waypost.db".to_string(),
            },
            places: PlacesConfig {
                api_base_url: "https://maps.googleapis.com/maps/api/place".to_string(),
                api_key: String::new(),
                timeout_seconds: 10,
                default_radius_meters: 500.0,
            },
            auth: AuthConfig::default(),
        }
    }
}

impl Config {
    /// Load the config from disk, writing the defaults on first run
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            let default_config = Self::default();
            default_config.save(path)?;
            return Ok(default_config);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path))?;

        config.validate()?;

        Ok(config)
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))?;

        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.places.api_base_url.is_empty() {
            return Err(anyhow::anyhow!("places.api_base_url is required in config"));
        }
        if self.places.timeout_seconds == 0 {
            return Err(anyhow::anyhow!(
                "places.timeout_seconds must be greater than zero"
            ));
        }
        if self.places.default_radius_meters <= 0.0 {
            return Err(anyhow::anyhow!(
                "places.default_radius_meters must be positive"
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_writes_defaults_on_first_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let path_str = path.to_str().unwrap();

        let config = Config::load(path_str).unwrap();
        assert!(path.exists());
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.places.default_radius_meters, 500.0);

        // Second load reads the file it just wrote
        let reloaded = Config::load(path_str).unwrap();
        assert_eq!(reloaded.server.host, config.server.host);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.places.timeout_seconds = 0;
        config.save(path.to_str().unwrap()).unwrap();

        assert!(Config::load(path.to_str().unwrap()).is_err());
    }
}
