use serde::Deserialize;
use std::fs;
use std::path::Path;

const ENV_CONFIG_PATH: &str = "CHILDGUARD_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

const ENV_JWT_SECRET: &str = "CHILDGUARD_JWT_SECRET";

/// Fallback secret for local development only
const DEFAULT_TOKEN_SECRET: &str = "childguard_secret_2024";
const DEFAULT_TOKEN_TTL_HOURS: i64 = 7 * 24;
const DEFAULT_ALERT_PREVIEW_LENGTH: usize = 150;

/// Token signing configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_token_secret")]
    pub token_secret: String,
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: default_token_secret(),
            token_ttl_hours: default_token_ttl_hours(),
        }
    }
}

/// Admin alert configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AlertConfig {
    /// Maximum characters of entry text included in an alert payload
    #[serde(default = "default_alert_preview_length")]
    pub preview_length: usize,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            preview_length: default_alert_preview_length(),
        }
    }
}

fn default_token_secret() -> String {
    DEFAULT_TOKEN_SECRET.to_string()
}

fn default_token_ttl_hours() -> i64 {
    DEFAULT_TOKEN_TTL_HOURS
}

fn default_alert_preview_length() -> usize {
    DEFAULT_ALERT_PREVIEW_LENGTH
}

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub auth: Option<AuthConfig>,
    #[serde(default)]
    pub alerts: Option<AlertConfig>,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub auth: AuthConfig,
    pub alerts: AlertConfig,
    pub port: u16,
    pub host: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auth: AuthConfig::default(),
            alerts: AlertConfig::default(),
            port: 8080,
            host: "127.0.0.1".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let config_path =
            std::env::var(ENV_CONFIG_PATH).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let file = Self::load_config_file(&config_path).unwrap_or_default();
        let mut auth = file.auth.unwrap_or_default();
        let alerts = file.alerts.unwrap_or_default();

        // Environment overrides the file for the secret
        if let Ok(secret) = std::env::var(ENV_JWT_SECRET) {
            if !secret.is_empty() {
                auth.token_secret = secret;
            }
        }

        Self {
            auth,
            alerts,
            port,
            host,
        }
    }

    /// Load configuration from YAML file
    fn load_config_file(path: &str) -> Option<ConfigFile> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => {
                // Handle empty file
                let contents = contents.trim();
                if contents.is_empty() {
                    tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
                    return Some(ConfigFile::default());
                }

                match serde_yaml::from_str(contents) {
                    Ok(config) => {
                        tracing::info!(path = %path.display(), "Loaded configuration from file");
                        Some(config)
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
                        None
                    }
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config file, using defaults");
                None
            }
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.auth.token_ttl_hours, 168);
        assert_eq!(config.alerts.preview_length, 150);
    }

    #[test]
    fn config_file_sections_are_optional() {
        let file: ConfigFile = serde_yaml::from_str("auth:\n  token_secret: s3cret\n").unwrap();
        let auth = file.auth.unwrap();
        assert_eq!(auth.token_secret, "s3cret");
        assert_eq!(auth.token_ttl_hours, 168);
        assert!(file.alerts.is_none());
    }
}
