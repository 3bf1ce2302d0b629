use crate::errors::{OnboardError, OnboardResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Backend used when nothing is configured (local development server)
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

/// Employee record the demo backend seeds
pub const DEFAULT_EMPLOYEE_ID: &str = "E123";

/// Configuration for the onboarding assistant client
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OnboardConfig {
    pub api_base_url: Option<String>,
    pub employee_id: Option<String>,
    pub log_level: Option<String>,
}

impl Default for OnboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: Some(DEFAULT_API_BASE_URL.to_string()),
            employee_id: Some(DEFAULT_EMPLOYEE_ID.to_string()),
            log_level: None,
        }
    }
}

impl OnboardConfig {
    /// Loads configuration from a file if it exists, otherwise returns the default config
    pub fn load_from_file(path: &Path) -> OnboardResult<Self> {
        if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| {
                OnboardError::ConfigError(format!("Failed to read config file: {}", e))
            })?;

            let config: Self = toml::from_str(&content).map_err(|e| {
                OnboardError::ConfigError(format!("Failed to parse config file: {}", e))
            })?;

            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Saves configuration to a file
    pub fn save_to_file(&self, path: &Path) -> OnboardResult<()> {
        let content = toml::to_string(self).map_err(|e| {
            OnboardError::ConfigError(format!("Failed to serialize config: {}", e))
        })?;

        // Ensure the directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                OnboardError::ConfigError(format!("Failed to create config directory: {}", e))
            })?;
        }

        fs::write(path, content).map_err(|e| {
            OnboardError::ConfigError(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Loads the config from the default file location, falling back to the
    /// built-in defaults when the file is missing or malformed. Resolved once
    /// at startup.
    pub fn load() -> Self {
        let path = match get_default_config_file("onboard-cli") {
            Ok(path) => path,
            Err(_) => return Self::default(),
        };
        match Self::load_from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, path = %path.display(), "ignoring unreadable config file");
                Self::default()
            }
        }
    }

    /// Merges this config with another config, preferring values from the other config if present
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            api_base_url: other
                .api_base_url
                .clone()
                .or_else(|| self.api_base_url.clone()),
            employee_id: other
                .employee_id
                .clone()
                .or_else(|| self.employee_id.clone()),
            log_level: other.log_level.clone().or_else(|| self.log_level.clone()),
        }
    }

    /// Base URL with the built-in default applied
    pub fn api_base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL)
    }

    /// Employee id with the built-in default applied
    pub fn employee_id(&self) -> &str {
        self.employee_id.as_deref().unwrap_or(DEFAULT_EMPLOYEE_ID)
    }
}

/// Helper function to get default config directory
pub fn get_default_config_dir(app_name: &str) -> OnboardResult<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        OnboardError::ConfigError("Could not determine home directory".to_string())
    })?;

    let config_dir = home_dir.join(".config").join(app_name);

    Ok(config_dir)
}

/// Helper function to get default config file path
pub fn get_default_config_file(app_name: &str) -> OnboardResult<PathBuf> {
    let config_dir = get_default_config_dir(app_name)?;
    Ok(config_dir.join("config.toml"))
}
