use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::domain::{AppConfig, DomainError};
use crate::ports::ConfigStore;

/// TOML-based configuration store with OS-specific paths.
pub struct TomlConfigStore {
    data_dir: PathBuf,
}

impl TomlConfigStore {
    /// Create a new TomlConfigStore.
    /// Uses OS-specific application data directories.
    pub fn new() -> Result<Self, DomainError> {
        let data_dir = Self::get_data_dir()?;
        fs::create_dir_all(&data_dir)?;

        info!(data_dir = ?data_dir, "ConfigStore initialized");

        Ok(Self { data_dir })
    }

    /// The OS-specific application data directory.
    /// - macOS: ~/Library/Application Support/Vaani/
    /// - Windows: %APPDATA%\Vaani\
    /// - Linux: ~/.config/Vaani/
    fn get_data_dir() -> Result<PathBuf, DomainError> {
        #[cfg(target_os = "macos")]
        let base = dirs::data_dir();

        #[cfg(not(target_os = "macos"))]
        let base = dirs::config_dir();

        base.map(|p| p.join("Vaani")).ok_or_else(|| {
            DomainError::Config("Could not find application data directory".to_string())
        })
    }
}

impl ConfigStore for TomlConfigStore {
    fn load(&self) -> Result<AppConfig, DomainError> {
        let config_path = self.config_path();

        if config_path.exists() {
            debug!(path = ?config_path, "Loading configuration");
            let content = fs::read_to_string(&config_path)?;
            let config: AppConfig = toml::from_str(&content)?;
            info!(path = ?config_path, "Configuration loaded");
            Ok(config)
        } else {
            info!(path = ?config_path, "Configuration file not found, creating default");
            let config = AppConfig::new();
            self.save(&config)?;
            Ok(config)
        }
    }

    fn save(&self, config: &AppConfig) -> Result<(), DomainError> {
        let config_path = self.config_path();

        let content = toml::to_string_pretty(config)?;
        fs::write(&config_path, content)?;

        info!(path = ?config_path, "Configuration saved");
        Ok(())
    }

    fn config_path(&self) -> PathBuf {
        self.data_dir.join("config.toml")
    }

    fn logs_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}
