use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::errors::{AppError, AppResult};

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_org")]
    pub organization: String,
    #[serde(default = "default_actor_role")]
    pub actor_role: String,
}

fn default_org() -> String {
    "default".to_string()
}

fn default_actor_role() -> String {
    "member".to_string()
}

impl Default for Config {
    fn default() -> Self {
        let db_path = Self::database_file();
        Self {
            database: db_path.to_string_lossy().to_string(),
            organization: default_org(),
            actor_role: default_actor_role(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("checkrota")
        } else if let Some(home) = dirs::home_dir() {
            home.join(".checkrota")
        } else {
            PathBuf::from(".checkrota")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("checkrota.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("checkrota.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> Self {
        let path = Self::config_file();

        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
                Err(_) => Config::default(),
            }
        } else {
            Config::default()
        }
    }

    /// Persist the configuration, creating the directory if needed.
    pub fn save(&self) -> AppResult<()> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let yaml = serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)?;
        fs::write(Self::config_file(), yaml).map_err(|_| AppError::ConfigSave)?;
        Ok(())
    }

    /// Prepare the config directory and file for `init`. In test mode the
    /// config file is left untouched so tests never disturb a real setup.
    pub fn init_all(custom_db: Option<String>, test: bool) -> AppResult<Config> {
        let mut cfg = Config::load();
        if let Some(db) = custom_db {
            cfg.database = db;
        }
        if !test {
            cfg.save()?;
        }
        Ok(cfg)
    }

    /// Verify the loaded config has usable values.
    pub fn check(&self) -> AppResult<()> {
        if self.database.trim().is_empty() {
            return Err(AppError::Config("database path is empty".into()));
        }
        if self.organization.trim().is_empty() {
            return Err(AppError::Config("organization is empty".into()));
        }
        Ok(())
    }
}
