/// Command-line tool configuration
use crate::error::{CtlError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file read when `--config` is not given and the file exists
pub const DEFAULT_CONFIG_FILE: &str = "encore.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CtlConfig {
    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_autosave")]
    pub autosave: AutosaveSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AutosaveSettings {
    /// Title stored on the rolling autosave row
    #[serde(default = "default_autosave_title")]
    pub title: String,
}

impl CtlConfig {
    /// Load configuration from file and environment
    ///
    /// `path` must exist when given; otherwise `encore.toml` is read if
    /// present. Variables such as `ENCORE_STORAGE__DATABASE_URL` override
    /// the file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CtlError::Config(format!(
                        "config file {} does not exist",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (prefixed with ENCORE_)
        settings = settings.add_source(
            config::Environment::with_prefix("ENCORE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        Ok(settings.build()?.try_deserialize()?)
    }

    /// Parse configuration from TOML text, without environment overrides
    pub fn from_toml(text: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(text, config::FileFormat::Toml))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.storage.database_url.trim().is_empty() {
            return Err(CtlError::Config(
                "database URL is required (set ENCORE_STORAGE__DATABASE_URL)".to_string(),
            ));
        }

        if self.storage.max_connections == 0 {
            return Err(CtlError::Config(
                "storage.max_connections must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
        max_connections: default_max_connections(),
    }
}

fn default_database_url() -> String {
    "sqlite://encore-state.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_autosave() -> AutosaveSettings {
    AutosaveSettings {
        title: default_autosave_title(),
    }
}

fn default_autosave_title() -> String {
    encore_core::AUTOSAVE_TITLE.to_string()
}

impl Default for CtlConfig {
    fn default() -> Self {
        Self {
            storage: default_storage(),
            autosave: default_autosave(),
        }
    }
}
