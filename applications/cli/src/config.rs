/// Application configuration
use crate::error::{AppError, Result};
use delta_importer::{StageStrategy, StagingArea};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "delta-import.toml";

/// Prefix of environment variable overrides, e.g. `DELTA_LIBRARY_DIRECTORY`
pub const ENV_PREFIX: &str = "DELTA";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default = "default_staging")]
    pub staging: StagingSettings,

    #[serde(default = "default_legacy")]
    pub legacy: LegacySettings,

    #[serde(default = "default_library")]
    pub library: LibrarySettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StagingSettings {
    #[serde(default = "default_staging_directory")]
    pub directory: PathBuf,

    #[serde(default)]
    pub strategy: StageStrategy,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LegacySettings {
    /// Shared folder that files copied over via iTunes land in
    #[serde(default = "default_legacy_directory")]
    pub directory: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LibrarySettings {
    #[serde(default = "default_library_directory")]
    pub directory: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            staging: default_staging(),
            legacy: default_legacy(),
            library: default_library(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (prefixed with DELTA_)
        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("_")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| AppError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.staging.directory.as_os_str().is_empty() {
            return Err(AppError::Config(
                "Staging directory is required (set DELTA_STAGING_DIRECTORY)".to_string(),
            ));
        }

        if self.library.directory.as_os_str().is_empty() {
            return Err(AppError::Config(
                "Library directory is required (set DELTA_LIBRARY_DIRECTORY)".to_string(),
            ));
        }

        if self.staging.directory == self.legacy.directory {
            return Err(AppError::Config(
                "Staging directory must differ from the legacy shared folder".to_string(),
            ));
        }

        Ok(())
    }

    pub fn staging_area(&self) -> StagingArea {
        StagingArea::new(&self.staging.directory)
    }

    /// Effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

// Default values
fn default_staging() -> StagingSettings {
    StagingSettings {
        directory: default_staging_directory(),
        strategy: StageStrategy::default(),
    }
}

fn default_staging_directory() -> PathBuf {
    StagingArea::default().root().to_path_buf()
}

fn default_legacy() -> LegacySettings {
    LegacySettings {
        directory: default_legacy_directory(),
    }
}

fn default_legacy_directory() -> PathBuf {
    PathBuf::from("./Documents")
}

fn default_library() -> LibrarySettings {
    LibrarySettings {
        directory: default_library_directory(),
    }
}

fn default_library_directory() -> PathBuf {
    PathBuf::from("./Library")
}
