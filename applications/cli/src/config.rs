/// Groove configuration
use crate::error::{CliError, Result};
use groove_playback::PlaybackConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File read when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "groove.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GrooveConfig {
    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub export: ExportSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExportSettings {
    /// Pause between exported files, in milliseconds
    #[serde(default = "default_pacing_ms")]
    pub pacing_ms: u64,
}

impl GrooveConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit path must exist. Otherwise `groove.toml` in the working
    /// directory is used if present. `GROOVE_*` variables override both,
    /// e.g. `GROOVE_PLAYBACK__HISTORY_SIZE=100`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("GROOVE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let playback = &self.playback;

        if !(0.0..=1.0).contains(&playback.volume) {
            return Err(CliError::Config(format!(
                "playback.volume must be between 0 and 1, got {}",
                playback.volume
            )));
        }

        if !playback.rewind_threshold_secs.is_finite() || playback.rewind_threshold_secs < 0.0 {
            return Err(CliError::Config(
                "playback.rewind_threshold_secs must be a non-negative number".to_string(),
            ));
        }

        if self.storage.database_path.as_os_str().is_empty() {
            return Err(CliError::Config(
                "storage.database_path must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

fn default_database_path() -> PathBuf {
    PathBuf::from("./data/groove.redb")
}

fn default_pacing_ms() -> u64 {
    250
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            pacing_ms: default_pacing_ms(),
        }
    }
}
