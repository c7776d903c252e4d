//! CLI configuration

use crate::error::{CliError, Result};
use melody_client::ApiConfig;
use melody_playback::PlaybackConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MelodyConfig {
    #[serde(default = "default_api")]
    pub api: ApiSettings,

    #[serde(default = "default_auth")]
    pub auth: AuthSettings,

    #[serde(default = "default_player")]
    pub player: PlayerSettings,

    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default = "default_logging")]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthSettings {
    #[serde(default = "default_token_path")]
    pub token_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerSettings {
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    #[serde(default = "default_restart_threshold_secs")]
    pub restart_threshold_secs: f64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CatalogSettings {
    /// JSON catalog file; the built-in sample lists are used when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSettings {
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl MelodyConfig {
    /// Load configuration from file and environment
    ///
    /// Reads `path` when given (it must exist), otherwise `melody.toml` in the
    /// working directory if present. `MELODY_`-prefixed variables override
    /// both, with `__` between section and key (`MELODY_API__BASE_URL`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from("melody.toml");
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("MELODY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.player.tick_interval_ms == 0 {
            return Err(CliError::Config(
                "player.tick_interval_ms must be greater than zero".to_string(),
            ));
        }

        if !self.player.restart_threshold_secs.is_finite()
            || self.player.restart_threshold_secs < 0.0
        {
            return Err(CliError::Config(format!(
                "player.restart_threshold_secs must be a non-negative number, got {}",
                self.player.restart_threshold_secs
            )));
        }

        self.api_config().normalized_base_url()?;

        Ok(())
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig::new(self.api.base_url.clone()).with_timeout_secs(self.api.timeout_secs)
    }

    pub fn playback_config(&self) -> PlaybackConfig {
        PlaybackConfig {
            restart_threshold_secs: self.player.restart_threshold_secs,
            tick_interval_ms: self.player.tick_interval_ms,
            ..PlaybackConfig::default()
        }
    }
}

// Default values
fn default_api() -> ApiSettings {
    ApiSettings {
        base_url: default_base_url(),
        timeout_secs: default_timeout_secs(),
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_auth() -> AuthSettings {
    AuthSettings {
        token_path: default_token_path(),
    }
}

fn default_token_path() -> PathBuf {
    PathBuf::from("./data/auth.json")
}

fn default_player() -> PlayerSettings {
    PlayerSettings {
        tick_interval_ms: default_tick_interval_ms(),
        restart_threshold_secs: default_restart_threshold_secs(),
    }
}

fn default_tick_interval_ms() -> u64 {
    1000
}

fn default_restart_threshold_secs() -> f64 {
    3.0
}

fn default_logging() -> LoggingSettings {
    LoggingSettings {
        filter: default_filter(),
    }
}

fn default_filter() -> String {
    "melody_cli=info,melody_playback=info,melody_client=info".to_string()
}

impl Default for MelodyConfig {
    fn default() -> Self {
        Self {
            api: default_api(),
            auth: default_auth(),
            player: default_player(),
            catalog: CatalogSettings::default(),
            logging: default_logging(),
        }
    }
}
