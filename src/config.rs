use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File as ConfigFile};
use directories::ProjectDirs;
use serde::Deserialize;

use crate::domain::services::summary::DEFAULT_MARKUP_MULTIPLIER;

pub const DEFAULT_OUTPUT_PATH: &str = "src/data/rab.json";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Leading rows dropped before classification.
    pub header_rows: usize,
    pub sheet: Option<String>,
    pub output: PathBuf,
    pub pretty: bool,
    pub markup_multiplier: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            header_rows: 1,
            sheet: None,
            output: PathBuf::from(DEFAULT_OUTPUT_PATH),
            pretty: true,
            markup_multiplier: DEFAULT_MARKUP_MULTIPLIER,
        }
    }
}

pub fn user_config_path() -> Option<PathBuf> {
    ProjectDirs::from("id", "rab", "rab").map(|dirs| dirs.config_dir().join("rab.toml"))
}

impl AppConfig {
    /// Defaults, then `Rab.toml` in the working directory, then the per-user
    /// `rab.toml`, then `RAB_*` environment variables.
    pub fn load() -> Result<AppConfig, ConfigError> {
        let mut builder =
            Config::builder().add_source(ConfigFile::with_name("Rab").required(false));
        if let Some(path) = user_config_path() {
            builder = builder.add_source(ConfigFile::from(path).required(false));
        }
        builder
            .add_source(Environment::with_prefix("RAB"))
            .build()?
            .try_deserialize::<AppConfig>()
    }
}
