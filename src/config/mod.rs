use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::utils::error::{AppError, Result};

pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";
pub const ENV_PREFIX: &str = "GOGS";
pub const DEFAULT_COMMITS_LIMIT: usize = 20;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub integration: IntegrationConfig,
    #[serde(default)]
    pub logger: LoggerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegrationConfig {
    /// Commits listed in a push message before the remainder is summarized.
    #[serde(default = "default_commits_limit")]
    pub commits_limit: usize,
    /// Comma-separated branch allow-list for push events.
    #[serde(default)]
    pub branches: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerConfig {
    #[serde(default = "default_level")]
    pub level: String,
    /// Directory for the daily error log. No file is written when unset.
    #[serde(default)]
    pub dir: Option<String>,
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

fn default_commits_limit() -> usize {
    DEFAULT_COMMITS_LIMIT
}

fn default_level() -> String {
    "info".to_string()
}

fn default_file_name() -> String {
    "gogs-webhook".to_string()
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            commits_limit: DEFAULT_COMMITS_LIMIT,
            branches: None,
            topic: None,
        }
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            dir: None,
            file_name: default_file_name(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Loads the given file (if it exists) overlaid with `GOGS_*` environment
    /// variables, e.g. `GOGS_INTEGRATION__COMMITS_LIMIT=10`.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.integration.commits_limit == 0 {
            return Err(AppError::configuration(
                "integration.commits_limit must be at least 1",
            ));
        }
        Ok(())
    }
}
