use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::domain::OutputStyle;
use crate::error::SoftError;
use crate::output::FormatPolicy;
use crate::sra::SraClientOptions;

pub const CONFIG_FILE_NAME: &str = "geo-soft-json.json";

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub style: Option<OutputStyle>,
    #[serde(default)]
    pub require_complete: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub timeout_secs: Option<u64>,
    pub style: Option<OutputStyle>,
    pub require_complete: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ResolvedConfig {
    pub sra: SraClientOptions,
    pub policy: FormatPolicy,
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn resolve(path: Option<&str>) -> Result<Config, SoftError> {
        let config_path = match path {
            Some(path) => Some(PathBuf::from(path)),
            None => Self::discover(),
        };
        let Some(config_path) = config_path else {
            return Ok(Config::default());
        };

        let content = fs::read_to_string(&config_path)
            .map_err(|_| SoftError::ConfigRead(config_path.clone()))?;
        let config = serde_json::from_str(&content)
            .map_err(|err| SoftError::ConfigParse(err.to_string()))?;
        tracing::debug!(path = %config_path.display(), "loaded config");
        Ok(config)
    }

    fn discover() -> Option<PathBuf> {
        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.exists() {
            return Some(local);
        }
        ProjectDirs::from("", "", "geo-soft-json")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }

    pub fn apply(config: Config, overrides: ConfigOverrides) -> ResolvedConfig {
        let timeout_secs = overrides.timeout_secs.or(config.timeout_secs);
        ResolvedConfig {
            sra: SraClientOptions {
                user_agent: config.user_agent,
                timeout: timeout_secs.map(Duration::from_secs),
            },
            policy: FormatPolicy {
                style: overrides.style.or(config.style).unwrap_or_default(),
                require_complete: overrides.require_complete
                    || config.require_complete.unwrap_or(false),
            },
        }
    }
}
