use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use tracing::{info, instrument};

const DEFAULT_PRECISION: usize = 6;
const DEFAULT_HISTORY_LIMIT: usize = 100;

#[instrument(skip_all)]
pub fn read_config(config_file: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    if let Some(config_path) = config_file {
        info!("parsing explicitly passed in config ({})", config_path.display());
        let config_str = fs::read_to_string(config_path).context("reading config toml (1)")?;
        config = toml::from_str(&config_str).context("parsing config file (1)")?;
    } else if let Some(config_path) = default_config_path() {
        if config_path.exists() {
            info!("parsing default config ({})", config_path.display());
            let config_str =
                fs::read_to_string(&config_path).context("reading config toml (2)")?;
            config = toml::from_str(&config_str).context("parsing config file (2)")?;
        }
    }

    Ok(config)
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tapcalc").join("config.toml"))
}

#[derive(Deserialize, Default, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Number of fraction digits shown for results in the history view.
    /// Does not affect the value placed back into the expression.
    /// By default, 6.
    pub precision: Option<usize>,

    /// How many evaluations the history view keeps. By default, 100.
    pub history_limit: Option<usize>,

    /// Start with step-by-step traces shown under each history entry.
    pub details: Option<bool>,
}

impl Config {
    pub fn precision(&self) -> usize {
        self.precision.unwrap_or(DEFAULT_PRECISION)
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit.unwrap_or(DEFAULT_HISTORY_LIMIT)
    }

    pub fn details(&self) -> bool {
        self.details.unwrap_or(false)
    }
}
