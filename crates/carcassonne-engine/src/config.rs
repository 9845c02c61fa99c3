//! Engine configuration.
//!
//! Settings come from environment variables, falling back to defaults:
//! - `CARCASSONNE_WORKERS`: number of worker threads
//! - `CARCASSONNE_LOG_DIR`: directory for per-game event logs (unset disables logging)
//! - `CARCASSONNE_PLAYERS`: players per game

use crate::error::EngineError;
use carcassonne_core::GameConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

const WORKERS_VAR: &str = "CARCASSONNE_WORKERS";
const LOG_DIR_VAR: &str = "CARCASSONNE_LOG_DIR";
const PLAYERS_VAR: &str = "CARCASSONNE_PLAYERS";

/// Worker count used when none is configured
const DEFAULT_WORKERS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub worker_count: usize,
    /// Where per-game logs go; `None` turns logging off
    pub log_dir: Option<PathBuf>,
    /// Setup used for every game the engine creates
    pub game: GameConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            worker_count: DEFAULT_WORKERS,
            log_dir: None,
            game: GameConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, EngineError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from any variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, EngineError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(workers) = parse_var(&lookup, WORKERS_VAR)? {
            config.worker_count = workers;
        }
        if let Some(dir) = lookup(LOG_DIR_VAR).filter(|dir| !dir.is_empty()) {
            config.log_dir = Some(PathBuf::from(dir));
        }
        if let Some(players) = parse_var(&lookup, PLAYERS_VAR)? {
            config.game.player_count = players;
        }
        Ok(config)
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str) -> Result<Option<T>, EngineError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| EngineError::InvalidSetting { name, value }),
    }
}
