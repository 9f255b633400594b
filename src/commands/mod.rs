//! Command handlers and shared startup helpers.
//!
//! Every handler receives an explicit [`CommandContext`]; configuration
//! and the storage handle are constructed once at startup and passed by
//! reference. Missing environment variables fail hard instead of
//! prompting.

use std::path::{Path, PathBuf};

use crate::{
    config::Config,
    error::{NcaabbError, Result},
    storage::RankingsDatabase,
    API_KEY_ENV_VAR, DATABASE_ENV_VAR,
};

pub mod bootstrap;
pub mod rankings;
pub mod refresh;
pub mod run;
pub mod school;
pub mod status;

/// Context containing the resources every command needs.
pub struct CommandContext {
    pub config: Config,
    pub db: RankingsDatabase,
}

impl CommandContext {
    /// Load configuration and open the database.
    pub fn new(config_path: &Path, database: Option<PathBuf>) -> Result<Self> {
        let config = Config::load(config_path)?;
        let database = resolve_database_path(database)?;
        let db = RankingsDatabase::open(&database)?;
        Ok(Self { config, db })
    }
}

/// Extractor service API key from the environment.
pub fn resolve_api_key() -> Result<String> {
    std::env::var(API_KEY_ENV_VAR).map_err(|_| NcaabbError::MissingApiKey {
        env_var: API_KEY_ENV_VAR.to_string(),
    })
}

/// Database path from the CLI flag or the environment.
pub fn resolve_database_path(database: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = database {
        return Ok(path);
    }
    std::env::var(DATABASE_ENV_VAR)
        .map(PathBuf::from)
        .map_err(|_| NcaabbError::MissingDatabase {
            env_var: DATABASE_ENV_VAR.to_string(),
        })
}
