//! Error types for the NCAA basketball rankings CLI

use thiserror::Error;

pub type Result<T> = std::result::Result<T, NcaabbError>;

#[derive(Error, Debug)]
pub enum NcaabbError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("API key not provided and {env_var} environment variable not set")]
    MissingApiKey { env_var: String },

    #[error("Database path not provided and {env_var} environment variable not set")]
    MissingDatabase { env_var: String },

    #[error("Unknown team category: {category}")]
    InvalidCategory { category: String },

    #[error("School not found: {name}")]
    SchoolNotFound { name: String },

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}
