//! NCAA Basketball Rankings CLI Library
//!
//! Ingests NCAA basketball rankings from a remote extraction service,
//! stores dated snapshots in SQLite, and serves paginated ranking
//! listings from the command line.
//!
//! ## Pipeline
//!
//! - **Extractor client**: fetches the latest run of a configured
//!   extractor as newline-delimited JSON
//! - **Record parser**: flattens nested extraction records into flat
//!   column/value rows
//! - **Ranking transformer**: sorts a table by a statistic and assigns
//!   dense 1-based ranks
//! - **Snapshot writer**: merges RPI/offense/defense tables per category,
//!   computes composite school scores, and appends dated snapshots
//! - **Orchestrator**: one-time school bootstrap plus a daily scheduled
//!   snapshot refresh
//!
//! ## Environment Configuration
//!
//! ```bash
//! export NCAABB_API_KEY=<extractor service API key>
//! export NCAABB_DATABASE=/var/lib/ncaabb/rankings.db
//! ```
//!
//! Both are validated at startup; there is no interactive prompting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod extractor;
pub mod pipeline;
pub mod storage;

// Re-export commonly used types
pub use config::{Config, ExtractorId};
pub use error::{NcaabbError, Result};
pub use storage::{Category, RankingsDatabase};

pub const API_KEY_ENV_VAR: &str = "NCAABB_API_KEY";
pub const DATABASE_ENV_VAR: &str = "NCAABB_DATABASE";
