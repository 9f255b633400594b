//! Static configuration loaded once at startup and passed by reference.
//!
//! The file supplies the extractor identifier for each category/statistic
//! pair, the daily refresh time, and the rankings page size. There is no
//! ambient global configuration; commands receive `&Config`.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{NcaabbError, Result};
use crate::storage::Category;

/// Opaque identifier for a remote extractor endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractorId(pub String);

impl ExtractorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExtractorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Extractor identifiers for one team category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryExtractors {
    pub rpi: ExtractorId,
    pub offense: ExtractorId,
    pub defense: ExtractorId,
}

/// Daily refresh trigger, local time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct JobSchedule {
    pub hour: u32,
    pub minute: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Extractors {
    pub men: CategoryExtractors,
    pub women: CategoryExtractors,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Page size for ranking listings.
    pub page_size: u32,
    pub job: JobSchedule,
    pub extractors: Extractors,
}

impl Config {
    /// Load and validate configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| NcaabbError::Config {
            message: format!("could not read {}: {}", path.display(), e),
        })?;
        let config: Config = toml::from_str(&raw).map_err(|e| NcaabbError::Config {
            message: format!("could not parse {}: {}", path.display(), e),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(NcaabbError::Config {
                message: "page_size must be at least 1".to_string(),
            });
        }
        if self.job.hour > 23 || self.job.minute > 59 {
            return Err(NcaabbError::Config {
                message: format!(
                    "job time {:02}:{:02} is not a valid time of day",
                    self.job.hour, self.job.minute
                ),
            });
        }
        Ok(())
    }

    /// Extractor identifiers for the given category.
    pub fn extractors_for(&self, category: Category) -> &CategoryExtractors {
        match category {
            Category::Men => &self.extractors.men,
            Category::Women => &self.extractors.women,
        }
    }
}
