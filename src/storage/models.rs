//! Data models for the storage layer

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::NcaabbError;

/// Team category within a school. Each school fields at most one team
/// per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Men,
    Women,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Men, Category::Women];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Men => write!(f, "Men"),
            Category::Women => write!(f, "Women"),
        }
    }
}

impl FromStr for Category {
    type Err = NcaabbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Men" | "men" => Ok(Category::Men),
            "Women" | "women" => Ok(Category::Women),
            other => Err(NcaabbError::InvalidCategory {
                category: other.to_string(),
            }),
        }
    }
}

/// Type-safe wrapper for school row IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchoolId(pub i64);

impl SchoolId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for SchoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Type-safe wrapper for team row IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamId(pub i64);

impl TeamId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A school, created once at bootstrap. Name is unique; conference is
/// immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct School {
    pub id: SchoolId,
    pub name: String,
    pub conference: String,
}

/// A team belonging to one school, one per category with source data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub school_id: SchoolId,
    pub category: Category,
}

/// Dated overall ranking observation for a school. Append-only; one row
/// per school per day (a same-day re-run replaces the earlier row).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchoolSnapshot {
    pub school_id: SchoolId,
    pub date: NaiveDate,
    pub rank: u32,
}

/// Dated rank/stat observation for a team. The offense/defense ranks and
/// per-game stats are absent when the source tables lack that category
/// for the team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSnapshot {
    pub team_id: TeamId,
    pub date: NaiveDate,
    pub rank: u32,
    pub wins: u32,
    pub losses: u32,
    pub off_rank: Option<u32>,
    pub def_rank: Option<u32>,
    pub ppg: Option<f64>,
    pub oppg: Option<f64>,
}

/// One line of the paginated school ranking listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchoolRanking {
    pub rank: u32,
    pub name: String,
    pub conference: String,
}
