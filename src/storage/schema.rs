//! Database schema and connection management

use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;

/// Database connection manager for ranking snapshots.
///
/// The database path comes from explicit configuration (`NCAABB_DATABASE`);
/// startup fails hard when it is absent rather than prompting or guessing.
pub struct RankingsDatabase {
    pub(crate) conn: Connection,
}

impl RankingsDatabase {
    /// Open (or create) the database at the given path and ensure tables exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        let mut db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// In-memory database, used by tests and dry runs.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Initialize the database schema
    pub(crate) fn initialize_schema(&mut self) -> Result<()> {
        self.conn.execute_batch(
            "PRAGMA foreign_keys = ON;

            CREATE TABLE IF NOT EXISTS schools (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL UNIQUE,
                conference TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS teams (
                id INTEGER PRIMARY KEY,
                school_id INTEGER NOT NULL,
                category TEXT NOT NULL,
                UNIQUE (school_id, category),
                FOREIGN KEY (school_id) REFERENCES schools(id)
            );

            CREATE TABLE IF NOT EXISTS school_snapshots (
                school_id INTEGER NOT NULL,
                date TEXT NOT NULL,
                rank INTEGER NOT NULL,
                PRIMARY KEY (school_id, date),
                FOREIGN KEY (school_id) REFERENCES schools(id)
            );

            CREATE TABLE IF NOT EXISTS team_snapshots (
                team_id INTEGER NOT NULL,
                date TEXT NOT NULL,
                rank INTEGER NOT NULL,
                wins INTEGER NOT NULL,
                losses INTEGER NOT NULL,
                off_rank INTEGER,
                def_rank INTEGER,
                ppg REAL,
                oppg REAL,
                PRIMARY KEY (team_id, date),
                FOREIGN KEY (team_id) REFERENCES teams(id)
            );

            CREATE TABLE IF NOT EXISTS meta (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_school_snapshots_date_rank
                ON school_snapshots(date, rank);

            CREATE INDEX IF NOT EXISTS idx_team_snapshots_date
                ON team_snapshots(date);",
        )?;

        Ok(())
    }
}
