//! CRUD and ranking listing operations

use super::{models::*, schema::RankingsDatabase};
use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Row};

const LAST_SUCCESS_KEY: &str = "last_ingestion_success";

impl RankingsDatabase {
    /// Number of schools currently bootstrapped.
    pub fn school_count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM schools", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Number of team snapshots ever recorded.
    pub fn team_snapshot_count(&self) -> Result<u64> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM team_snapshots", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Insert a school and one team per category, atomically.
    ///
    /// Returns `false` without error when a school with the same name
    /// already exists; the whole insert is rolled back and the caller
    /// continues with the next school. This is the only recovered
    /// failure in the ingestion path.
    pub fn insert_school_with_teams(
        &mut self,
        name: &str,
        conference: &str,
        categories: &[Category],
    ) -> Result<bool> {
        let tx = self.conn.transaction()?;

        match tx.execute(
            "INSERT INTO schools (name, conference) VALUES (?, ?)",
            params![name, conference],
        ) {
            Ok(_) => {
                let school_id = tx.last_insert_rowid();
                for category in categories {
                    tx.execute(
                        "INSERT INTO teams (school_id, category) VALUES (?, ?)",
                        params![school_id, category.to_string()],
                    )?;
                }
                tx.commit()?;
                Ok(true)
            }
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                tx.rollback()?;
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Look up a school by its unique name.
    pub fn school_by_name(&self, name: &str) -> Result<Option<School>> {
        let result = self.conn.query_row(
            "SELECT id, name, conference FROM schools WHERE name = ?",
            params![name],
            Self::row_to_school,
        );

        match result {
            Ok(school) => Ok(Some(school)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Look up a school's team for one category.
    pub fn team_for_school(
        &self,
        school_id: SchoolId,
        category: Category,
    ) -> Result<Option<Team>> {
        let result = self.conn.query_row(
            "SELECT id, school_id, category FROM teams
             WHERE school_id = ? AND category = ?",
            params![school_id.as_i64(), category.to_string()],
            Self::row_to_team,
        );

        match result {
            Ok(team) => Ok(Some(team)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// All teams for a school, men before women.
    pub fn teams_for_school(&self, school_id: SchoolId) -> Result<Vec<Team>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, school_id, category FROM teams
             WHERE school_id = ? ORDER BY category ASC",
        )?;

        let rows = stmt.query_map(params![school_id.as_i64()], Self::row_to_team)?;

        let mut teams = Vec::new();
        for row in rows {
            teams.push(row?);
        }
        Ok(teams)
    }

    /// Record one team snapshot. A re-run on the same day replaces the
    /// earlier row for that team and date.
    pub fn upsert_team_snapshot(&mut self, snapshot: &TeamSnapshot) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO team_snapshots
             (team_id, date, rank, wins, losses, off_rank, def_rank, ppg, oppg)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                snapshot.team_id.as_i64(),
                snapshot.date.to_string(),
                snapshot.rank,
                snapshot.wins,
                snapshot.losses,
                snapshot.off_rank,
                snapshot.def_rank,
                snapshot.ppg,
                snapshot.oppg,
            ],
        )?;
        Ok(())
    }

    /// Record one school snapshot, same-day replacement semantics as above.
    pub fn upsert_school_snapshot(&mut self, snapshot: &SchoolSnapshot) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO school_snapshots (school_id, date, rank)
             VALUES (?, ?, ?)",
            params![
                snapshot.school_id.as_i64(),
                snapshot.date.to_string(),
                snapshot.rank,
            ],
        )?;
        Ok(())
    }

    /// Most recent date with a school snapshot, if any run has completed.
    pub fn latest_snapshot_date(&self) -> Result<Option<NaiveDate>> {
        let result = self.conn.query_row(
            "SELECT MAX(date) FROM school_snapshots",
            [],
            |row| row.get::<_, Option<String>>(0),
        )?;

        match result {
            Some(text) => Ok(Some(parse_date(&text)?)),
            None => Ok(None),
        }
    }

    /// One page of the school ranking listing for a given date, rank
    /// ascending. Pages are 1-based.
    pub fn school_rankings(
        &self,
        date: NaiveDate,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<SchoolRanking>> {
        let page = page.max(1);
        let mut stmt = self.conn.prepare(
            "SELECT ss.rank, s.name, s.conference
             FROM school_snapshots ss
             JOIN schools s ON s.id = ss.school_id
             WHERE ss.date = ?
             ORDER BY ss.rank ASC
             LIMIT ? OFFSET ?",
        )?;

        let rows = stmt.query_map(
            params![date.to_string(), page_size, (page - 1) * page_size],
            |row| {
                Ok(SchoolRanking {
                    rank: row.get(0)?,
                    name: row.get(1)?,
                    conference: row.get(2)?,
                })
            },
        )?;

        let mut rankings = Vec::new();
        for row in rows {
            rankings.push(row?);
        }
        Ok(rankings)
    }

    /// Dated overall ranks for one school, newest first.
    pub fn school_snapshots(&self, school_id: SchoolId) -> Result<Vec<SchoolSnapshot>> {
        let mut stmt = self.conn.prepare(
            "SELECT school_id, date, rank FROM school_snapshots
             WHERE school_id = ? ORDER BY date DESC",
        )?;

        let rows = stmt.query_map(params![school_id.as_i64()], |row| {
            let date: String = row.get(1)?;
            Ok((row.get::<_, i64>(0)?, date, row.get::<_, u32>(2)?))
        })?;

        let mut snapshots = Vec::new();
        for row in rows {
            let (school_id, date, rank) = row?;
            snapshots.push(SchoolSnapshot {
                school_id: SchoolId::new(school_id),
                date: parse_date(&date)?,
                rank,
            });
        }
        Ok(snapshots)
    }

    /// Dated snapshots for one team, newest first.
    pub fn team_snapshots(&self, team_id: TeamId) -> Result<Vec<TeamSnapshot>> {
        let mut stmt = self.conn.prepare(
            "SELECT team_id, date, rank, wins, losses, off_rank, def_rank, ppg, oppg
             FROM team_snapshots
             WHERE team_id = ? ORDER BY date DESC",
        )?;

        let rows = stmt.query_map(params![team_id.as_i64()], |row| {
            let date: String = row.get(1)?;
            Ok((
                row.get::<_, i64>(0)?,
                date,
                row.get::<_, u32>(2)?,
                row.get::<_, u32>(3)?,
                row.get::<_, u32>(4)?,
                row.get::<_, Option<u32>>(5)?,
                row.get::<_, Option<u32>>(6)?,
                row.get::<_, Option<f64>>(7)?,
                row.get::<_, Option<f64>>(8)?,
            ))
        })?;

        let mut snapshots = Vec::new();
        for row in rows {
            let (team_id, date, rank, wins, losses, off_rank, def_rank, ppg, oppg) = row?;
            snapshots.push(TeamSnapshot {
                team_id: TeamId::new(team_id),
                date: parse_date(&date)?,
                rank,
                wins,
                losses,
                off_rank,
                def_rank,
                ppg,
                oppg,
            });
        }
        Ok(snapshots)
    }

    /// Stamp a completed ingestion run.
    pub fn record_ingestion_success(&mut self, at: DateTime<Utc>) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO meta (key, value) VALUES (?, ?)",
            params![LAST_SUCCESS_KEY, at.to_rfc3339()],
        )?;
        Ok(())
    }

    /// Timestamp of the last completed ingestion run, if any.
    pub fn last_ingestion_success(&self) -> Result<Option<DateTime<Utc>>> {
        let result = self.conn.query_row(
            "SELECT value FROM meta WHERE key = ?",
            params![LAST_SUCCESS_KEY],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(text) => {
                let at = DateTime::parse_from_rfc3339(&text)
                    .map_err(|e| anyhow::anyhow!("bad {} value {:?}: {}", LAST_SUCCESS_KEY, text, e))?;
                Ok(Some(at.with_timezone(&Utc)))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn row_to_school(row: &Row) -> rusqlite::Result<School> {
        Ok(School {
            id: SchoolId::new(row.get(0)?),
            name: row.get(1)?,
            conference: row.get(2)?,
        })
    }

    fn row_to_team(row: &Row) -> rusqlite::Result<Team> {
        let category: String = row.get(2)?;
        let category = category.parse::<Category>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                2,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })?;

        Ok(Team {
            id: TeamId::new(row.get(0)?),
            school_id: SchoolId::new(row.get(1)?),
            category,
        })
    }
}

fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|e| anyhow::anyhow!("bad snapshot date {:?}: {}", text, e))
}
