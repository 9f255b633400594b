//! Scheduled snapshot refresh: one dated snapshot per team and per
//! dual-category school.

use chrono::{Local, NaiveDate, Utc};
use tracing::{info, warn};

use crate::{
    config::{CategoryExtractors, Config},
    error::Result,
    extractor::{parse_records, ExtractorClient},
    pipeline::{
        merge_inner, merge_left, rank::stat_value, rank_by, Row, SortDirection,
    },
    storage::{Category, RankingsDatabase, SchoolSnapshot, TeamSnapshot},
};

use super::{resolve_api_key, CommandContext};

/// Handle `ncaabb refresh`.
pub async fn handle_refresh(ctx: &mut CommandContext) -> Result<()> {
    let client = ExtractorClient::new(resolve_api_key()?);
    run_refresh(&client, &ctx.config, &mut ctx.db).await
}

/// One full refresh run: team snapshots for both categories, then the
/// composite school snapshots, all dated today.
pub async fn run_refresh(
    client: &ExtractorClient,
    config: &Config,
    db: &mut RankingsDatabase,
) -> Result<()> {
    let today = Local::now().date_naive();
    info!(date = %today, "fetching new snapshots");

    let mut tables = Vec::with_capacity(Category::ALL.len());
    for category in Category::ALL {
        let table = fetch_category_table(client, config.extractors_for(category)).await?;
        let written = write_team_snapshots(db, category, &table, today)?;
        info!(category = %category, teams = written, "team snapshots saved");
        tables.push(table);
    }

    let written = write_school_snapshots(db, &tables[0], &tables[1], today)?;
    info!(schools = written, "school snapshots saved");

    db.record_ingestion_success(Utc::now())?;
    info!("all snapshots saved");
    Ok(())
}

/// RPI left-merged with ranked offense and ranked defense, by team name.
async fn fetch_category_table(
    client: &ExtractorClient,
    extractors: &CategoryExtractors,
) -> Result<Vec<Row>> {
    let rpi = parse_records(&client.fetch_latest(&extractors.rpi).await?);
    let offense = rank_by(
        parse_records(&client.fetch_latest(&extractors.offense).await?),
        "PPG",
        SortDirection::Descending,
        "Offense Rank",
    );
    let defense = rank_by(
        parse_records(&client.fetch_latest(&extractors.defense).await?),
        "OPPG",
        SortDirection::Ascending,
        "Defense Rank",
    );

    let with_offense = merge_left(&rpi, &offense, "Team");
    Ok(merge_left(&with_offense, &defense, "Team"))
}

/// Write one dated snapshot per team in the merged category table.
///
/// Offense/defense ranks and per-game stats are recorded as absent when
/// the merged row lacks them or they are not numeric. Teams that were
/// never bootstrapped are logged and skipped.
pub fn write_team_snapshots(
    db: &mut RankingsDatabase,
    category: Category,
    table: &[Row],
    date: NaiveDate,
) -> Result<usize> {
    let mut written = 0;
    for row in table {
        let Some(name) = row.get("Team") else {
            continue;
        };
        let Some(school) = db.school_by_name(name)? else {
            warn!(team = %name, %category, "school not bootstrapped, skipping snapshot");
            continue;
        };
        let Some(team) = db.team_for_school(school.id, category)? else {
            warn!(team = %name, %category, "no team in this category, skipping snapshot");
            continue;
        };

        let (Some(rank), Some(wins), Some(losses)) = (
            int_stat(row, "RPI Rank"),
            int_stat(row, "Wins"),
            int_stat(row, "Losses"),
        ) else {
            warn!(team = %name, %category, "row missing rank or record, skipping snapshot");
            continue;
        };

        db.upsert_team_snapshot(&TeamSnapshot {
            team_id: team.id,
            date,
            rank,
            wins,
            losses,
            off_rank: int_stat(row, "Offense Rank"),
            def_rank: int_stat(row, "Defense Rank"),
            ppg: stat_value(row, "PPG"),
            oppg: stat_value(row, "OPPG"),
        })?;
        written += 1;
    }
    Ok(written)
}

/// Inner-merge the two category tables, score each dual-category school
/// by the mean of its integer RPI ranks, and write the overall ranking.
///
/// Schools present in only one category never enter the merge and are
/// excluded from the school-level ranking.
pub fn write_school_snapshots(
    db: &mut RankingsDatabase,
    men: &[Row],
    women: &[Row],
    date: NaiveDate,
) -> Result<usize> {
    let merged = merge_inner(men, women, "Team", ("_M", "_W"));

    let mut scored = Vec::with_capacity(merged.len());
    for mut row in merged {
        let (Some(men_rank), Some(women_rank)) = (
            int_stat(&row, "RPI Rank_M"),
            int_stat(&row, "RPI Rank_W"),
        ) else {
            continue;
        };
        let score = f64::from(men_rank + women_rank) / 2.0;
        row.insert("Score".to_string(), score.to_string());
        scored.push(row);
    }

    let ranked = rank_by(scored, "Score", SortDirection::Ascending, "Overall Rank");

    let mut written = 0;
    for row in &ranked {
        let Some(name) = row.get("Team") else {
            continue;
        };
        let Some(school) = db.school_by_name(name)? else {
            warn!(school = %name, "school not bootstrapped, skipping overall rank");
            continue;
        };
        let Some(rank) = int_stat(row, "Overall Rank") else {
            continue;
        };

        db.upsert_school_snapshot(&SchoolSnapshot {
            school_id: school.id,
            date,
            rank,
        })?;
        written += 1;
    }
    Ok(written)
}

/// Integer value of a stat column, `None` when absent or not numeric.
fn int_stat(row: &Row, column: &str) -> Option<u32> {
    stat_value(row, column)
        .filter(|value| *value >= 0.0)
        .map(|value| value as u32)
}
