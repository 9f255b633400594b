//! One-time school bootstrap from the men's and women's RPI tables.

use tracing::{info, warn};

use crate::{
    config::Config,
    error::Result,
    extractor::{parse_records, ExtractorClient},
    pipeline::{merge_outer, sort_by_text, Row},
    storage::{Category, RankingsDatabase},
};

use super::{resolve_api_key, CommandContext};

/// Handle `ncaabb bootstrap`.
pub async fn handle_bootstrap(ctx: &mut CommandContext) -> Result<()> {
    let client = ExtractorClient::new(resolve_api_key()?);
    run_bootstrap(&client, &ctx.config, &mut ctx.db).await
}

/// Fetch both RPI tables and create schools and teams.
pub async fn run_bootstrap(
    client: &ExtractorClient,
    config: &Config,
    db: &mut RankingsDatabase,
) -> Result<()> {
    info!("bootstrapping schools from men's and women's RPI tables");

    let men = parse_records(&client.fetch_latest(&config.extractors.men.rpi).await?);
    let women = parse_records(&client.fetch_latest(&config.extractors.women.rpi).await?);

    let summary = bootstrap_schools(db, &men, &women)?;
    info!(
        inserted = summary.inserted,
        skipped = summary.skipped,
        "school bootstrap complete"
    );
    Ok(())
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BootstrapSummary {
    pub inserted: usize,
    pub skipped: usize,
}

/// Outer-merge the two RPI tables by team name and create one school per
/// row, with a team for each category that has data.
///
/// A school whose name is already present is rolled back, logged, and
/// skipped; the run continues. This is the only recovered failure in the
/// ingestion path.
pub fn bootstrap_schools(
    db: &mut RankingsDatabase,
    men_rpi: &[Row],
    women_rpi: &[Row],
) -> Result<BootstrapSummary> {
    let mut merged = merge_outer(men_rpi, women_rpi, "Team", ("_M", "_W"));
    sort_by_text(&mut merged, "Team");

    let mut summary = BootstrapSummary::default();
    for row in &merged {
        let Some(name) = row.get("Team") else {
            continue;
        };

        let men_conference = row.get("Conference_M");
        let women_conference = row.get("Conference_W");
        let (conference, categories): (&str, &[Category]) =
            match (men_conference, women_conference) {
                (Some(conference), Some(_)) => {
                    (conference.as_str(), &[Category::Men, Category::Women])
                }
                (Some(conference), None) => (conference.as_str(), &[Category::Men]),
                (None, Some(conference)) => (conference.as_str(), &[Category::Women]),
                (None, None) => {
                    warn!(team = %name, "row has no conference on either side, skipping");
                    continue;
                }
            };

        if db.insert_school_with_teams(name, conference, categories)? {
            info!(school = %name, conference = %conference, "added to the database");
            summary.inserted += 1;
        } else {
            warn!(school = %name, "already in the database, skipped");
            summary.skipped += 1;
        }
    }

    Ok(summary)
}
