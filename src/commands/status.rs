//! Last-successful-ingestion metadata.

use super::CommandContext;
use crate::error::Result;

/// Handle `ncaabb status`.
pub fn handle_status(ctx: &CommandContext) -> Result<()> {
    match ctx.db.last_ingestion_success()? {
        Some(at) => println!("Last successful ingestion: {}", at.to_rfc3339()),
        None => println!("Last successful ingestion: never"),
    }

    match ctx.db.latest_snapshot_date()? {
        Some(date) => println!("Latest snapshot date:      {}", date),
        None => println!("Latest snapshot date:      none"),
    }

    println!("Schools:                   {}", ctx.db.school_count()?);
    println!("Team snapshots:            {}", ctx.db.team_snapshot_count()?);
    Ok(())
}
