//! Paginated school ranking listing for the latest snapshot date.

use super::CommandContext;
use crate::error::Result;

/// Handle `ncaabb rankings`.
pub fn handle_rankings(ctx: &CommandContext, page: u32) -> Result<()> {
    let Some(date) = ctx.db.latest_snapshot_date()? else {
        println!("No snapshots recorded yet. Run `ncaabb refresh` first.");
        return Ok(());
    };

    let rankings = ctx.db.school_rankings(date, page, ctx.config.page_size)?;

    println!("School rankings for {} (page {})", date, page.max(1));
    if rankings.is_empty() {
        println!("No entries on this page.");
        return Ok(());
    }

    for entry in &rankings {
        println!("{:>4}  {:<32} {}", entry.rank, entry.name, entry.conference);
    }
    Ok(())
}
