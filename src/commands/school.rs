//! Snapshot history for one school and its teams.

use std::fmt::Display;

use super::CommandContext;
use crate::error::{NcaabbError, Result};

/// Handle `ncaabb school <name>`.
pub fn handle_school(ctx: &CommandContext, name: &str) -> Result<()> {
    let school = ctx
        .db
        .school_by_name(name)?
        .ok_or_else(|| NcaabbError::SchoolNotFound {
            name: name.to_string(),
        })?;

    println!("{} ({})", school.name, school.conference);

    let overall = ctx.db.school_snapshots(school.id)?;
    if overall.is_empty() {
        println!("No overall ranking recorded.");
    } else {
        println!("\nOverall rank history:");
        for snapshot in &overall {
            println!("  {}  rank {:>3}", snapshot.date, snapshot.rank);
        }
    }

    for team in ctx.db.teams_for_school(school.id)? {
        println!("\n{} team:", team.category);
        let snapshots = ctx.db.team_snapshots(team.id)?;
        if snapshots.is_empty() {
            println!("  No snapshots recorded.");
            continue;
        }
        for s in &snapshots {
            println!(
                "  {}  rank {:>3}  {:>2}-{:<2}  off {:>3}  def {:>3}  ppg {:>5}  oppg {:>5}",
                s.date,
                s.rank,
                s.wins,
                s.losses,
                opt(s.off_rank),
                opt(s.def_rank),
                opt(s.ppg),
                opt(s.oppg),
            );
        }
    }
    Ok(())
}

fn opt<T: Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}
