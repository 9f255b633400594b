//! Orchestrator daemon: startup checks, then a daily scheduled refresh.
//!
//! Refreshes run sequentially on this task, so a slow run and the next
//! scheduled run cannot overlap. A failed run is logged and the daemon
//! waits for the next scheduled time; there is no retry or backoff.

use std::time::Duration;

use chrono::{DateTime, Duration as ChronoDuration, Local, NaiveTime};
use tracing::{error, info, warn};

use crate::{config::JobSchedule, error::Result, extractor::ExtractorClient};

use super::{
    bootstrap::run_bootstrap, refresh::run_refresh, resolve_api_key, CommandContext,
};

/// Handle `ncaabb run`.
pub async fn handle_run(ctx: &mut CommandContext) -> Result<()> {
    let client = ExtractorClient::new(resolve_api_key()?);

    // First-start checks: bootstrap an empty school table, then take an
    // initial snapshot if none exists yet.
    if ctx.db.school_count()? == 0 {
        info!("school table is empty, running bootstrap");
        run_bootstrap(&client, &ctx.config, &mut ctx.db).await?;
    }
    if ctx.db.team_snapshot_count()? == 0 {
        info!("no team snapshots recorded, running initial refresh");
        run_refresh(&client, &ctx.config, &mut ctx.db).await?;
    }

    loop {
        let wait = delay_until_next_run(Local::now(), ctx.config.job);
        tokio::time::sleep(wait).await;

        if let Err(error) = run_refresh(&client, &ctx.config, &mut ctx.db).await {
            error!(%error, "scheduled refresh failed, next attempt at the next scheduled time");
        }
    }
}

/// Retry interval when the configured wall-clock time does not exist
/// locally (DST gap): skip the day and re-evaluate.
const MISSING_TIME_RETRY: Duration = Duration::from_secs(24 * 60 * 60);

/// Delay until the next scheduled refresh. A nonexistent local time is
/// logged and retried a day later; it never aborts the daemon.
fn delay_until_next_run(now: DateTime<Local>, job: JobSchedule) -> Duration {
    match next_run(now, job) {
        Some(next) => {
            info!(next_run = %next, "waiting for next scheduled refresh");
            (next - now).to_std().unwrap_or_default()
        }
        None => {
            warn!(
                hour = job.hour,
                minute = job.minute,
                "scheduled time does not exist locally, retrying in a day"
            );
            MISSING_TIME_RETRY
        }
    }
}

/// Next local occurrence of the configured hour and minute, strictly
/// after `now`. `None` only when the wall-clock time does not exist
/// locally (DST gap).
pub fn next_run(now: DateTime<Local>, job: JobSchedule) -> Option<DateTime<Local>> {
    let time = NaiveTime::from_hms_opt(job.hour, job.minute, 0)?;
    let mut candidate = now.date_naive().and_time(time);
    if candidate <= now.naive_local() {
        candidate += ChronoDuration::days(1);
    }
    candidate.and_local_timezone(Local).earliest()
}
