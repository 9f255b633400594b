//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use ncaabb::{
    cli::{Commands, Ncaabb},
    commands::{
        bootstrap::handle_bootstrap, rankings::handle_rankings, refresh::handle_refresh,
        run::handle_run, school::handle_school, status::handle_status, CommandContext,
    },
    Result,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let app = Ncaabb::parse();
    let common = app.command.common();
    let mut ctx = CommandContext::new(&common.config, common.database.clone())?;

    match app.command {
        Commands::Bootstrap { .. } => handle_bootstrap(&mut ctx).await?,
        Commands::Refresh { .. } => handle_refresh(&mut ctx).await?,
        Commands::Run { .. } => handle_run(&mut ctx).await?,
        Commands::Rankings { page, .. } => handle_rankings(&ctx, page)?,
        Commands::School { ref name, .. } => handle_school(&ctx, name)?,
        Commands::Status { .. } => handle_status(&ctx)?,
    }

    Ok(())
}
