//! CLI argument definitions and parsing structures.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Arguments shared by every subcommand.
#[derive(Debug, Args)]
pub struct CommonArgs {
    /// Path to the TOML configuration file.
    #[clap(long, short, default_value = "ncaabb.toml")]
    pub config: PathBuf,

    /// SQLite database path (or set `NCAABB_DATABASE`).
    #[clap(long)]
    pub database: Option<PathBuf>,
}

#[derive(Debug, Parser)]
#[clap(name = "ncaabb", about = "NCAA basketball rankings ingestion CLI")]
pub struct Ncaabb {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create schools and teams from the men's and women's RPI tables.
    ///
    /// Run once against an empty database; schools already present are
    /// logged and skipped, so re-running is harmless.
    Bootstrap {
        #[clap(flatten)]
        common: CommonArgs,
    },

    /// Fetch the latest extractor runs and record today's snapshots.
    Refresh {
        #[clap(flatten)]
        common: CommonArgs,
    },

    /// Run the daemon: bootstrap/refresh if empty, then refresh daily at
    /// the configured time.
    Run {
        #[clap(flatten)]
        common: CommonArgs,
    },

    /// List school rankings for the most recent snapshot date.
    Rankings {
        #[clap(flatten)]
        common: CommonArgs,

        /// 1-based page of the listing.
        #[clap(long, short, default_value_t = 1)]
        page: u32,
    },

    /// Show snapshot history for one school and its teams.
    School {
        #[clap(flatten)]
        common: CommonArgs,

        /// School name exactly as it appears in the rankings.
        name: String,
    },

    /// Show last-successful-ingestion metadata and table counts.
    Status {
        #[clap(flatten)]
        common: CommonArgs,
    },
}

impl Commands {
    /// The shared arguments of whichever subcommand was chosen.
    pub fn common(&self) -> &CommonArgs {
        match self {
            Commands::Bootstrap { common }
            | Commands::Refresh { common }
            | Commands::Run { common }
            | Commands::Rankings { common, .. }
            | Commands::School { common, .. }
            | Commands::Status { common } => common,
        }
    }
}
