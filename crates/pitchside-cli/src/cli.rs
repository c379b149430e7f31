//! CLI argument definitions for pitchside.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `live` | Matches in play right now |
//! | `matches` | Matches scheduled or played on a date |
//! | `leagues` | Leagues, optionally for one country |
//! | `stats` | Statistics for one match |
//! | `providers` | Configured providers and their capabilities |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--provider` | `DEFAULT_API_PROVIDER` | Primary provider |
//! | `--verbose` | `false` | Debug logging on stderr |
//!
//! # Examples
//!
//! ```bash
//! pitchside live --filter high-scoring --format table
//! pitchside matches --date 2024-05-19 --league 39 --pretty
//! pitchside leagues --country England
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Unified football data from several upstream providers.
#[derive(Debug, Parser)]
#[command(
    name = "pitchside",
    author,
    version,
    about = "Unified football data CLI",
    long_about = "Pitchside queries several football data providers through one interface, \
falling back to the next provider when one fails, and prints normalized records.\n\
\n\
Provider keys are read from the environment or a .env file \
(API_FOOTBALL_KEY, FOOTBALL_DATA_KEY, SPORTS_DB_KEY)."
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Primary provider (api-football, football-data, sports-db).
    #[arg(long, global = true)]
    pub provider: Option<String>,

    /// Log debug details to stderr.
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text for terminal display.
    Table,
    /// Single JSON document.
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch matches currently in play.
    Live(LiveArgs),
    /// Fetch matches for a date (today by default).
    Matches(MatchesArgs),
    /// List leagues.
    Leagues(LeaguesArgs),
    /// Fetch statistics for a match.
    Stats(StatsArgs),
    /// Show configured providers.
    Providers,
}

#[derive(Debug, Args)]
pub struct LiveArgs {
    /// Match filter: high-scoring[=N], close[=N], second-half, league=NAME.
    #[arg(long = "filter")]
    pub filters: Vec<String>,
}

#[derive(Debug, Args)]
pub struct MatchesArgs {
    /// Date as YYYY-MM-DD.
    #[arg(long)]
    pub date: Option<String>,

    /// Provider league id (honoured where the provider supports it).
    #[arg(long)]
    pub league: Option<u32>,

    /// Match filter: high-scoring[=N], close[=N], second-half, league=NAME.
    #[arg(long = "filter")]
    pub filters: Vec<String>,
}

#[derive(Debug, Args)]
pub struct LeaguesArgs {
    #[arg(long)]
    pub country: Option<String>,
}

#[derive(Debug, Args)]
pub struct StatsArgs {
    pub match_id: u64,
}
