use clap::{Args, Parser, Subcommand, ValueEnum};

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// US economic calendar, Japan-localized.
#[derive(Debug, Parser)]
#[command(name = "econcal", version, about)]
pub struct Cli {
    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Fail the run when the envelope carries warnings or errors.
    #[arg(long, global = true)]
    pub strict: bool,

    /// Use the no-op transport and the built-in sample calendar.
    #[arg(long, global = true)]
    pub mock: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch, normalize and render the release calendar.
    Calendar(CalendarArgs),
    /// Convert an Eastern (date, time) pair to Japan time.
    Convert(ConvertArgs),
    /// List the proxy chain in fallback order.
    Proxies,
}

#[derive(Debug, Args)]
pub struct CalendarArgs {
    /// Days of lookback from the anchor date.
    #[arg(long)]
    pub before: Option<u32>,

    /// Days of lookahead from the anchor date.
    #[arg(long)]
    pub after: Option<u32>,

    /// Named range preset: thisweek, nextweek, month, next30.
    #[arg(long)]
    pub range: Option<String>,

    /// Restrict output to major indicators; persisted for the session.
    #[arg(long)]
    pub major_only: Option<bool>,

    /// Anchor date (YYYY-MM-DD); defaults to the current UTC date.
    #[arg(long)]
    pub date: Option<String>,

    /// FRED API key.
    #[arg(long, env = "FRED_API_KEY")]
    pub api_key: Option<String>,
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Eastern calendar date (YYYY-MM-DD).
    #[arg(long)]
    pub date: String,

    /// Eastern clock time (HH:MM).
    #[arg(long)]
    pub time: String,
}
