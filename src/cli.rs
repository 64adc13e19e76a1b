use crate::model::IdentityShape;
use crate::parse::numstat::{DEFAULT_EXCLUDE_EXTS, DEFAULT_INCLUDE_EXTS};
use anyhow::Result;
use clap::{Args, Parser};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "aigstats")]
#[command(about = "Per-author line statistics with AI-generated share, read from git history")]
#[command(version)]
pub struct Cli {
    #[arg(help = "Start date (YYYY-MM-DD); defaults to the current half-month window")]
    pub since: Option<String>,

    #[arg(help = "End date (YYYY-MM-DD); defaults to the current half-month window")]
    pub until: Option<String>,

    #[clap(flatten)]
    pub common: CommonArgs,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, help = "Path to git repository")]
    pub repo: Option<PathBuf>,

    #[arg(long, help = "Only count commits whose author matches this pattern")]
    pub author: Option<String>,

    #[arg(
        long,
        value_enum,
        default_value_t = IdentityShape::Email,
        help = "Identify authors by name only or by email"
    )]
    pub identity: IdentityShape,

    #[arg(
        long = "include-ext",
        value_delimiter = ',',
        default_values = DEFAULT_INCLUDE_EXTS,
        help = "File extensions counted toward statistics"
    )]
    pub include_ext: Vec<String>,

    #[arg(
        long = "exclude-ext",
        value_delimiter = ',',
        default_values = DEFAULT_EXCLUDE_EXTS,
        help = "File suffixes never counted, even if their extension is included"
    )]
    pub exclude_ext: Vec<String>,

    #[arg(long, help = "Output as JSON")]
    pub json: bool,

    #[arg(long, conflicts_with = "json", help = "Output as NDJSON")]
    pub ndjson: bool,

    #[arg(long, help = "Skip the per-commit trace and print only the summary")]
    pub summary_only: bool,

    #[arg(short, long, help = "Enable debug logging on stderr")]
    pub verbose: bool,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        crate::stats::exec(self.since.as_deref(), self.until.as_deref(), &self.common)
    }
}

/// Log to stderr so stdout stays clean for the report and JSON output.
pub fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
