use aigstats::cli::{init_tracing, Cli};
use anyhow::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.common.verbose);
    cli.execute()
}
