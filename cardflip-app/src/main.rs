mod cli;

use anyhow::Result;
use clap::Parser;
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

use cli::commands::run_cli;
use cli::opts::Cli;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Cli::parse();
    let rt = Runtime::new()?;
    rt.block_on(run_cli(args))
}
