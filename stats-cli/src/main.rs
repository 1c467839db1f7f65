//! Statistics CLI - query the repository statistics charts from a terminal.

use clap::Parser;
use env_logger::Env;

#[derive(Parser)]
#[command(
    name = "stats-cli",
    version,
    about = "Repository statistics charts and contribution checks"
)]
struct Cli {
    /// Log requests and chart loads (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: stats_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();
    stats_cmd::run(cli.command).await
}
