use clap::{Parser, Subcommand};
use summaly_fetch::{Fetcher, ReqwestClient};
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{get::Get, head::Head, scrape::Scrape};

#[derive(Debug, Parser)]
#[command(name = "summaly", about = "Fetch and decode pages for link previews", version)]
struct Cli {
    /// Maximum number of redirects the transport follows.
    #[arg(long, global = true, default_value_t = summaly_fetch::DEFAULT_REDIRECT_LIMIT)]
    redirects: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    Scrape(Scrape),
    Get(Get),
    Head(Head),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let fetcher = Fetcher::new(ReqwestClient::with_redirect_limit(cli.redirects)?);

    match cli.command {
        Command::Scrape(cmd) => cmd.run(&fetcher).await,
        Command::Get(cmd) => cmd.run(&fetcher).await,
        Command::Head(cmd) => cmd.run(&fetcher).await,
    }
}
