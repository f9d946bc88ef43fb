use crate::rank::{run_rank, RankArgs};
use crate::server;
use bet_ranking::error::AppError;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "bet-ranking",
    about = "Score and rank regulated bet houses from a catalog export",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print a ranking computed from a catalog CSV export
    Rank(RankArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Catalog CSV export to serve (overrides BET_CATALOG_CSV)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Category weight table in JSON (overrides BET_SCORING_CONFIG)
    #[arg(long)]
    pub(crate) scoring_config: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Rank(args) => run_rank(args),
    }
}
