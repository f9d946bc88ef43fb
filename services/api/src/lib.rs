mod cli;
mod infra;
mod rank;
mod routes;
mod server;

use bet_ranking::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
