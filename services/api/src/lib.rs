mod cli;
mod infra;
mod preview;
mod routes;
mod server;

use concierge::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
