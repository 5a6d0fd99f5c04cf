mod apply;
mod cli;
mod infra;
mod preview;
mod routes;
mod server;

use fan_coach::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
