mod cli;
mod commands;
mod infra;
mod routes;
mod server;

pub use routes::discount_router;

use volume_discount::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
