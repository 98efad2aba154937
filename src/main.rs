use std::sync::Arc;

use color_eyre::eyre::Result;
use dotenv::dotenv;
use slotbook_api::{config::ApiConfig, init_tracing};
use slotbook_core::engine::BookingEngine;
use slotbook_db::{create_pool, schema::initialize_database, PgStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;
    init_tracing(config.log_level)?;

    // Create database connection pool
    let db_pool = create_pool(&config.database_url, config.db_max_connections).await?;

    // Initialize database schema
    initialize_database(&db_pool).await?;

    let engine = BookingEngine::new(Arc::new(PgStore::new(db_pool)), config.engine_config());

    // Start API server
    slotbook_api::start_server(config, engine).await?;

    Ok(())
}
