use color_eyre::eyre::{Result, WrapErr};
use dotenv::dotenv;
use rust_decimal_macros::dec;
use slotbook_core::models::service::NewService;
use slotbook_db::{repositories::service::replace_catalog, schema::initialize_database};
use tracing::{info, Level};

/// Sample catalog: (name, price, duration in minutes)
fn sample_services() -> Vec<NewService> {
    [
        ("Haircut", dec!(35.00), 30),
        ("Consultation", dec!(100.00), 60),
        ("Massage", dec!(65.00), 45),
        ("Quick Repair", dec!(40.00), 20),
    ]
    .into_iter()
    .map(|(name, price, duration_minutes)| NewService {
        name: name.to_string(),
        price,
        duration_minutes,
        available: true,
    })
    .collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv().ok();
    slotbook_api::init_tracing(Level::INFO)?;

    let database_url =
        std::env::var("DATABASE_URL").wrap_err("DATABASE_URL environment variable must be set")?;
    let db_pool = slotbook_db::create_pool(&database_url, 1).await?;
    initialize_database(&db_pool).await?;

    // Existing appointments are dropped together with the old catalog
    let services = replace_catalog(&db_pool, &sample_services()).await?;

    for service in &services {
        info!(
            "Seeded {} ({} min, {})",
            service.name, service.duration_minutes, service.price
        );
    }
    info!("Database seeded with {} services", services.len());

    Ok(())
}
