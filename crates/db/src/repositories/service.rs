use crate::models::DbService;
use chrono::Utc;
use eyre::Result;
use slotbook_core::models::service::NewService;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_service(pool: &Pool<Postgres>, service: &NewService) -> Result<DbService> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating service: id={}, name={}, duration={}",
        id, service.name, service.duration_minutes
    );

    let created = sqlx::query_as::<_, DbService>(
        r#"
        INSERT INTO services (id, name, price, duration_minutes, available, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, name, price, duration_minutes, available, created_at
        "#,
    )
    .bind(id)
    .bind(&service.name)
    .bind(service.price)
    .bind(i32::try_from(service.duration_minutes)?)
    .bind(service.available)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(created)
}

pub async fn get_service_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbService>> {
    tracing::debug!("Getting service by id: {}", id);

    let service = sqlx::query_as::<_, DbService>(
        r#"
        SELECT id, name, price, duration_minutes, available, created_at
        FROM services
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    if service.is_none() {
        tracing::debug!("Service not found: id={}", id);
    }

    Ok(service)
}

pub async fn list_services(pool: &Pool<Postgres>) -> Result<Vec<DbService>> {
    let services = sqlx::query_as::<_, DbService>(
        r#"
        SELECT id, name, price, duration_minutes, available, created_at
        FROM services
        ORDER BY created_at ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(services)
}

/// Replaces the whole catalog. Appointments reference services, so they are
/// cleared along with it.
pub async fn replace_catalog(pool: &Pool<Postgres>, services: &[NewService]) -> Result<Vec<DbService>> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM appointments").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM services").execute(&mut *tx).await?;

    let mut created = Vec::with_capacity(services.len());
    for service in services {
        let row = sqlx::query_as::<_, DbService>(
            r#"
            INSERT INTO services (id, name, price, duration_minutes, available, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, price, duration_minutes, available, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&service.name)
        .bind(service.price)
        .bind(i32::try_from(service.duration_minutes)?)
        .bind(service.available)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;
        created.push(row);
    }

    tx.commit().await?;
    Ok(created)
}
