use crate::models::{DbAppointment, DbAppointmentWithService};
use chrono::Utc;
use eyre::Result;
use slotbook_core::{models::appointment::NewAppointment, store::AppointmentFilter};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Result of an attempted booking insert.
#[derive(Debug)]
pub enum InsertOutcome {
    Created(DbAppointment),
    /// Another appointment of the same service overlaps the requested interval.
    Conflict,
    ServiceMissing,
}

pub async fn find_appointments(
    pool: &Pool<Postgres>,
    filter: &AppointmentFilter,
) -> Result<Vec<DbAppointment>> {
    let range = filter.range();

    // Half-open overlap: existing.start < range.end AND range.start < existing.end
    let appointments = match filter.service_id() {
        Some(service_id) => {
            sqlx::query_as::<_, DbAppointment>(
                r#"
                SELECT id, service_id, customer_name, customer_email, start_time, end_time, created_at
                FROM appointments
                WHERE service_id = $1 AND start_time < $3 AND end_time > $2
                "#,
            )
            .bind(service_id)
            .bind(range.start)
            .bind(range.end)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, DbAppointment>(
                r#"
                SELECT id, service_id, customer_name, customer_email, start_time, end_time, created_at
                FROM appointments
                WHERE start_time < $2 AND end_time > $1
                "#,
            )
            .bind(range.start)
            .bind(range.end)
            .fetch_all(pool)
            .await?
        }
    };

    Ok(appointments)
}

pub async fn list_appointments_with_service(
    pool: &Pool<Postgres>,
) -> Result<Vec<DbAppointmentWithService>> {
    let appointments = sqlx::query_as::<_, DbAppointmentWithService>(
        r#"
        SELECT a.id, a.service_id, a.customer_name, a.customer_email,
               a.start_time, a.end_time, a.created_at, s.name AS service_name
        FROM appointments a
        JOIN services s ON s.id = a.service_id
        ORDER BY a.created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(appointments)
}

/// Checks for an overlapping appointment and inserts in one transaction.
///
/// The service row is locked `FOR UPDATE` first, so concurrent bookings for
/// the same service run this check one at a time. The `(service_id,
/// start_time)` unique key backs this up for identical start times.
pub async fn create_appointment_if_free(
    pool: &Pool<Postgres>,
    appointment: &NewAppointment,
) -> Result<InsertOutcome> {
    let mut tx = pool.begin().await?;

    let locked = sqlx::query_scalar::<_, Uuid>("SELECT id FROM services WHERE id = $1 FOR UPDATE")
        .bind(appointment.service_id)
        .fetch_optional(&mut *tx)
        .await?;
    if locked.is_none() {
        tx.rollback().await?;
        return Ok(InsertOutcome::ServiceMissing);
    }

    let conflicting = sqlx::query_scalar::<_, Uuid>(
        r#"
        SELECT id
        FROM appointments
        WHERE service_id = $1 AND start_time < $3 AND end_time > $2
        LIMIT 1
        "#,
    )
    .bind(appointment.service_id)
    .bind(appointment.interval.start)
    .bind(appointment.interval.end)
    .fetch_optional(&mut *tx)
    .await?;
    if let Some(existing) = conflicting {
        tracing::debug!(
            "Appointment {} overlaps requested interval for service {}",
            existing, appointment.service_id
        );
        tx.rollback().await?;
        return Ok(InsertOutcome::Conflict);
    }

    let inserted = sqlx::query_as::<_, DbAppointment>(
        r#"
        INSERT INTO appointments (id, service_id, customer_name, customer_email, start_time, end_time, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, service_id, customer_name, customer_email, start_time, end_time, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(appointment.service_id)
    .bind(&appointment.customer_name)
    .bind(&appointment.customer_email)
    .bind(appointment.interval.start)
    .bind(appointment.interval.end)
    .bind(Utc::now())
    .fetch_one(&mut *tx)
    .await;

    match inserted {
        Ok(row) => {
            tx.commit().await?;
            Ok(InsertOutcome::Created(row))
        }
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            tx.rollback().await?;
            Ok(InsertOutcome::Conflict)
        }
        Err(e) => Err(e.into()),
    }
}
