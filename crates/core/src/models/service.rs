use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::errors::BookingResult;

/// Prices are stored as `NUMERIC(10, 2)`.
pub const MAX_PRICE_SCALE: u32 = 2;
pub const PRICE_LIMIT: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub duration_minutes: u32,
    pub available: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceRequest {
    #[validate(length(min = 1, max = 255, message = "Service name must be 1 to 255 characters"))]
    pub name: String,
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
    // At most one full day
    #[validate(range(min = 1, max = 1440, message = "Duration must be between 1 and 1440 minutes"))]
    pub duration_minutes: i64,
    #[serde(default)]
    pub available: Option<bool>,
}

/// A catalog entry that passed validation and is ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewService {
    pub name: String,
    pub price: Decimal,
    pub duration_minutes: u32,
    pub available: bool,
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ValidationError::new("negative_price")
            .with_message("Price must not be negative".into()));
    }
    if *price >= PRICE_LIMIT {
        return Err(ValidationError::new("price_too_large")
            .with_message("Price must be below 100000000".into()));
    }
    if price.normalize().scale() > MAX_PRICE_SCALE {
        return Err(ValidationError::new("price_precision")
            .with_message("Price must have at most 2 decimal places".into()));
    }
    Ok(())
}

impl CreateServiceRequest {
    /// Trims the name, then checks every field rule.
    pub fn into_new_service(self) -> BookingResult<NewService> {
        let request = Self {
            name: self.name.trim().to_string(),
            ..self
        };
        request.validate()?;

        Ok(NewService {
            name: request.name,
            price: request.price.normalize(),
            // Range checked above
            duration_minutes: request.duration_minutes as u32,
            available: request.available.unwrap_or(true),
        })
    }
}
