use thiserror::Error;
use validator::ValidationErrors;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Slot unavailable: {0}")]
    SlotUnavailable(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] eyre::Report),
}

impl BookingError {
    /// Only infrastructure failures are worth retrying.
    ///
    /// A booking whose store call timed out may still have been committed; the
    /// engine looks for it before reporting the failure, but a retry can still
    /// meet the caller's own appointment and come back as `SlotUnavailable`.
    pub fn is_retryable(&self) -> bool {
        matches!(self, BookingError::StoreUnavailable(_))
    }
}

/// Field-level rule violations from `#[derive(Validate)]` request structs
impl From<ValidationErrors> for BookingError {
    fn from(errors: ValidationErrors) -> Self {
        BookingError::InvalidInput(errors.to_string())
    }
}

pub type BookingResult<T> = Result<T, BookingError>;
