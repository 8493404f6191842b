use chrono::{DateTime, Utc};
use thiserror::Error;

/// Coarse classification of a [`DomainError`].
///
/// The transport layer maps kinds (and a few individual variants) to
/// status codes; the core only ever reports the typed error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Validation,
    Authorization,
    Conflict,
    Internal,
}

#[derive(Debug, Error)]
pub enum DomainError {
    // ── NotFound ────────────────────────────────────────────────
    #[error("User {0} not found")]
    UserNotFound(i64),

    #[error("Item {0} not found")]
    ItemNotFound(i64),

    #[error("Reservation {0} not found")]
    ReservationNotFound(i64),

    // ── Validation ──────────────────────────────────────────────
    #[error("Reservation end {end} must be after start {start}")]
    InvalidDateRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Reservation start {start} is in the past")]
    PastStartTime { start: DateTime<Utc> },

    #[error("Invalid pagination: {0}")]
    InvalidPagination(String),

    #[error("Unknown state: {0}")]
    UnsupportedState(String),

    #[error("User {user_id} has no finished reservation of item {item_id}")]
    CommentNotAllowed { user_id: i64, item_id: i64 },

    #[error("Validation: {0}")]
    Validation(String),

    // ── Authorization ───────────────────────────────────────────
    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    #[error("User {user_id} cannot reserve own item {item_id}")]
    SelfReservationForbidden { user_id: i64, item_id: i64 },

    // ── Conflict ────────────────────────────────────────────────
    #[error("Item {0} is not available")]
    ItemNotAvailable(i64),

    #[error("Reservation {0} is not waiting for approval")]
    NotWaiting(i64),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    // ── Internal ────────────────────────────────────────────────
    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UserNotFound(_) | Self::ItemNotFound(_) | Self::ReservationNotFound(_) => {
                ErrorKind::NotFound
            }
            Self::InvalidDateRange { .. }
            | Self::PastStartTime { .. }
            | Self::InvalidPagination(_)
            | Self::UnsupportedState(_)
            | Self::CommentNotAllowed { .. }
            | Self::Validation(_) => ErrorKind::Validation,
            Self::NotAuthorized(_) | Self::SelfReservationForbidden { .. } => {
                ErrorKind::Authorization
            }
            Self::ItemNotAvailable(_) | Self::NotWaiting(_) | Self::EmailAlreadyExists(_) => {
                ErrorKind::Conflict
            }
            Self::Storage(_) => ErrorKind::Internal,
        }
    }
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<InfraError> for DomainError {
    fn from(e: InfraError) -> Self {
        DomainError::Storage(e.to_string())
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        InfraError::Database(e).into()
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(DomainError::UserNotFound(1).kind(), ErrorKind::NotFound);
        assert_eq!(
            DomainError::UnsupportedState("NOPE".into()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            DomainError::SelfReservationForbidden {
                user_id: 1,
                item_id: 2
            }
            .kind(),
            ErrorKind::Authorization
        );
        assert_eq!(DomainError::NotWaiting(3).kind(), ErrorKind::Conflict);
        assert_eq!(
            DomainError::Storage("disk".into()).kind(),
            ErrorKind::Internal
        );
    }

    #[test]
    fn db_errors_become_opaque_storage_errors() {
        let err: DomainError = sea_orm::DbErr::Custom("boom".into()).into();
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn unsupported_state_message_names_the_state() {
        let err = DomainError::UnsupportedState("UNSUPPORTED_STATUS".into());
        assert_eq!(err.to_string(), "Unknown state: UNSUPPORTED_STATUS");
    }
}
