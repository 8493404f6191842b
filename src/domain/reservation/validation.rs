//! Interval checks for new reservations

use chrono::{DateTime, Utc};

use crate::shared::errors::{DomainError, DomainResult};

/// Validate a requested `[start, end)` window against `now`.
///
/// The start check runs first: a window that is both in the past and
/// inverted reports `PastStartTime`.
pub fn validate_window(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    now: DateTime<Utc>,
) -> DomainResult<()> {
    if start < now {
        return Err(DomainError::PastStartTime { start });
    }
    if end <= start {
        return Err(DomainError::InvalidDateRange { start, end });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn accepts_future_ordered_window() {
        let now = Utc::now();
        assert!(validate_window(now + Duration::hours(2), now + Duration::hours(4), now).is_ok());
    }

    #[test]
    fn start_equal_to_now_is_allowed() {
        let now = Utc::now();
        assert!(validate_window(now, now + Duration::minutes(1), now).is_ok());
    }

    #[test]
    fn rejects_start_in_the_past() {
        let now = Utc::now();
        let err = validate_window(now - Duration::seconds(1), now + Duration::hours(1), now)
            .unwrap_err();
        assert!(matches!(err, DomainError::PastStartTime { .. }));
    }

    #[test]
    fn rejects_end_before_or_at_start() {
        let now = Utc::now();
        let start = now + Duration::hours(2);

        let err = validate_window(start, start - Duration::hours(1), now).unwrap_err();
        assert!(matches!(err, DomainError::InvalidDateRange { .. }));

        let err = validate_window(start, start, now).unwrap_err();
        assert!(matches!(err, DomainError::InvalidDateRange { .. }));
    }

    #[test]
    fn past_start_wins_over_inverted_range() {
        let now = Utc::now();
        let err = validate_window(now - Duration::hours(1), now - Duration::hours(2), now)
            .unwrap_err();
        assert!(matches!(err, DomainError::PastStartTime { .. }));
    }
}
