//! State tags used to filter a participant's reservations

use std::str::FromStr;

use chrono::{DateTime, Utc};

use super::model::{Reservation, ReservationStatus};
use crate::shared::errors::DomainError;

/// Query filter tag: temporal (relative to "now") or by status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationState {
    All,
    Current,
    Past,
    Future,
    Waiting,
    Rejected,
    Approved,
}

impl ReservationState {
    /// Resolve the tag into a concrete predicate at `now`.
    pub fn filter_at(self, now: DateTime<Utc>) -> ReservationFilter {
        match self {
            Self::All => ReservationFilter::All,
            Self::Current => ReservationFilter::ActiveAt(now),
            Self::Past => ReservationFilter::EndedBefore(now),
            Self::Future => ReservationFilter::StartsAfter(now),
            Self::Waiting => ReservationFilter::Status(ReservationStatus::Waiting),
            Self::Rejected => ReservationFilter::Status(ReservationStatus::Rejected),
            Self::Approved => ReservationFilter::Status(ReservationStatus::Approved),
        }
    }
}

impl FromStr for ReservationState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALL" => Ok(Self::All),
            "CURRENT" => Ok(Self::Current),
            "PAST" => Ok(Self::Past),
            "FUTURE" => Ok(Self::Future),
            "WAITING" => Ok(Self::Waiting),
            "REJECTED" => Ok(Self::Rejected),
            "APPROVED" => Ok(Self::Approved),
            other => Err(DomainError::UnsupportedState(other.to_string())),
        }
    }
}

/// Predicate a store applies when listing reservations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationFilter {
    All,
    /// `start <= t <= end`
    ActiveAt(DateTime<Utc>),
    /// `end < t`
    EndedBefore(DateTime<Utc>),
    /// `start > t`
    StartsAfter(DateTime<Utc>),
    Status(ReservationStatus),
}

impl ReservationFilter {
    pub fn matches(&self, r: &Reservation) -> bool {
        match *self {
            Self::All => true,
            Self::ActiveAt(t) => r.is_current_at(t),
            Self::EndedBefore(t) => r.is_past_at(t),
            Self::StartsAfter(t) => r.is_future_at(t),
            Self::Status(status) => r.status == status,
        }
    }
}
