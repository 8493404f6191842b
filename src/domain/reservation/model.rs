//! Reservation domain entity

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Status string found in rows written by older deployments.
///
/// No transition produces it and the domain type cannot hold it; the
/// stores report such rows as storage errors.
pub const LEGACY_CANCELED_STATUS: &str = "CANCELED";

/// Reservation status
///
/// `Waiting` is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    /// Created, awaiting the owner's decision
    Waiting,
    /// Approved by the item owner
    Approved,
    /// Rejected by the item owner
    Rejected,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "WAITING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "WAITING" => Some(Self::Waiting),
            "APPROVED" => Some(Self::Approved),
            "REJECTED" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Outcome of an owner decision.
    pub fn decided(approve: bool) -> Self {
        if approve {
            Self::Approved
        } else {
            Self::Rejected
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Waiting)
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A request to use an item over `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    pub id: i64,
    pub item_id: i64,
    /// Owner of `item_id`, captured when the reservation was made
    pub item_owner_id: i64,
    pub booker_id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: ReservationStatus,
}

impl Reservation {
    pub fn is_waiting(&self) -> bool {
        self.status == ReservationStatus::Waiting
    }

    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.item_owner_id == user_id
    }

    /// Booker or item owner
    pub fn is_participant(&self, user_id: i64) -> bool {
        self.booker_id == user_id || self.is_owned_by(user_id)
    }

    pub fn is_current_at(&self, now: DateTime<Utc>) -> bool {
        self.start <= now && now <= self.end
    }

    pub fn is_past_at(&self, now: DateTime<Utc>) -> bool {
        self.end < now
    }

    pub fn is_future_at(&self, now: DateTime<Utc>) -> bool {
        self.start > now
    }

    pub fn summary(&self) -> ReservationSummary {
        ReservationSummary {
            id: self.id,
            booker_id: self.booker_id,
            start: self.start,
            end: self.end,
        }
    }
}

/// Data for a reservation that has not been persisted yet.
///
/// The store assigns the id and the initial `Waiting` status.
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub item_id: i64,
    pub item_owner_id: i64,
    pub booker_id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Minimal projection attached to item views as last/next reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReservationSummary {
    pub id: i64,
    pub booker_id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}
