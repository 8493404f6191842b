//! Derivation of an item's last and next reservation

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::model::{Reservation, ReservationSummary};

/// Derived, non-persisted view fields of an item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ItemAvailability {
    pub last_reservation: Option<ReservationSummary>,
    pub next_reservation: Option<ReservationSummary>,
}

/// Classify an item's reservation history relative to `now`.
///
/// `next` is the entry with the smallest `start > now` (earlier input wins a
/// tie); `last` is the entry with the largest `end < now` (later input wins a
/// tie). Every status counts, rejected reservations included.
pub fn classify(reservations: &[Reservation], now: DateTime<Utc>) -> ItemAvailability {
    let mut last: Option<&Reservation> = None;
    let mut next: Option<&Reservation> = None;

    for r in reservations {
        if r.end < now && last.map_or(true, |l| r.end >= l.end) {
            last = Some(r);
        }
        if r.start > now && next.map_or(true, |n| r.start < n.start) {
            next = Some(r);
        }
    }

    ItemAvailability {
        last_reservation: last.map(Reservation::summary),
        next_reservation: next.map(Reservation::summary),
    }
}
