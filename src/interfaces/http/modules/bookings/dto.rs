//! Booking DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::CreateReservation;
use crate::domain::Reservation;

/// Booking API representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingDto {
    pub id: i64,
    pub item_id: i64,
    pub booker_id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// WAITING, APPROVED or REJECTED
    pub status: String,
}

impl From<Reservation> for BookingDto {
    fn from(r: Reservation) -> Self {
        Self {
            id: r.id,
            item_id: r.item_id,
            booker_id: r.booker_id,
            start: r.start,
            end: r.end,
            status: r.status.as_str().to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[validate(range(min = 1))]
    pub item_id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl From<CreateBookingRequest> for CreateReservation {
    fn from(r: CreateBookingRequest) -> Self {
        Self {
            item_id: r.item_id,
            start: r.start,
            end: r.end,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ApprovalParams {
    /// `true` approves, `false` rejects
    pub approved: bool,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct StateParams {
    /// ALL, CURRENT, PAST, FUTURE, WAITING, REJECTED or APPROVED
    #[serde(default = "default_state")]
    pub state: String,
    pub from: Option<i64>,
    pub size: Option<i64>,
}

fn default_state() -> String {
    "ALL".to_string()
}
