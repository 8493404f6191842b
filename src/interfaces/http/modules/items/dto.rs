//! Item and comment DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{Comment, Item, ItemPatch, ItemView, ReservationSummary};

/// Short booking projection shown on an owner's item view
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingShortDto {
    pub id: i64,
    pub booker_id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl From<ReservationSummary> for BookingShortDto {
    fn from(s: ReservationSummary) -> Self {
        Self {
            id: s.id,
            booker_id: s.booker_id,
            start: s.start,
            end: s.end,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
    pub id: i64,
    pub text: String,
    pub author_name: String,
    pub created: DateTime<Utc>,
}

impl From<Comment> for CommentDto {
    fn from(c: Comment) -> Self {
        Self {
            id: c.id,
            text: c.text,
            author_name: c.author_name,
            created: c.created,
        }
    }
}

/// Item API representation
///
/// `lastBooking`/`nextBooking` are only present on the owner's view.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemDto {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub last_booking: Option<BookingShortDto>,
    pub next_booking: Option<BookingShortDto>,
    pub comments: Vec<CommentDto>,
}

impl From<Item> for ItemDto {
    fn from(i: Item) -> Self {
        Self {
            id: i.id,
            owner_id: i.owner_id,
            name: i.name,
            description: i.description,
            available: i.available,
            last_booking: None,
            next_booking: None,
            comments: Vec::new(),
        }
    }
}

impl From<ItemView> for ItemDto {
    fn from(view: ItemView) -> Self {
        let availability = view.availability.unwrap_or_default();
        Self {
            last_booking: availability.last_reservation.map(Into::into),
            next_booking: availability.next_reservation.map(Into::into),
            comments: view.comments.into_iter().map(Into::into).collect(),
            ..ItemDto::from(view.item)
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateItemRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 2000))]
    pub description: String,
    pub available: bool,
}

/// Partial item update; absent fields stay unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateItemRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    pub available: Option<bool>,
}

impl From<UpdateItemRequest> for ItemPatch {
    fn from(r: UpdateItemRequest) -> Self {
        Self {
            name: r.name,
            description: r.description,
            available: r.available,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 2000))]
    pub text: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchParams {
    /// Text matched against name and description
    #[serde(default)]
    pub text: String,
    pub from: Option<i64>,
    pub size: Option<i64>,
}
