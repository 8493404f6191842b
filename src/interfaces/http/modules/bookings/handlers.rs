//! Booking API handlers
//!
//! Thin wrappers over `ReservationService` and `ReservationQueryService`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{ApprovalParams, BookingDto, CreateBookingRequest, StateParams};
use crate::interfaces::http::common::{ApiResponse, ValidatedJson};
use crate::interfaces::http::error::ApiError;
use crate::interfaces::http::extract::SharerUserId;
use crate::interfaces::http::router::AppState;

#[utoipa::path(
    post,
    path = "/bookings",
    tag = "Bookings",
    request_body = CreateBookingRequest,
    params(("X-Sharer-User-Id" = i64, Header, description = "Booker")),
    responses(
        (status = 201, description = "Booking created in WAITING", body = ApiResponse<BookingDto>),
        (status = 400, description = "Invalid window or item unavailable"),
        (status = 404, description = "Unknown user/item or own item")
    )
)]
pub async fn create_booking(
    State(state): State<AppState>,
    SharerUserId(booker_id): SharerUserId,
    ValidatedJson(request): ValidatedJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BookingDto>>), ApiError> {
    let reservation = state
        .reservations
        .create(booker_id, request.into())
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(BookingDto::from(reservation))),
    ))
}

#[utoipa::path(
    patch,
    path = "/bookings/{id}",
    tag = "Bookings",
    params(
        ("id" = i64, Path, description = "Booking ID"),
        ApprovalParams,
        ("X-Sharer-User-Id" = i64, Header, description = "Item owner")
    ),
    responses(
        (status = 200, description = "Booking approved or rejected", body = ApiResponse<BookingDto>),
        (status = 400, description = "Booking is no longer waiting"),
        (status = 404, description = "Not found or caller is not the owner")
    )
)]
pub async fn change_booking_status(
    State(state): State<AppState>,
    SharerUserId(user_id): SharerUserId,
    Path(id): Path<i64>,
    Query(params): Query<ApprovalParams>,
) -> Result<Json<ApiResponse<BookingDto>>, ApiError> {
    let reservation = state
        .reservations
        .change_status(user_id, id, params.approved)
        .await?;
    Ok(Json(ApiResponse::success(BookingDto::from(reservation))))
}

#[utoipa::path(
    get,
    path = "/bookings/{id}",
    tag = "Bookings",
    params(
        ("id" = i64, Path, description = "Booking ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Booker or item owner")
    ),
    responses(
        (status = 200, description = "Booking details", body = ApiResponse<BookingDto>),
        (status = 404, description = "Not found or not a participant")
    )
)]
pub async fn get_booking(
    State(state): State<AppState>,
    SharerUserId(user_id): SharerUserId,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<BookingDto>>, ApiError> {
    let reservation = state.reservations.get_detail(user_id, id).await?;
    Ok(Json(ApiResponse::success(BookingDto::from(reservation))))
}

#[utoipa::path(
    get,
    path = "/bookings",
    tag = "Bookings",
    params(
        StateParams,
        ("X-Sharer-User-Id" = i64, Header, description = "Booker")
    ),
    responses(
        (status = 200, description = "Caller's bookings, newest start first", body = ApiResponse<Vec<BookingDto>>),
        (status = 400, description = "Unknown state or bad pagination")
    )
)]
pub async fn list_booker_bookings(
    State(state): State<AppState>,
    SharerUserId(user_id): SharerUserId,
    Query(params): Query<StateParams>,
) -> Result<Json<ApiResponse<Vec<BookingDto>>>, ApiError> {
    let reservations = state
        .reservation_queries
        .query_by_booker(user_id, &params.state, params.from, params.size)
        .await?;
    Ok(Json(ApiResponse::success(
        reservations.into_iter().map(BookingDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/bookings/owner",
    tag = "Bookings",
    params(
        StateParams,
        ("X-Sharer-User-Id" = i64, Header, description = "Item owner")
    ),
    responses(
        (status = 200, description = "Bookings of the caller's items, newest start first", body = ApiResponse<Vec<BookingDto>>),
        (status = 400, description = "Unknown state or bad pagination")
    )
)]
pub async fn list_owner_bookings(
    State(state): State<AppState>,
    SharerUserId(user_id): SharerUserId,
    Query(params): Query<StateParams>,
) -> Result<Json<ApiResponse<Vec<BookingDto>>>, ApiError> {
    let reservations = state
        .reservation_queries
        .query_by_owner(user_id, &params.state, params.from, params.size)
        .await?;
    Ok(Json(ApiResponse::success(
        reservations.into_iter().map(BookingDto::from).collect(),
    )))
}
