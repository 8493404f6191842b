//! API router and OpenAPI document

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use super::common::ApiResponse;
use super::modules::health::{self, HealthState};
use super::modules::metrics::{http_metrics_middleware, prometheus_metrics, MetricsState};
use super::modules::request_id::request_id_middleware;
use super::modules::{bookings, items, users};
use crate::application::{ItemService, ReservationQueryService, ReservationService, UserService};
use crate::domain::RepositoryProvider;
use crate::shared::SharedClock;

/// Services shared by all resource handlers.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserService>,
    pub items: Arc<ItemService>,
    pub reservations: Arc<ReservationService>,
    pub reservation_queries: Arc<ReservationQueryService>,
}

impl AppState {
    pub fn new(repos: Arc<dyn RepositoryProvider>, clock: SharedClock) -> Self {
        Self {
            users: Arc::new(UserService::new(repos.clone())),
            items: Arc::new(ItemService::new(repos.clone(), clock.clone())),
            reservations: Arc::new(ReservationService::new(repos.clone(), clock.clone())),
            reservation_queries: Arc::new(ReservationQueryService::new(repos, clock)),
        }
    }
}

/// Documents the acting-user header
struct SharerUserAddon;

impl Modify for SharerUserAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "sharer_user",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("X-Sharer-User-Id"))),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        // Users
        users::create_user,
        users::list_users,
        users::get_user,
        users::update_user,
        users::delete_user,
        // Items
        items::create_item,
        items::update_item,
        items::delete_item,
        items::get_item,
        items::list_owner_items,
        items::search_items,
        items::add_comment,
        // Bookings
        bookings::create_booking,
        bookings::change_booking_status,
        bookings::get_booking,
        bookings::list_booker_bookings,
        bookings::list_owner_bookings,
    ),
    components(
        schemas(
            ApiResponse<String>,
            users::UserDto,
            users::CreateUserRequest,
            users::UpdateUserRequest,
            items::ItemDto,
            items::BookingShortDto,
            items::CommentDto,
            items::CreateItemRequest,
            items::UpdateItemRequest,
            items::CreateCommentRequest,
            bookings::BookingDto,
            bookings::CreateBookingRequest,
            health::HealthResponse,
            health::ComponentHealth,
        )
    ),
    modifiers(&SharerUserAddon),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Users", description = "User directory"),
        (name = "Items", description = "Item catalog and comments"),
        (name = "Bookings", description = "Reservation lifecycle and queries"),
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full HTTP application.
///
/// `/metrics` is only mounted when a Prometheus recorder is installed.
pub fn create_api_router(
    state: AppState,
    health: HealthState,
    metrics: Option<PrometheusHandle>,
) -> Router {
    let api = Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
        .route(
            "/items",
            get(items::list_owner_items).post(items::create_item),
        )
        .route("/items/search", get(items::search_items))
        .route(
            "/items/{id}",
            get(items::get_item)
                .patch(items::update_item)
                .delete(items::delete_item),
        )
        .route("/items/{id}/comment", post(items::add_comment))
        .route(
            "/bookings",
            get(bookings::list_booker_bookings).post(bookings::create_booking),
        )
        .route("/bookings/owner", get(bookings::list_owner_bookings))
        .route(
            "/bookings/{id}",
            get(bookings::get_booking).patch(bookings::change_booking_status),
        )
        .route_layer(middleware::from_fn(http_metrics_middleware))
        .with_state(state);

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health);

    let mut app = Router::new()
        .merge(api)
        .merge(health_routes)
        .route("/api-docs/openapi.json", get(openapi_json));

    if let Some(handle) = metrics {
        let metrics_routes = Router::new()
            .route("/metrics", get(prometheus_metrics))
            .with_state(MetricsState { handle });
        app = app.merge(metrics_routes);
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    app.layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
}
