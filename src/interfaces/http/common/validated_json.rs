//! JSON body extractor with `validator` rules applied

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use super::ApiResponse;

/// Request body that parsed and passed its `#[validate]` rules.
///
/// A body that is not valid JSON for `T` is answered with 400; a body that
/// parses but breaks a rule (e.g. `CreateBookingRequest` with `itemId: 0`)
/// with 422 and the offending fields listed.
///
/// ```ignore
/// async fn add_comment(
///     SharerUserId(user_id): SharerUserId,
///     Path(item_id): Path<i64>,
///     ValidatedJson(body): ValidatedJson<CreateCommentRequest>,
/// ) -> Result<Json<ApiResponse<CommentDto>>, ApiError> { ... }
/// ```
pub struct ValidatedJson<T>(pub T);

pub enum ValidatedJsonRejection {
    Malformed(JsonRejection),
    Invalid(ValidationErrors),
}

/// `field: code` pairs sorted by field, so messages are stable.
fn describe(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => format!("{field}: {msg}"),
                None => format!("{field}: {}", e.code),
            })
        })
        .collect();
    parts.sort();

    if parts.is_empty() {
        "Validation failed".to_string()
    } else {
        parts.join("; ")
    }
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Malformed(rejection) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid JSON: {}", rejection.body_text()),
            ),
            Self::Invalid(errors) => (StatusCode::UNPROCESSABLE_ENTITY, describe(&errors)),
        };
        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::Malformed)?;
        body.validate().map_err(ValidatedJsonRejection::Invalid)?;
        Ok(Self(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::routing::post;
    use axum::Router;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::interfaces::http::modules::bookings::CreateBookingRequest;
    use crate::interfaces::http::modules::items::CreateCommentRequest;

    async fn accept_booking(ValidatedJson(body): ValidatedJson<CreateBookingRequest>) -> String {
        body.item_id.to_string()
    }

    async fn accept_comment(ValidatedJson(body): ValidatedJson<CreateCommentRequest>) -> String {
        body.text
    }

    async fn post_json(uri: &str, body: Body, content_type: Option<&str>) -> (StatusCode, Vec<u8>) {
        let app = Router::new()
            .route("/bookings", post(accept_booking))
            .route("/comment", post(accept_comment));

        let mut req = axum::http::Request::builder().method("POST").uri(uri);
        if let Some(ct) = content_type {
            req = req.header("content-type", ct);
        }
        let resp = app.oneshot(req.body(body).unwrap()).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    async fn post_value(uri: &str, body: Value) -> (StatusCode, Vec<u8>) {
        post_json(
            uri,
            Body::from(serde_json::to_vec(&body).unwrap()),
            Some("application/json"),
        )
        .await
    }

    fn error_of(bytes: &[u8]) -> String {
        let v: Value = serde_json::from_slice(bytes).unwrap();
        assert_eq!(v["success"], false);
        v["error"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn well_formed_booking_reaches_the_handler() {
        let (status, bytes) = post_value(
            "/bookings",
            json!({"itemId": 7, "start": "2030-01-01T10:00:00Z", "end": "2030-01-02T10:00:00Z"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(bytes, b"7");
    }

    #[tokio::test]
    async fn zero_item_id_breaks_the_range_rule() {
        let (status, bytes) = post_value(
            "/bookings",
            json!({"itemId": 0, "start": "2030-01-01T10:00:00Z", "end": "2030-01-02T10:00:00Z"}),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(error_of(&bytes), "item_id: range");
    }

    #[tokio::test]
    async fn empty_comment_is_rejected() {
        let (status, bytes) = post_value("/comment", json!({"text": ""})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(error_of(&bytes).starts_with("text:"));

        let (status, bytes) = post_value("/comment", json!({"text": "Sturdy and clean"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(bytes, b"Sturdy and clean");
    }

    #[tokio::test]
    async fn unparseable_bodies_are_bad_requests() {
        // broken syntax
        let (status, bytes) =
            post_json("/comment", Body::from("{text"), Some("application/json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(error_of(&bytes).starts_with("Invalid JSON"));

        // window timestamps missing
        let (status, _) = post_value("/bookings", json!({"itemId": 3})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        // no content type
        let (status, _) = post_json("/comment", Body::from(r#"{"text":"hi"}"#), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
