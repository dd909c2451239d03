//! # Motiv API Routes
//!
//! File: server/src/commands/serve/routes.rs
//! Author: Motiv Developers
//!
//! ## Overview
//!
//! The three JSON endpoints under `/api`:
//!
//! | Method | Path          | Success                 | Failure                                   |
//! |--------|---------------|-------------------------|-------------------------------------------|
//! | POST   | `/api/ai`     | `{"reply": ...}`        | 400 `{"error"}`, 500 `{"error","detail"}` |
//! | GET    | `/api/quote`  | `{"quote": ...}`        | none                                      |
//! | POST   | `/api/social` | `{"shareUrl": ...}`     | 400 `{"error"}`                           |
//!
//! Handlers are stateless apart from the shared, read-only [`AppState`].
//!
//! Request bodies go through [`JsonBody`]: a missing body, or one not sent as
//! JSON, reads as an empty request and so gets the usual "Missing ..." 400.
//! Malformed JSON is a 400 with an `{"error"}` body as well.
//!
use crate::core::error::MotivError;
use crate::models::{AiReply, AiRequest, QuoteResponse, ShareReply, ShareRequest};
use crate::services::{quotes::QuoteSet, relay::ChatRelay, share};
use axum::{
    body::Bytes,
    extract::{FromRequest, Request, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, error};

/// Read-only state shared by all handlers.
#[derive(Debug)]
pub struct AppState {
    pub relay: ChatRelay,
    pub quotes: QuoteSet,
}

/// Errors a handler can answer with.
#[derive(Debug)]
pub enum ApiError {
    /// A required field was absent or empty (400).
    MissingInput(&'static str),
    /// The body could not be read or was not valid JSON for the endpoint (400).
    InvalidBody(String),
    /// The upstream call failed (500, with the failure as `detail`).
    Upstream(anyhow::Error),
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast_ref::<MotivError>() {
            Some(MotivError::MissingInput(field)) => ApiError::MissingInput(*field),
            _ => ApiError::Upstream(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MissingInput(field) => {
                let body = AiReply::error(MotivError::MissingInput(field).to_string());
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            ApiError::InvalidBody(message) => {
                (StatusCode::BAD_REQUEST, Json(AiReply::error(message))).into_response()
            }
            ApiError::Upstream(err) => {
                error!("AI request failed: {:#}", err);
                let body = AiReply {
                    error: Some("AI Error".to_string()),
                    detail: Some(err.to_string()),
                    ..Default::default()
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// # JSON Request Body (`JsonBody`)
///
/// Like `axum::Json`, but a body that is empty or not declared as JSON
/// reads as `T::default()`, and every rejection is an [`ApiError`].
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let declared_json = is_json_content_type(req.headers());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::InvalidBody(rejection.body_text()))?;

        // Same as an empty form post: nothing to parse, every field absent.
        if !declared_json || bytes.is_empty() {
            debug!("Request body is empty or not JSON, treating it as empty");
            return Ok(JsonBody(T::default()));
        }

        Json::<T>::from_bytes(&bytes)
            .map(|Json(value)| JsonBody(value))
            .map_err(|rejection| ApiError::InvalidBody(rejection.body_text()))
    }
}

/// `application/json` or any `+json` media type, parameters ignored.
fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || essence.ends_with("+json")
}

async fn ask_ai(
    State(state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<AiRequest>,
) -> ApiResult<Json<AiReply>> {
    let prompt = request
        .prompt
        .filter(|p| !p.is_empty())
        .ok_or(ApiError::MissingInput("prompt"))?;
    let reply = state
        .relay
        .complete(&prompt, request.model.as_deref())
        .await?;
    Ok(Json(AiReply::reply(reply)))
}

async fn random_quote(State(state): State<Arc<AppState>>) -> Json<QuoteResponse> {
    Json(QuoteResponse {
        quote: state.quotes.random().to_string(),
    })
}

async fn share_link(JsonBody(request): JsonBody<ShareRequest>) -> ApiResult<Json<ShareReply>> {
    let platform = request
        .platform
        .filter(|p| !p.is_empty())
        .ok_or(ApiError::MissingInput("platform"))?;

    let share_url =
        share::build_share_url(&platform, request.text.as_deref(), request.url.as_deref());
    Ok(Json(ShareReply {
        share_url: Some(share_url),
        ..Default::default()
    }))
}

/// Routes for the JSON API, relative to the application root.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/ai", post(ask_ai))
        .route("/api/quote", get(random_quote))
        .route("/api/social", post(share_link))
}
