use axum::{
    Form, Router,
    extract::{FromRequest, Path, Request, State},
    http::{StatusCode, header},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use domain::{
    DomainError, NetWeight, RawWeighingRequest, SessionSummary, TransactionId, WeighingRequest,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/weight", post(post_weight))
        .route("/session/{id}", get(get_session))
        .route("/health", get(health))
        .route("/health/db", get(health_db))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Body of a successful weighing. `truckTara`/`neto` only once weighed out.
#[derive(Debug, Serialize)]
struct WeighingResponse {
    id: String,
    truck: String,
    bruto: i64,
    #[serde(rename = "truckTara", skip_serializing_if = "Option::is_none")]
    truck_tara: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    neto: Option<NetWeight>,
}

impl From<SessionSummary> for WeighingResponse {
    fn from(summary: SessionSummary) -> Self {
        Self {
            id: summary.session_id.to_string(),
            truck: summary.truck.to_string(),
            bruto: summary.bruto,
            truck_tara: summary.truck_tara,
            neto: summary.neto,
        }
    }
}

/// `{error: message}` with a status code per error kind.
struct ApiError(DomainError);

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            DomainError::NotFound(_) => StatusCode::NOT_FOUND,
            DomainError::Conflict(_) => StatusCode::CONFLICT,
            DomainError::Storage(_) => {
                error!("Storage failure while handling request: {}", self.0);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

async fn post_weight(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<WeighingResponse>, ApiError> {
    let raw = read_weighing_body(request).await?;
    let weighing = WeighingRequest::try_from(raw)?;
    let summary = state.ledger.record_event(weighing).await?;
    Ok(Json(summary.into()))
}

/// Scales post JSON; the operator page posts an HTML form.
async fn read_weighing_body(request: Request) -> Result<RawWeighingRequest, ApiError> {
    let is_form = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

    let malformed = |reason: String| {
        ApiError(DomainError::Validation(format!("invalid request body: {reason}")))
    };

    if is_form {
        let Form(raw) = Form::<RawWeighingRequest>::from_request(request, &())
            .await
            .map_err(|e| malformed(e.body_text()))?;
        Ok(raw)
    } else {
        let Json(raw) = Json::<RawWeighingRequest>::from_request(request, &())
            .await
            .map_err(|e| malformed(e.body_text()))?;
        Ok(raw)
    }
}

async fn get_session(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<WeighingResponse>, ApiError> {
    let session_id: TransactionId = id
        .parse()
        .map_err(|_| DomainError::Validation(format!("invalid session id: {id}")))?;
    let summary = state.ledger.session(session_id).await?;
    Ok(Json(summary.into()))
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, [(header::CONTENT_TYPE, "text/plain")], "OK")
}

async fn health_db(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.db.ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "ok": true }))),
        Err(e) => {
            error!("Database health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "ok": false })))
        }
    }
}
