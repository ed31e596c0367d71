//! HTTP request handlers for the log collection API.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use claw_applog::{parse_limit, validate_application_id, LevelMatch, LogQuery, LogRecord};
use tracing::{debug, info};

use crate::error::{ApiError, ServerResult};
use crate::state::AppState;
use crate::types::{HealthResponse, QueryParams, QueryResponse, UploadRequest, UploadResponse};

/// Handle GET /health - health check endpoint.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_secs: state.uptime_secs(),
    })
}

/// Handle POST /upload - append one record to today's partition.
///
/// The body is decoded as JSON whatever `Content-Type` the client sent.
pub async fn upload_log(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ServerResult<Json<UploadResponse>> {
    let request: UploadRequest = serde_json::from_slice(&body).map_err(|e| {
        debug!(error = %e, "rejected upload body");
        ApiError::Validation("Invalid JSON format or missing required fields".to_string())
    })?;

    let record = LogRecord::from(request);
    record
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let application_id = record.application_id.clone();
    let store = state.store();
    tokio::task::spawn_blocking(move || store.append(&record))
        .await?
        .map_err(ApiError::Upload)?;

    info!(%application_id, "log uploaded");
    Ok(Json(UploadResponse::uploaded()))
}

/// Handle GET /query - read an application's records filtered by level.
pub async fn query_logs(
    State(state): State<Arc<AppState>>,
    params: Result<Query<QueryParams>, QueryRejection>,
) -> ServerResult<Json<QueryResponse>> {
    let Query(params) = params.map_err(|e| ApiError::Validation(e.body_text()))?;
    let query = build_query(params)?;

    let store = state.store();
    let lookup = query.clone();
    let logs = tokio::task::spawn_blocking(move || store.query(&lookup))
        .await?
        .map_err(ApiError::Query)?;

    Ok(Json(QueryResponse {
        application_id: query.application_id,
        log_level: query.level,
        logs,
    }))
}

/// Turn raw query parameters into a store query.
///
/// `application_id` and `log_level` must be present and non-empty. A bad
/// `limit` silently becomes the default; an unknown `match` is rejected.
fn build_query(params: QueryParams) -> ServerResult<LogQuery> {
    let required = |value: Option<String>| value.filter(|v| !v.is_empty());
    let (Some(application_id), Some(level)) =
        (required(params.application_id), required(params.log_level))
    else {
        return Err(ApiError::Validation(
            "application_id and log_level are required".to_string(),
        ));
    };

    validate_application_id(&application_id).map_err(|e| ApiError::Validation(e.to_string()))?;

    let mode = match params.match_mode.as_deref() {
        None | Some("") => LevelMatch::default(),
        Some(raw) => LevelMatch::parse(raw)
            .ok_or_else(|| ApiError::Validation(format!("unknown match mode: {raw}")))?,
    };

    Ok(LogQuery::new(application_id, level)
        .with_limit(parse_limit(params.limit.as_deref()))
        .with_mode(mode))
}
