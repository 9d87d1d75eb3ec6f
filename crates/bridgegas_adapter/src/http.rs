#![forbid(unsafe_code)]

use std::sync::Arc;
use std::time::Instant;

use axum::body::{Body, Bytes};
use axum::extract::{Path, Query, State};
use axum::http::{Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::de::DeserializeOwned;
use tracing::{error, info, Instrument};

use crate::{
    AdapterError, AdapterFieldError, AdapterHealthResponse, AdapterRuntime, ContentUpdateRequest,
    WhitelistSubmitRequest,
};

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct WhitelistReadQuery {
    pub password: Option<String>,
}

impl IntoResponse for AdapterError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        (status, Json(self.body())).into_response()
    }
}

pub fn build_router(runtime: Arc<AdapterRuntime>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route(
            "/api/whitelist",
            get(list_whitelist).post(submit_whitelist),
        )
        .route("/api/content", get(list_content))
        .route(
            "/api/content/:section",
            get(get_content).put(put_content),
        )
        .layer(middleware::from_fn(request_logging))
        .with_state(runtime)
}

async fn request_logging(request: Request<Body>, next: Next) -> Response {
    let method = request.method().to_string();
    let route = request.uri().path().to_string();
    if !route.starts_with("/api") {
        return next.run(request).await;
    }

    let span = tracing::info_span!("http.request", method = %method, route = %route);
    let started = Instant::now();
    let response = next.run(request).instrument(span.clone()).await;
    span.in_scope(|| {
        info!(
            status = response.status().as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "{method} {route}"
        );
    });
    response
}

/// Parses a JSON body, reporting malformed input the same way as a shape failure.
fn parse_body<T: DeserializeOwned>(
    body: &Bytes,
    reject: fn(AdapterFieldError) -> AdapterError,
) -> Result<T, AdapterError> {
    serde_json::from_slice(body)
        .map_err(|err| reject(AdapterFieldError::unreadable_body(err.to_string())))
}

async fn healthz(
    State(runtime): State<Arc<AdapterRuntime>>,
) -> (StatusCode, Json<AdapterHealthResponse>) {
    match runtime.health_report() {
        Ok(response) => (StatusCode::OK, Json(response)),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(AdapterHealthResponse {
                status: "error".to_string(),
                outcome: "UNHEALTHY".to_string(),
                reason: Some(err.to_string()),
                whitelist_count: 0,
                content_section_count: 0,
            }),
        ),
    }
}

async fn submit_whitelist(
    State(runtime): State<Arc<AdapterRuntime>>,
    body: Bytes,
) -> Result<Response, AdapterError> {
    let request: WhitelistSubmitRequest = parse_body(&body, AdapterError::InvalidEmail)?;
    let created = runtime.submit_whitelist_email(request, None)?;
    Ok((StatusCode::CREATED, Json(created)).into_response())
}

async fn list_whitelist(
    State(runtime): State<Arc<AdapterRuntime>>,
    Query(query): Query<WhitelistReadQuery>,
) -> Result<Response, AdapterError> {
    let entries = runtime.list_whitelist_entries(query.password.as_deref())?;
    Ok(Json(entries).into_response())
}

async fn get_content(
    State(runtime): State<Arc<AdapterRuntime>>,
    Path(section): Path<String>,
) -> Result<Response, AdapterError> {
    let row = runtime.get_content_section(&section)?;
    Ok(Json(row).into_response())
}

async fn put_content(
    State(runtime): State<Arc<AdapterRuntime>>,
    Path(section): Path<String>,
    body: Bytes,
) -> Result<Response, AdapterError> {
    let request: ContentUpdateRequest = parse_body(&body, AdapterError::InvalidContent)?;
    let row = runtime.put_content_section(&section, request, None)?;
    Ok(Json(row).into_response())
}

async fn list_content(
    State(runtime): State<Arc<AdapterRuntime>>,
) -> Result<Response, AdapterError> {
    let rows = runtime.list_content_sections()?;
    Ok(Json(rows).into_response())
}
