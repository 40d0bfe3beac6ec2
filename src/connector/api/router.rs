use std::any::Any;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{DefaultBodyLimit, Request, State};
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Json;
use serde_json::Value;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tracing::{error, info};

use crate::domain::{AuditRequest, ChatRequest, RecommendRequest, Recommendation};

use super::container::Container;
use super::controller::{
    AuditController, ChatController, ChatReply, HealthController, HealthStatus,
    RecommendController,
};
use super::error::{parse_body, ApiError};

/// The relay always listens here.
pub const LISTEN_ADDR: &str = "0.0.0.0:3001";
/// Request bodies above this size are rejected with 413.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

const ALLOW_HEADERS: &str = "Content-Type, Authorization";
const ALLOW_METHODS: &str = "POST, OPTIONS";

pub fn build_router(container: Arc<Container>) -> axum::Router {
    axum::Router::new()
        .route("/", get(banner))
        .route("/api/health", get(health))
        .route("/api/chat", post(chat))
        .route("/api/recommend", post(recommend))
        .route("/api/audit", post(audit))
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn(cors))
        .layer(middleware::from_fn(log_http_request))
        .with_state(container)
}

/// Serve the relay on `listener` until Ctrl-C.
pub async fn serve(listener: TcpListener, container: Arc<Container>) -> Result<()> {
    let addr = listener.local_addr().context("listener has no local address")?;
    info!(addr = %addr, "AUTO-GEN API listening");

    axum::serve(listener, build_router(container))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("AUTO-GEN API shutting down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}

async fn banner() -> &'static str {
    HealthController.banner()
}

async fn health() -> Json<HealthStatus> {
    Json(HealthController.health())
}

async fn chat(
    State(container): State<Arc<Container>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ChatReply>, ApiError> {
    let request: ChatRequest = parse_body(&body?)?;
    let reply = ChatController::new(&container).chat(request).await?;
    Ok(Json(reply))
}

async fn recommend(
    State(container): State<Arc<Container>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Recommendation>, ApiError> {
    let request: RecommendRequest = parse_body(&body?)?;
    let recommendation = RecommendController::new(&container)
        .recommend(request)
        .await?;
    Ok(Json(recommendation))
}

async fn audit(
    State(container): State<Arc<Container>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Value>, ApiError> {
    let request: AuditRequest = parse_body(&body?)?;
    let report = AuditController::new(&container).audit(request).await?;
    Ok(Json(report))
}

async fn not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "not found")
}

async fn method_not_allowed() -> ApiError {
    ApiError::new(StatusCode::METHOD_NOT_ALLOWED, "method not allowed")
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!("handler panicked: {detail}");
    ApiError::internal("internal server error").into_response()
}

/// Every response allows any origin; preflight (any OPTIONS) ends here with 204.
async fn cors(req: Request, next: Next) -> Response {
    let mut response = if req.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(req).await
    };

    let headers = response.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(ALLOW_HEADERS));
    headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOW_METHODS));
    response
}

async fn log_http_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let start_time = Instant::now();

    let response = next.run(req).await;

    info!(
        method = %method,
        uri = %uri,
        status = %response.status(),
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "http request"
    );
    response
}
