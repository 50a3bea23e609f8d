use std::sync::Arc;
use std::time::Instant;

use axum::extract::Request;
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::{
    Router,
    routing::{delete, get, post},
};

use super::{attendance, sections, students};
use crate::store::Store;

pub struct AppState {
    pub store: Arc<dyn Store>,
}

async fn health() -> &'static str {
    "OK"
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    let latency = start.elapsed();
    let status = response.status();

    tracing::info!(
        "{} {} {} {}ms",
        method,
        uri.path(),
        status.as_u16(),
        latency.as_millis()
    );

    response
}

/// Permissive cross-origin access: every response advertises `*`, and
/// preflights are answered without reaching a handler.
async fn allow_any_origin(request: Request, next: Next) -> Response {
    let preflight = request.method() == Method::OPTIONS;

    let mut response = if preflight {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(request).await
    };

    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, DELETE, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("content-type"),
    );

    response
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/sections", get(sections::list_sections))
        .route("/sections", post(sections::create_section))
        .route("/sections/{name}", delete(sections::delete_section))
        .route("/students/{section}", get(students::list_students))
        .route("/students", post(students::create_student))
        .route("/students/{id}/{section}", delete(students::delete_student))
        .route("/attendance/{id}", post(attendance::mark_attendance))
        .route(
            "/attendance-status/{section}/{date}",
            get(attendance::day_status),
        )
        .layer(middleware::from_fn(allow_any_origin))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}
