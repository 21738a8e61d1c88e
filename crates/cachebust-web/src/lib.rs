//! HTTP serving for cache-busted static files.
//!
//! Requests for busted copies held in memory are answered straight from the
//! registry. Everything else (busted copies on disk, vendor files, originals)
//! falls through to directory serving: the configured static root on disk, or
//! the `website/` subtree of the embedded archive.
//!
//! The handler expects URL paths to mirror the static root:
//!
//! ```text
//! website/static/css/styles.min.css  <->  /static/css/styles.min.css
//! ```
//!
//! Mount the router at the root (`merge` or `fallback_service`), not under
//! `nest`, so request paths match the busted public paths in the registry.

use std::path::PathBuf;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use bytes::Bytes;
use cachebust::{BustConfig, SharedRegistry, StorageMode};
use tower::ServiceExt;
use tower_http::{services::ServeDir, trace::TraceLayer};

/// Diagnostic header naming where a static response came from.
pub const SERVED_FROM: &str = "x-static-served-from";

/// Shared state for the static file handler.
#[derive(Clone)]
pub struct StaticFiles {
    pub registry: SharedRegistry,
    /// Browser cache lifetime in days; 0 disables caching.
    pub cache_days: u32,
    /// Directory served on fall-through for disk-sourced files.
    pub static_root: PathBuf,
    /// Archive directory served on fall-through for embedded files.
    pub embedded_root: String,
}

impl StaticFiles {
    pub fn new(registry: SharedRegistry, cache_days: u32, static_root: impl Into<PathBuf>) -> Self {
        Self {
            registry,
            cache_days,
            static_root: static_root.into(),
            embedded_root: "website".to_string(),
        }
    }

    pub fn from_config(registry: SharedRegistry, config: &BustConfig) -> Self {
        Self {
            registry,
            cache_days: config.cache_days,
            static_root: config.static_root.clone(),
            embedded_root: config.embedded_root.clone(),
        }
    }

    pub fn with_embedded_root(mut self, root: impl Into<String>) -> Self {
        self.embedded_root = root.into();
        self
    }
}

pub fn router(state: StaticFiles) -> Router {
    Router::new()
        .fallback(serve_static)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `Cache-Control` value for a lifetime in days.
pub fn cache_control(cache_days: u32) -> String {
    let max_age = u64::from(cache_days) * 24 * 60 * 60;
    format!("no-transform,public,max-age={}", max_age)
}

/// Serve a static file, preferring busted copies held in memory.
pub async fn serve_static(State(state): State<StaticFiles>, request: Request) -> Response {
    let path = request.uri().path().to_string();
    let storage = state.registry.storage();

    if storage.in_memory() {
        match state.registry.lookup(&path) {
            Ok(bytes) => {
                let response = memory_response(&path, bytes);
                return finish(response, "memory", state.cache_days);
            }
            Err(e) if e.is_not_found() => {}
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "odd error serving file from memory");
            }
        }
    }

    let response = match storage {
        StorageMode::Embedded => serve_embedded(&state, &path),
        StorageMode::Disk | StorageMode::Memory => serve_dir(&state, request).await,
    };
    finish(response, storage.fallback_origin(), state.cache_days)
}

fn finish(mut response: Response, origin: &'static str, cache_days: u32) -> Response {
    let headers = response.headers_mut();
    headers.insert(SERVED_FROM, HeaderValue::from_static(origin));
    if let Ok(value) = HeaderValue::from_str(&cache_control(cache_days)) {
        headers.insert(header::CACHE_CONTROL, value);
    }
    response
}

fn content_type(path: &str) -> HeaderValue {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    HeaderValue::from_str(mime.as_ref())
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"))
}

fn memory_response(path: &str, bytes: Bytes) -> Response {
    ([(header::CONTENT_TYPE, content_type(path))], Body::from(bytes)).into_response()
}

/// Whole-file response from the embedded archive. Unlike `ServeDir` there is
/// no conditional (`If-None-Match`, `If-Modified-Since`) or `Range` handling.
fn serve_embedded(state: &StaticFiles, path: &str) -> Response {
    let Some(source) = state.registry.read().embedded_source().cloned() else {
        tracing::warn!(path = %path, "embedded storage without an embedded source");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };

    let relative = path.trim_start_matches('/');
    if relative.split('/').any(|segment| segment == "..") {
        return StatusCode::NOT_FOUND.into_response();
    }

    let key = format!("{}/{}", state.embedded_root.trim_end_matches('/'), relative);
    match source.read(&key) {
        Ok(bytes) => memory_response(path, bytes),
        Err(e) => {
            tracing::debug!(key = %key, error = %e, "not in embedded source");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

async fn serve_dir(state: &StaticFiles, request: Request) -> Response {
    match ServeDir::new(&state.static_root).oneshot(request).await {
        Ok(response) => response.map(Body::new),
        Err(never) => match never {},
    }
}
