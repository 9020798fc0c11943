use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE, ETAG};
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use newsroom::domain::response::{ResourceResponse, SECRET_KEY_HEADER};
use newsroom::domain::ViewTally;
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::warn;

pub const CACHE_TAGS_HEADER: &str = "x-cache-tags";
pub const CACHE_CONTEXTS_HEADER: &str = "x-cache-contexts";

#[derive(Serialize)]
pub struct HealthResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ValidationErrorResponse {
    pub error: String,
    pub field: Option<String>,
}

/// Partial page update returned to the settings form
#[derive(Debug, Serialize)]
pub struct AjaxCommand {
    pub command: &'static str,
    pub method: &'static str,
    pub selector: &'static str,
    pub data: String,
}

impl AjaxCommand {
    pub fn html(selector: &'static str, data: impl Into<String>) -> Self {
        Self {
            command: "insert",
            method: "html",
            selector,
            data: data.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ViewTallyResponse {
    pub item: u64,
    pub views_today: u64,
    pub session_views: u64,
    pub total_views: u64,
    pub first_view: bool,
}

impl ViewTallyResponse {
    pub fn new(item: u64, tally: ViewTally) -> Self {
        Self {
            item,
            views_today: tally.day,
            session_views: tally.session,
            total_views: tally.total,
            first_view: tally.first_view,
        }
    }
}

/// A news resource response rendered for HTTP.
///
/// Cacheable responses carry their declared metadata as `x-cache-tags` and
/// `x-cache-contexts`. Nothing purges downstream caches by tag, so they are
/// sent with `cache-control: no-cache` and an `ETag` over the body and the
/// secret key; a matching `If-None-Match` gets a 304.
pub struct NewsResponse {
    pub resource: ResourceResponse,
    pub if_none_match: Option<String>,
}

impl NewsResponse {
    pub fn etag(body: &[u8], secret_key: Option<&str>) -> String {
        let mut hasher = Sha256::new();
        hasher.update(body);
        hasher.update([0u8]);
        hasher.update(secret_key.unwrap_or_default().as_bytes());
        format!("\"{}\"", hex::encode(&hasher.finalize()[..16]))
    }
}

fn etag_matches(if_none_match: &str, etag: &str) -> bool {
    if_none_match.split(',').map(str::trim).any(|candidate| {
        candidate == "*" || candidate.strip_prefix("W/").unwrap_or(candidate) == etag
    })
}

impl IntoResponse for NewsResponse {
    fn into_response(self) -> Response {
        let NewsResponse {
            resource,
            if_none_match,
        } = self;
        let status = StatusCode::from_u16(resource.status).unwrap_or(StatusCode::OK);

        let body = match serde_json::to_vec(&resource.body) {
            Ok(body) => body,
            Err(e) => {
                warn!("Failed to encode news response: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new(e.to_string())),
                )
                    .into_response();
            }
        };

        let mut headers = HeaderMap::new();
        for (name, value) in &resource.headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => warn!("Dropping header '{}' with a value HTTP cannot carry", name),
            }
        }

        if let Some(cache) = &resource.cache {
            if let Ok(value) = HeaderValue::from_str(&cache.tags.join(" ")) {
                headers.insert(HeaderName::from_static(CACHE_TAGS_HEADER), value);
            }
            if let Ok(value) = HeaderValue::from_str(&cache.contexts.join(" ")) {
                headers.insert(HeaderName::from_static(CACHE_CONTEXTS_HEADER), value);
            }
            headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

            let etag = Self::etag(&body, resource.header(SECRET_KEY_HEADER));
            if let Ok(value) = HeaderValue::from_str(&etag) {
                headers.insert(ETAG, value);
            }
            if if_none_match
                .as_deref()
                .is_some_and(|candidates| etag_matches(candidates, &etag))
            {
                return (StatusCode::NOT_MODIFIED, headers).into_response();
            }
        }

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        (status, headers, body).into_response()
    }
}
