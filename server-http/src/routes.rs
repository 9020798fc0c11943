use crate::handlers;
use crate::state::AppState;
use axum::{
    http::{HeaderName, HeaderValue, Method, StatusCode},
    routing::{get, post},
    Router,
};
use newsroom::domain::response::SECRET_KEY_HEADER;
use shared::config::Config;
use tower::Layer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub const NEWS_PATH: &str = "/expose_api/news_resource";
pub const SETTINGS_PATH: &str = "/admin/config/news-api";

/// The router wrapped in trailing-slash normalization. The normalization
/// has to sit outside the router to run before route matching.
pub type App = NormalizePath<Router>;

/// Build and configure the application router
pub fn build_router(state: AppState, config: &Config) -> App {
    let router = Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // News resource
        .route(NEWS_PATH, get(handlers::get_news))
        .route(
            &format!("{}/{{id}}/views", NEWS_PATH),
            post(handlers::record_view),
        )
        // Admin settings form
        .route(
            SETTINGS_PATH,
            get(handlers::settings_form).post(handlers::submit_settings),
        )
        // Middleware
        .layer(cors_layer(config))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins = if config.allows_any_origin() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            config
                .allowed_origins
                .iter()
                .filter_map(|origin| HeaderValue::from_str(origin).ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .expose_headers([HeaderName::from_static(SECRET_KEY_HEADER)])
}
