use crate::api::{ErrorResponse, NewsResponse, ValidationErrorResponse, ViewTallyResponse};
use crate::state::AppState;
use crate::validation;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::{header::IF_NONE_MATCH, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use newsroom::domain::request::NewsQuery;
use tracing::{info, warn};

/// GET /expose_api/news_resource?tags=...
pub async fn get_news(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> NewsResponse {
    let query = match query {
        Ok(Query(pairs)) => NewsQuery::from_pairs(pairs),
        Err(e) => {
            warn!("Unreadable news query string: {}", e);
            NewsQuery::default()
        }
    };

    info!("GET_NEWS: tags={:?}", query.tags);

    NewsResponse {
        resource: state.news_resource.get(&query).await,
        if_none_match: headers
            .get(IF_NONE_MATCH)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
    }
}

/// POST /expose_api/news_resource/:id/views
pub async fn record_view(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    headers: HeaderMap,
) -> Response {
    let session = match validation::session_id(&headers) {
        Ok(session) => session,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ValidationErrorResponse {
                    error: e.to_string(),
                    field: Some(e.field().to_string()),
                }),
            )
                .into_response()
        }
    };

    info!("RECORD_VIEW: item={}, session={}", id, session);

    match state.content.item_exists(id).await {
        Ok(true) => {}
        Ok(false) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new(format!("News item {} not found", id))),
            )
                .into_response()
        }
        Err(e) => {
            warn!("Failed to load item {}: {}", id, e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(e.to_string())),
            )
                .into_response();
        }
    }

    match state.views.record_view(id, &session).await {
        Ok(tally) => Json(ViewTallyResponse::new(id, tally)).into_response(),
        Err(e) => {
            warn!("Failed to record view of item {}: {}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(e.to_string())),
            )
                .into_response()
        }
    }
}
