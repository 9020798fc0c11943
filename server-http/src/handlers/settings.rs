use crate::api::{AjaxCommand, ErrorResponse, SettingsFormRequest, ValidationErrorResponse};
use crate::pages::{self, SUBMITTED_SELECTOR};
use crate::routes::SETTINGS_PATH;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use newsroom::planes::control::SettingsError;
use tracing::{info, warn};

/// GET /admin/config/news-api
pub async fn settings_form(State(state): State<AppState>) -> Response {
    match state.settings.form().await {
        Ok(form) => Html(pages::settings_page(SETTINGS_PATH, &form)).into_response(),
        Err(e) => {
            warn!("Failed to load settings form: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(e.to_string())),
            )
                .into_response()
        }
    }
}

/// POST /admin/config/news-api
pub async fn submit_settings(
    State(state): State<AppState>,
    Form(req): Form<SettingsFormRequest>,
) -> Response {
    info!("SUBMIT_SETTINGS");

    match state.settings.submit(&req.secret_key).await {
        Ok(result) => Json(vec![AjaxCommand::html(SUBMITTED_SELECTOR, result.message)]).into_response(),
        Err(e @ (SettingsError::Required { .. } | SettingsError::ControlCharacters { .. })) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ValidationErrorResponse {
                error: e.to_string(),
                field: e.field().map(str::to_string),
            }),
        )
            .into_response(),
        Err(e @ SettingsError::Store(_)) => {
            warn!("Failed to save settings: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(e.to_string())),
            )
                .into_response()
        }
    }
}
