pub mod requests;
pub mod responses;

pub use requests::SettingsFormRequest;
pub use responses::{
    AjaxCommand, ErrorResponse, HealthResponse, NewsResponse, ValidationErrorResponse,
    ViewTallyResponse,
};
