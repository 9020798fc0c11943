pub mod health;
pub mod news;
pub mod settings;

pub use health::health_check;
pub use news::{get_news, record_view};
pub use settings::{settings_form, submit_settings};
