pub mod api;
pub mod handlers;
pub mod pages;
pub mod routes;
pub mod state;
pub mod validation;

// Re-export key types
pub use routes::{build_router, App};
pub use state::AppState;
