pub mod domain;
pub mod persistence;
pub mod planes;
pub mod ports;

pub use planes::control::SettingsService;
pub use planes::data::{LookupError, NewsLookup, NewsResource, TagLookupService};
