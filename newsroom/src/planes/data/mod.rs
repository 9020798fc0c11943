pub mod error;
pub mod news_lookup;
pub mod news_resource;
pub mod operation;

pub use error::LookupError;
pub use news_lookup::TagLookupService;
pub use news_resource::NewsResource;
pub use operation::NewsLookup;
