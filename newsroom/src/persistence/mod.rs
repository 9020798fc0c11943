pub mod seed;
pub mod sled_config_store;
pub mod sled_content_store;

pub use seed::{ContentSeed, ImportSummary};
pub use sled_config_store::SledConfigStore;
pub use sled_content_store::SledContentStore;
