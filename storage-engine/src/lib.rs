pub mod memory_config_store;
pub mod memory_content_store;
pub mod moka_view_counter;

pub use memory_config_store::MemoryConfigStore;
pub use memory_content_store::MemoryContentStore;
pub use moka_view_counter::MokaViewCounter;
