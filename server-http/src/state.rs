use newsroom::persistence::{ContentSeed, SledConfigStore, SledContentStore};
use newsroom::ports::{ConfigStore, ContentStore, ViewCounter};
use newsroom::{NewsResource, SettingsService, TagLookupService};
use shared::config::Config;
use shared::{Error, Result};
use std::sync::Arc;
use std::time::Duration;
use storage_engine::MokaViewCounter;

const SESSION_TTL: Duration = Duration::from_secs(3600);

/// Server state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub news_resource: Arc<NewsResource>,
    pub settings: Arc<SettingsService>,
    pub content: Arc<dyn ContentStore>,
    pub views: Arc<dyn ViewCounter>,
}

impl AppState {
    /// Wire the services around the given stores
    pub fn new(
        content: Arc<dyn ContentStore>,
        views: Arc<dyn ViewCounter>,
        config_store: Arc<dyn ConfigStore>,
    ) -> Self {
        let settings = Arc::new(SettingsService::new(config_store));
        let lookup = Arc::new(TagLookupService::new(content.clone(), views.clone()));
        let news_resource = Arc::new(NewsResource::new(lookup, settings.clone()));

        Self {
            news_resource,
            settings,
            content,
            views,
        }
    }

    /// Open the sled database under the data directory, import the optional
    /// seed file and build the state from it.
    pub fn open(config: &Config) -> Result<Self> {
        let db_path = std::path::Path::new(&config.data_dir).join("newsdesk.sled");
        std::fs::create_dir_all(&config.data_dir)
            .map_err(|e| Error::Internal(format!("Failed to create data directory: {}", e)))?;

        let db = sled::open(&db_path)
            .map_err(|e| Error::Storage(format!("Failed to open Sled database: {}", e)))?;

        let content = SledContentStore::from_db(db.clone());
        if let Some(seed_file) = &config.seed_file {
            let seed = ContentSeed::from_path(seed_file)?;
            let summary = content.import(&seed)?;
            tracing::info!(
                "Imported {} term(s) and {} item(s) from {}",
                summary.terms,
                summary.items,
                seed_file
            );
        }

        let config_store = SledConfigStore::from_db(db);
        let views = MokaViewCounter::new(config.view_window, SESSION_TTL);

        Ok(Self::new(
            Arc::new(content),
            Arc::new(views),
            Arc::new(config_store),
        ))
    }
}
