//! Material Tracker Core
//!
//! Layered architecture:
//! - domain: Core entities, templates and derived-state functions
//! - repository: Key/value storage backends and the persistence gateway
//! - store: In-memory item and catalog stores
//! - commands: Operations the view layer invokes on [`AppState`]

pub mod commands;
pub mod config;
pub mod domain;
pub mod repository;
pub mod store;

use config::AppConfig;
use domain::{DomainResult, Item, ItemFilter, ItemId};
use repository::{KeyValueStore, PersistenceGateway, CATALOG_KEY, ITEMS_KEY};
use store::{CatalogStore, ItemStore};

/// Everything the controller works with, owned in one place
pub struct AppState {
    config: AppConfig,
    gateway: PersistenceGateway,
    items: ItemStore,
    catalog: CatalogStore,
    filter: ItemFilter,
    /// Item open in the edit dialog
    editing_item: Option<ItemId>,
    /// Bumped after every mutation; the view re-renders when it changes
    revision: u64,
}

impl AppState {
    /// Open the SQLite file named by the config and load both stores
    #[cfg(not(target_arch = "wasm32"))]
    pub fn open(config: AppConfig) -> DomainResult<Self> {
        let store = repository::SqliteStore::open(&config.db_path())?;
        Ok(Self::with_store(config, Box::new(store)))
    }

    /// Load both stores from `store`. A catalog that was never saved is
    /// seeded with the built-in materials if configured; an unreadable one
    /// is left in storage untouched.
    pub fn with_store(config: AppConfig, store: Box<dyn KeyValueStore>) -> Self {
        let gateway = PersistenceGateway::new(store);
        let items: Vec<Item> = gateway.load(ITEMS_KEY);
        let catalog = gateway.load(CATALOG_KEY);
        let catalog_saved = gateway.raw(CATALOG_KEY).is_some();
        log::info!("Loaded {} items", items.len());

        let mut state = Self {
            items: ItemStore::new(items),
            catalog: CatalogStore::new(catalog),
            config,
            gateway,
            filter: ItemFilter::default(),
            editing_item: None,
            revision: 0,
        };
        if state.config.seed_catalog && !catalog_saved && state.catalog.seed_defaults() > 0 {
            state.persist_catalog();
        }
        state
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn items(&self) -> &ItemStore {
        &self.items
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Stored JSON under `key`, as the next load would see it
    pub fn persisted(&self, key: &str) -> Option<String> {
        self.gateway.raw(key)
    }

    fn persist_items(&mut self) {
        self.gateway.save(ITEMS_KEY, self.items.items());
        self.revision += 1;
    }

    fn persist_catalog(&mut self) {
        self.gateway.save(CATALOG_KEY, self.catalog.catalog());
        self.revision += 1;
    }
}

/// Start the rolling file logger in the configured log directory
pub fn init_logging(config: &AppConfig) -> Result<(), String> {
    rolling_logger::init_logger(config.log_dir(), "MaterialTracker")
}
