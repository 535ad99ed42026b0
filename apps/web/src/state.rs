use std::sync::Arc;

use crate::config::Config;
use crate::export::ExportSlots;
use crate::history::HistoryStore;
use crate::loader::LoaderManager;
use crate::results::CurrentResult;
use crate::storage::KeyValueStore;
use crate::theme::ThemeStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub history: Arc<HistoryStore>,
    pub theme: Arc<ThemeStore>,
    /// Single loading-overlay session; a new submission supersedes the old one.
    pub loader: Arc<LoaderManager>,
    /// Result currently on screen, the source for every export.
    pub current: Arc<CurrentResult>,
    pub exports: Arc<ExportSlots>,
}

impl AppState {
    /// Wires every store to the same profile storage.
    pub fn new(config: &Config, storage: Arc<dyn KeyValueStore>) -> Self {
        let loader = LoaderManager::new(config.loader_config());
        Self {
            history: Arc::new(HistoryStore::new(storage.clone())),
            theme: Arc::new(ThemeStore::new(storage)),
            loader: Arc::new(loader),
            current: Arc::new(CurrentResult::default()),
            exports: Arc::new(ExportSlots::default()),
        }
    }
}
