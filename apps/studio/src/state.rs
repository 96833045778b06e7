use std::sync::Arc;

use crate::config::Config;
use crate::layout::PageConfig;
use crate::sessions::SessionStore;
use crate::tools::ToolRegistry;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub sessions: SessionStore,
    pub tools: Arc<ToolRegistry>,
    /// Page geometry and typeface for every resume rendered by this process.
    pub page_config: PageConfig,
}

impl AppState {
    pub fn new(config: Config, tools: ToolRegistry) -> Self {
        Self {
            page_config: config.page_config(),
            config,
            sessions: SessionStore::new(),
            tools: Arc::new(tools),
        }
    }
}
