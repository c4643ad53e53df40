//! Application state for the web layer.

use std::sync::Arc;

use crate::bart::Upstream;
use crate::cache::CachedBartClient;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Cached BART client and planner
    pub bart: Arc<CachedBartClient<Upstream>>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(bart: CachedBartClient<Upstream>) -> Self {
        Self {
            bart: Arc::new(bart),
        }
    }
}
