use std::sync::Arc;

use crate::db::Store;
use crate::views::Views;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub views: Arc<Views>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, views: Views) -> Self {
        Self {
            store,
            views: Arc::new(views),
        }
    }
}
