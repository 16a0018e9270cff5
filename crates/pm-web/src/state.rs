//! Application state.

use std::sync::Arc;

use pm_store::RecordStore;

use crate::graphql::{self, PmSchema};

/// Store handle shared by every request.
pub type SharedStore = Arc<dyn RecordStore>;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub schema: PmSchema,
}

impl AppState {
    pub fn new(store: SharedStore) -> Self {
        let schema = graphql::build_schema(store.clone());
        Self { store, schema }
    }
}
