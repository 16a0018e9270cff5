//! Batched client lookup for `Project.client`.

use std::collections::HashMap;
use std::sync::Arc;

use async_graphql::dataloader::Loader;
use pm_core::client::{self, model::Client};
use pm_core::PmError;

use crate::state::SharedStore;

/// Loads clients by id, one store round trip per batch.
pub struct ClientLoader {
    store: SharedStore,
}

impl ClientLoader {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

impl Loader<String> for ClientLoader {
    type Value = Client;
    type Error = Arc<PmError>;

    async fn load(&self, keys: &[String]) -> Result<HashMap<String, Client>, Self::Error> {
        tracing::debug!(keys = keys.len(), "Loading client batch");
        let clients = client::get_clients(self.store.as_ref(), keys).await.map_err(Arc::new)?;
        Ok(clients.into_iter().map(|c| (c.id.clone(), c)).collect())
    }
}
