//! In-process store, used for `pm serve --memory` and in tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::client::{StoreError, StoreResult};
use crate::queries::clients::{ClientRow, DeletedClient};
use crate::queries::projects::{ProjectPatch, ProjectRow};
use crate::store::RecordStore;

#[derive(Default)]
struct Collections {
    clients: HashMap<String, ClientRow>,
    client_order: Vec<String>,
    projects: HashMap<String, ProjectRow>,
    project_order: Vec<String>,
}

impl Collections {
    fn remove_project(&mut self, id: &str) -> Option<ProjectRow> {
        let row = self.projects.remove(id)?;
        self.project_order.retain(|p| p != id);
        Some(row)
    }
}

/// Store holding both collections behind one lock. Each method takes the
/// lock once, so multi-record operations are atomic.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn create_client(&self, row: &ClientRow) -> StoreResult<()> {
        let mut db = self.inner.write().await;
        if db.clients.contains_key(&row.id) {
            return Err(StoreError::OperationFailed(format!(
                "Duplicate client id: {}",
                row.id
            )));
        }
        db.client_order.push(row.id.clone());
        db.clients.insert(row.id.clone(), row.clone());
        Ok(())
    }

    async fn get_client(&self, id: &str) -> StoreResult<Option<ClientRow>> {
        Ok(self.inner.read().await.clients.get(id).cloned())
    }

    async fn get_clients(&self, ids: &[String]) -> StoreResult<Vec<ClientRow>> {
        let db = self.inner.read().await;
        Ok(ids.iter().filter_map(|id| db.clients.get(id).cloned()).collect())
    }

    async fn list_clients(&self) -> StoreResult<Vec<ClientRow>> {
        let db = self.inner.read().await;
        Ok(db
            .client_order
            .iter()
            .filter_map(|id| db.clients.get(id).cloned())
            .collect())
    }

    async fn delete_client_cascade(&self, id: &str) -> StoreResult<Option<DeletedClient>> {
        let mut db = self.inner.write().await;
        let Some(client) = db.clients.remove(id) else {
            return Ok(None);
        };
        db.client_order.retain(|c| c != id);

        let owned: Vec<String> = db
            .project_order
            .iter()
            .filter(|pid| db.projects.get(*pid).is_some_and(|p| p.client_id == id))
            .cloned()
            .collect();
        let projects = owned.iter().filter_map(|pid| db.remove_project(pid)).collect();

        Ok(Some(DeletedClient { client, projects }))
    }

    async fn create_project(&self, row: &ProjectRow) -> StoreResult<()> {
        let mut db = self.inner.write().await;
        if !db.clients.contains_key(&row.client_id) {
            return Err(StoreError::MissingReference(format!(
                "Client does not exist: {}",
                row.client_id
            )));
        }
        if db.projects.contains_key(&row.id) {
            return Err(StoreError::OperationFailed(format!(
                "Duplicate project id: {}",
                row.id
            )));
        }
        db.project_order.push(row.id.clone());
        db.projects.insert(row.id.clone(), row.clone());
        Ok(())
    }

    async fn get_project(&self, id: &str) -> StoreResult<Option<ProjectRow>> {
        Ok(self.inner.read().await.projects.get(id).cloned())
    }

    async fn list_projects(&self) -> StoreResult<Vec<ProjectRow>> {
        let db = self.inner.read().await;
        Ok(db
            .project_order
            .iter()
            .filter_map(|id| db.projects.get(id).cloned())
            .collect())
    }

    async fn list_projects_by_client(&self, client_id: &str) -> StoreResult<Vec<ProjectRow>> {
        let db = self.inner.read().await;
        Ok(db
            .project_order
            .iter()
            .filter_map(|id| db.projects.get(id))
            .filter(|p| p.client_id == client_id)
            .cloned()
            .collect())
    }

    async fn update_project(&self, id: &str, patch: &ProjectPatch) -> StoreResult<ProjectRow> {
        let mut db = self.inner.write().await;
        let row = db
            .projects
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(format!("Project not found: {}", id)))?;
        patch.apply(row, &chrono::Utc::now().to_rfc3339());
        Ok(row.clone())
    }

    async fn delete_project(&self, id: &str) -> StoreResult<Option<ProjectRow>> {
        Ok(self.inner.write().await.remove_project(id))
    }
}
