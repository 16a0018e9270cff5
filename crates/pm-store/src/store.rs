//! The record store seam and its Redis implementation.

use async_trait::async_trait;

use crate::client::{RedisPool, StoreResult};
use crate::keys::KeySpace;
use crate::queries::clients::{self, ClientRow, DeletedClient};
use crate::queries::projects::{self, ProjectPatch, ProjectRow};

/// Persistence for clients and projects.
///
/// Listings return rows in creation order. Every method is a single store
/// operation from the caller's point of view, and each write is atomic.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn create_client(&self, row: &ClientRow) -> StoreResult<()>;

    async fn get_client(&self, id: &str) -> StoreResult<Option<ClientRow>>;

    /// Fetch several clients at once. Ids that do not exist are skipped.
    async fn get_clients(&self, ids: &[String]) -> StoreResult<Vec<ClientRow>>;

    async fn list_clients(&self) -> StoreResult<Vec<ClientRow>>;

    /// Remove a client and every project that references it.
    /// Returns `None` (and removes nothing) when the client does not exist.
    async fn delete_client_cascade(&self, id: &str) -> StoreResult<Option<DeletedClient>>;

    /// Insert a project, checking its client in the same atomic step.
    ///
    /// # Errors
    ///
    /// `StoreError::MissingReference` if `row.client_id` does not exist.
    async fn create_project(&self, row: &ProjectRow) -> StoreResult<()>;

    async fn get_project(&self, id: &str) -> StoreResult<Option<ProjectRow>>;

    async fn list_projects(&self) -> StoreResult<Vec<ProjectRow>>;

    async fn list_projects_by_client(&self, client_id: &str) -> StoreResult<Vec<ProjectRow>>;

    /// Apply `patch` to a stored project and return the result. Fields the
    /// patch leaves out keep their stored value, whatever a concurrent
    /// writer did to them.
    ///
    /// # Errors
    ///
    /// `StoreError::NotFound` if no project with `id` exists.
    async fn update_project(&self, id: &str, patch: &ProjectPatch) -> StoreResult<ProjectRow>;

    async fn delete_project(&self, id: &str) -> StoreResult<Option<ProjectRow>>;
}

/// Redis-backed store. Documents live as JSON in hashes with sorted-set
/// indexes alongside (see [`crate::keys`]).
#[derive(Clone)]
pub struct RedisStore {
    pool: RedisPool,
    keys: KeySpace,
}

impl RedisStore {
    pub fn new(pool: RedisPool) -> Self {
        Self::with_keys(pool, KeySpace::default())
    }

    pub fn with_keys(pool: RedisPool, keys: KeySpace) -> Self {
        Self { pool, keys }
    }

    /// Connect to `redis_url` using the default key namespace.
    pub async fn connect(redis_url: &str) -> StoreResult<Self> {
        let pool = crate::client::init_pool(redis_url).await?;
        tracing::debug!(url = redis_url, "Connected to Redis");
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl RecordStore for RedisStore {
    async fn create_client(&self, row: &ClientRow) -> StoreResult<()> {
        clients::create_client(&self.pool, &self.keys, row).await
    }

    async fn get_client(&self, id: &str) -> StoreResult<Option<ClientRow>> {
        clients::get_client(&self.pool, &self.keys, id).await
    }

    async fn get_clients(&self, ids: &[String]) -> StoreResult<Vec<ClientRow>> {
        clients::get_clients(&self.pool, &self.keys, ids).await
    }

    async fn list_clients(&self) -> StoreResult<Vec<ClientRow>> {
        clients::list_clients(&self.pool, &self.keys).await
    }

    async fn delete_client_cascade(&self, id: &str) -> StoreResult<Option<DeletedClient>> {
        clients::delete_client_cascade(&self.pool, &self.keys, id).await
    }

    async fn create_project(&self, row: &ProjectRow) -> StoreResult<()> {
        projects::create_project(&self.pool, &self.keys, row).await
    }

    async fn get_project(&self, id: &str) -> StoreResult<Option<ProjectRow>> {
        projects::get_project(&self.pool, &self.keys, id).await
    }

    async fn list_projects(&self) -> StoreResult<Vec<ProjectRow>> {
        projects::list_projects(&self.pool, &self.keys).await
    }

    async fn list_projects_by_client(&self, client_id: &str) -> StoreResult<Vec<ProjectRow>> {
        projects::list_projects_by_client(&self.pool, &self.keys, client_id).await
    }

    async fn update_project(&self, id: &str, patch: &ProjectPatch) -> StoreResult<ProjectRow> {
        projects::update_project(&self.pool, &self.keys, id, patch).await
    }

    async fn delete_project(&self, id: &str) -> StoreResult<Option<ProjectRow>> {
        projects::delete_project(&self.pool, &self.keys, id).await
    }
}
