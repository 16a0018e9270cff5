//! Client management.

pub mod model;

use crate::error::PmResult;
use crate::validate;
use model::Client;
use pm_store::{ClientRow, RecordStore};
use uuid::Uuid;

/// Create and persist a new client.
pub async fn create_client(
    store: &dyn RecordStore,
    name: &str,
    email: &str,
    phone: &str,
) -> PmResult<Client> {
    let name = validate::required("name", name)?;
    let email = validate::email(email)?;
    let phone = validate::required("phone", phone)?;

    let id = Uuid::new_v4().to_string();
    let row = ClientRow::new(&id, name, email, phone);
    store.create_client(&row).await?;

    tracing::info!(client_id = %id, "Client created");
    Ok(Client::from_row(row))
}

/// Get a client by ID.
pub async fn get_client(store: &dyn RecordStore, id: &str) -> PmResult<Option<Client>> {
    let row = store.get_client(id).await?;
    Ok(row.map(Client::from_row))
}

/// Get several clients at once; unknown ids are absent from the result.
pub async fn get_clients(store: &dyn RecordStore, ids: &[String]) -> PmResult<Vec<Client>> {
    let rows = store.get_clients(ids).await?;
    Ok(rows.into_iter().map(Client::from_row).collect())
}

/// List all clients.
pub async fn list_clients(store: &dyn RecordStore) -> PmResult<Vec<Client>> {
    let rows = store.list_clients().await?;
    Ok(rows.into_iter().map(Client::from_row).collect())
}

/// Delete a client together with every project it owns.
///
/// Returns `None` when the client does not exist; nothing is removed then.
pub async fn delete_client(store: &dyn RecordStore, id: &str) -> PmResult<Option<Client>> {
    let Some(deleted) = store.delete_client_cascade(id).await? else {
        tracing::debug!(client_id = %id, "Delete skipped, client not found");
        return Ok(None);
    };

    tracing::info!(
        client_id = %id,
        projects = deleted.projects.len(),
        "Client deleted with its projects"
    );
    Ok(Some(Client::from_row(deleted.client)))
}
