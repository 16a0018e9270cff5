//! Project management.

pub mod model;

use crate::error::{PmError, PmResult};
use crate::validate;
use model::{Project, ProjectStatus, ProjectUpdate};
use pm_store::{ProjectRow, RecordStore, StoreError};
use uuid::Uuid;

/// Create a project for an existing client.
///
/// `status` defaults to [`ProjectStatus::NotStarted`].
pub async fn create_project(
    store: &dyn RecordStore,
    name: &str,
    description: &str,
    status: Option<ProjectStatus>,
    client_id: &str,
) -> PmResult<Project> {
    let name = validate::required("name", name)?;
    let description = validate::required("description", description)?;
    let client_id = validate::required("clientId", client_id)?;

    let id = Uuid::new_v4().to_string();
    let status = status.unwrap_or_default();
    let row = ProjectRow::new(&id, client_id, name, description, status.as_str());
    // The store checks the client in the same step as the insert.
    store.create_project(&row).await.map_err(|e| match e {
        StoreError::MissingReference(_) => {
            PmError::validation(format!("Client does not exist: {}", client_id))
        }
        e => PmError::Store(e),
    })?;

    tracing::info!(project_id = %id, client_id = %client_id, "Project created");
    Ok(Project::from_row(row))
}

/// Get a project by ID.
pub async fn get_project(store: &dyn RecordStore, id: &str) -> PmResult<Option<Project>> {
    let row = store.get_project(id).await?;
    Ok(row.map(Project::from_row))
}

/// List all projects.
pub async fn list_projects(store: &dyn RecordStore) -> PmResult<Vec<Project>> {
    let rows = store.list_projects().await?;
    Ok(rows.into_iter().map(Project::from_row).collect())
}

/// List the projects owned by a client.
pub async fn list_projects_by_client(
    store: &dyn RecordStore,
    client_id: &str,
) -> PmResult<Vec<Project>> {
    let rows = store.list_projects_by_client(client_id).await?;
    Ok(rows.into_iter().map(Project::from_row).collect())
}

/// Apply a partial update; only the supplied fields change. The store
/// merges the fields itself, so concurrent updates of different fields
/// all survive.
///
/// # Errors
///
/// `PmError::ProjectNotFound` if `id` does not exist. No record is created.
pub async fn update_project(
    store: &dyn RecordStore,
    id: &str,
    update: ProjectUpdate<'_>,
) -> PmResult<Project> {
    let update = ProjectUpdate {
        name: validate::optional("name", update.name)?,
        description: validate::optional("description", update.description)?,
        status: update.status,
    };

    if update.is_empty() {
        return store
            .get_project(id)
            .await?
            .map(Project::from_row)
            .ok_or_else(|| PmError::ProjectNotFound(id.to_string()));
    }

    let row = store
        .update_project(id, &update.to_patch())
        .await
        .map_err(|e| match e {
            StoreError::NotFound(_) => PmError::ProjectNotFound(id.to_string()),
            e => PmError::Store(e),
        })?;

    tracing::info!(project_id = %id, "Project updated");
    Ok(Project::from_row(row))
}

/// Delete a project. Returns `None` if it did not exist.
pub async fn delete_project(store: &dyn RecordStore, id: &str) -> PmResult<Option<Project>> {
    let row = store.delete_project(id).await?;
    if row.is_some() {
        tracing::info!(project_id = %id, "Project deleted");
    }
    Ok(row.map(Project::from_row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client;
    use pm_store::MemoryStore;

    async fn with_client() -> (MemoryStore, String) {
        let store = MemoryStore::new();
        let ada = client::create_client(&store, "Ada", "ada@example.com", "1")
            .await
            .unwrap();
        (store, ada.id)
    }

    #[tokio::test]
    async fn test_default_status() {
        let (store, client_id) = with_client().await;
        let project = create_project(&store, "Engine", "Analytical", None, &client_id)
            .await
            .unwrap();
        assert_eq!(project.status, ProjectStatus::NotStarted);

        let stored = get_project(&store, &project.id).await.unwrap().unwrap();
        assert_eq!(stored.status, ProjectStatus::NotStarted);
        assert_eq!(stored.client_id, client_id);
    }

    #[tokio::test]
    async fn test_create_requires_existing_client() {
        let (store, _) = with_client().await;
        let err = create_project(&store, "Engine", "Analytical", None, "ghost")
            .await
            .unwrap_err();
        assert!(matches!(err, PmError::ValidationError(_)));
        assert!(list_projects(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_after_client_deleted_is_rejected() {
        let (store, client_id) = with_client().await;
        client::delete_client(&store, &client_id).await.unwrap();
        let err = create_project(&store, "Engine", "Analytical", None, &client_id)
            .await
            .unwrap_err();
        assert!(matches!(err, PmError::ValidationError(msg) if msg.contains(&client_id)));
        assert!(list_projects(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_keeps_unrecognised_stored_status() {
        let (store, client_id) = with_client().await;
        let row = ProjectRow::new("legacy", &client_id, "Old", "Imported", "archived");
        store.create_project(&row).await.unwrap();

        let update = ProjectUpdate {
            name: Some("Renamed"),
            ..Default::default()
        };
        update_project(&store, "legacy", update).await.unwrap();

        let stored = store.get_project("legacy").await.unwrap().unwrap();
        assert_eq!(stored.name, "Renamed");
        assert_eq!(stored.status, "archived");
    }

    #[tokio::test]
    async fn test_concurrent_updates_of_different_fields() {
        let (store, client_id) = with_client().await;
        let project = create_project(&store, "Engine", "Analytical", None, &client_id)
            .await
            .unwrap();

        let rename = ProjectUpdate {
            name: Some("Renamed"),
            ..Default::default()
        };
        let finish = ProjectUpdate {
            status: Some(ProjectStatus::Completed),
            ..Default::default()
        };
        let (a, b) = tokio::join!(
            update_project(&store, &project.id, rename),
            update_project(&store, &project.id, finish)
        );
        a.unwrap();
        b.unwrap();

        let stored = get_project(&store, &project.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Renamed");
        assert_eq!(stored.status, ProjectStatus::Completed);
    }

    #[tokio::test]
    async fn test_update_status_only() {
        let (store, client_id) = with_client().await;
        let status = Some(ProjectStatus::Active);
        let project = create_project(&store, "Engine", "Analytical", status, &client_id)
            .await
            .unwrap();

        let updated = update_project(
            &store,
            &project.id,
            ProjectUpdate {
                status: Some(ProjectStatus::Completed),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.status, ProjectStatus::Completed);
        assert_eq!(updated.name, "Engine");
        assert_eq!(updated.description, "Analytical");

        let stored = get_project(&store, &project.id).await.unwrap().unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn test_update_missing_is_error_and_creates_nothing() {
        let (store, _) = with_client().await;
        let err = update_project(
            &store,
            "ghost",
            ProjectUpdate {
                name: Some("New"),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, PmError::ProjectNotFound(_)));
        assert!(err.is_not_found());
        assert!(list_projects(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_rejects_blank_name() {
        let (store, client_id) = with_client().await;
        let project = create_project(&store, "Engine", "Analytical", None, &client_id)
            .await
            .unwrap();
        let err = update_project(
            &store,
            &project.id,
            ProjectUpdate {
                name: Some("  "),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, PmError::ValidationError(_)));
        let stored = get_project(&store, &project.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Engine");
    }

    #[tokio::test]
    async fn test_empty_update_returns_current() {
        let (store, client_id) = with_client().await;
        let project = create_project(&store, "Engine", "Analytical", None, &client_id)
            .await
            .unwrap();
        let same = update_project(&store, &project.id, ProjectUpdate::default()).await.unwrap();
        assert_eq!(same, project);
    }

    #[tokio::test]
    async fn test_delete_missing_returns_none() {
        let (store, _) = with_client().await;
        assert!(delete_project(&store, "ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_then_gone() {
        let (store, client_id) = with_client().await;
        let project = create_project(&store, "Engine", "Analytical", None, &client_id)
            .await
            .unwrap();
        let deleted = delete_project(&store, &project.id).await.unwrap().unwrap();
        assert_eq!(deleted.id, project.id);
        assert!(get_project(&store, &project.id).await.unwrap().is_none());
        assert!(list_projects_by_client(&store, &client_id).await.unwrap().is_empty());
    }
}
