//! Mutation root.

use async_graphql::{Context, Object, Result, ID};
use pm_core::project::model::ProjectUpdate;
use pm_core::{client, project};

use super::error::gql_error;
use super::store;
use super::types::{ClientObject, ProjectObject, ProjectStatusValue};

#[derive(Default)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn add_client(
        &self,
        ctx: &Context<'_>,
        name: String,
        email: String,
        phone: String,
    ) -> Result<Option<ClientObject>> {
        let created = client::create_client(store(ctx)?.as_ref(), &name, &email, &phone)
            .await
            .map_err(|e| gql_error(&e))?;
        Ok(Some(created.into()))
    }

    /// Delete a client and every project it owns. Null if the client did not exist.
    async fn delete_client(&self, ctx: &Context<'_>, id: ID) -> Result<Option<ClientObject>> {
        let deleted = client::delete_client(store(ctx)?.as_ref(), &id)
            .await
            .map_err(|e| gql_error(&e))?;
        Ok(deleted.map(ClientObject::from))
    }

    /// Create a project; `status` defaults to `NOT_STARTED`.
    async fn add_project(
        &self,
        ctx: &Context<'_>,
        name: String,
        description: String,
        status: Option<ProjectStatusValue>,
        client_id: ID,
    ) -> Result<Option<ProjectObject>> {
        let created = project::create_project(
            store(ctx)?.as_ref(),
            &name,
            &description,
            status.map(Into::into),
            &client_id,
        )
        .await
        .map_err(|e| gql_error(&e))?;
        Ok(Some(created.into()))
    }

    async fn delete_project(&self, ctx: &Context<'_>, id: ID) -> Result<Option<ProjectObject>> {
        let deleted = project::delete_project(store(ctx)?.as_ref(), &id)
            .await
            .map_err(|e| gql_error(&e))?;
        Ok(deleted.map(ProjectObject::from))
    }

    /// Change only the supplied fields of an existing project.
    async fn update_project(
        &self,
        ctx: &Context<'_>,
        id: ID,
        name: Option<String>,
        description: Option<String>,
        status: Option<ProjectStatusValue>,
    ) -> Result<Option<ProjectObject>> {
        let update = ProjectUpdate {
            name: name.as_deref(),
            description: description.as_deref(),
            status: status.map(Into::into),
        };
        let updated = project::update_project(store(ctx)?.as_ref(), &id, update)
            .await
            .map_err(|e| gql_error(&e))?;
        Ok(Some(updated.into()))
    }
}
