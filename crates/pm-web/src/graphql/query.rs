//! Query root.
//!
//! Root fields are nullable so a failing field does not null its siblings.

use async_graphql::{Context, Object, Result, ID};
use pm_core::{client, project};

use super::error::gql_error;
use super::store;
use super::types::{ClientObject, ProjectObject};

#[derive(Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// All clients, in store order.
    async fn clients(&self, ctx: &Context<'_>) -> Result<Option<Vec<ClientObject>>> {
        let clients = client::list_clients(store(ctx)?.as_ref())
            .await
            .map_err(|e| gql_error(&e))?;
        Ok(Some(clients.into_iter().map(ClientObject::from).collect()))
    }

    async fn client(&self, ctx: &Context<'_>, id: ID) -> Result<Option<ClientObject>> {
        let found = client::get_client(store(ctx)?.as_ref(), &id)
            .await
            .map_err(|e| gql_error(&e))?;
        Ok(found.map(ClientObject::from))
    }

    /// All projects, in store order.
    async fn projects(&self, ctx: &Context<'_>) -> Result<Option<Vec<ProjectObject>>> {
        let projects = project::list_projects(store(ctx)?.as_ref())
            .await
            .map_err(|e| gql_error(&e))?;
        Ok(Some(projects.into_iter().map(ProjectObject::from).collect()))
    }

    async fn project(&self, ctx: &Context<'_>, id: ID) -> Result<Option<ProjectObject>> {
        let found = project::get_project(store(ctx)?.as_ref(), &id)
            .await
            .map_err(|e| gql_error(&e))?;
        Ok(found.map(ProjectObject::from))
    }

    /// Projects owned by one client.
    async fn client_projects(
        &self,
        ctx: &Context<'_>,
        client_id: ID,
    ) -> Result<Option<Vec<ProjectObject>>> {
        let projects = project::list_projects_by_client(store(ctx)?.as_ref(), &client_id)
            .await
            .map_err(|e| gql_error(&e))?;
        Ok(Some(projects.into_iter().map(ProjectObject::from).collect()))
    }
}
