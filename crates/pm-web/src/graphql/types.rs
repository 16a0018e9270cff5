//! GraphQL object types.

use async_graphql::{dataloader::DataLoader, ComplexObject, Context, Enum, Result, SimpleObject, ID};
use pm_core::client::{self, model::Client};
use pm_core::project::{self, model::Project};

use super::error::gql_error;
use super::loader::ClientLoader;
use super::store;

#[derive(Enum, Copy, Clone, Debug, PartialEq, Eq)]
#[graphql(name = "ProjectStatus", remote = "pm_core::project::model::ProjectStatus")]
pub enum ProjectStatusValue {
    NotStarted,
    Active,
    InProgress,
    Completed,
}

#[derive(SimpleObject, Clone, Debug)]
#[graphql(name = "Client", complex)]
pub struct ClientObject {
    pub id: ID,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub created_at: String,
}

impl From<Client> for ClientObject {
    fn from(c: Client) -> Self {
        Self {
            id: ID(c.id),
            name: c.name,
            email: c.email,
            phone: c.phone,
            created_at: c.created_at,
        }
    }
}

#[ComplexObject]
impl ClientObject {
    /// Projects owned by this client.
    async fn projects(&self, ctx: &Context<'_>) -> Result<Vec<ProjectObject>> {
        let projects = project::list_projects_by_client(store(ctx)?.as_ref(), &self.id)
            .await
            .map_err(|e| gql_error(&e))?;
        Ok(projects.into_iter().map(ProjectObject::from).collect())
    }
}

#[derive(SimpleObject, Clone, Debug)]
#[graphql(name = "Project", complex)]
pub struct ProjectObject {
    pub id: ID,
    pub name: String,
    pub description: String,
    pub status: ProjectStatusValue,
    pub client_id: ID,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Project> for ProjectObject {
    fn from(p: Project) -> Self {
        Self {
            id: ID(p.id),
            name: p.name,
            description: p.description,
            status: p.status.into(),
            client_id: ID(p.client_id),
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[ComplexObject]
impl ProjectObject {
    /// The owning client, or null if it no longer exists.
    async fn client(&self, ctx: &Context<'_>) -> Result<Option<ClientObject>> {
        let found = match ctx.data_opt::<DataLoader<ClientLoader>>() {
            Some(loader) => loader
                .load_one(self.client_id.0.clone())
                .await
                .map_err(|e| gql_error(&e))?,
            None => client::get_client(store(ctx)?.as_ref(), &self.client_id)
                .await
                .map_err(|e| gql_error(&e))?,
        };
        Ok(found.map(ClientObject::from))
    }
}
