//! GraphQL API over clients and projects.
//!
//! ```graphql
//! mutation {
//!   addClient(name: "Ada", email: "ada@example.com", phone: "555-0100") { id }
//! }
//!
//! query {
//!   projects {
//!     name
//!     status
//!     client { name email }
//!   }
//! }
//! ```

mod error;
mod loader;
mod mutation;
mod query;
mod types;

pub use error::{error_code, gql_error, BAD_USER_INPUT, NOT_FOUND, STORE_ERROR};
pub use loader::ClientLoader;
pub use mutation::MutationRoot;
pub use query::QueryRoot;
pub use types::{ClientObject, ProjectObject, ProjectStatusValue};

use async_graphql::dataloader::DataLoader;
use async_graphql::{Context, EmptySubscription, Request, Response, Schema};

use crate::state::SharedStore;

/// The full GraphQL schema type.
pub type PmSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema with the store injected as context data.
pub fn build_schema(store: SharedStore) -> PmSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(store)
        .finish()
}

/// Schema Definition Language for the API.
pub fn sdl() -> String {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription).finish().sdl()
}

/// Execute one request with a fresh per-request client loader.
pub async fn execute(schema: &PmSchema, store: &SharedStore, request: Request) -> Response {
    let loader = DataLoader::new(ClientLoader::new(store.clone()), tokio::spawn);
    schema.execute(request.data(loader)).await
}

fn store<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a SharedStore> {
    ctx.data::<SharedStore>()
}
