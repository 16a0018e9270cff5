//! GraphQL endpoint handlers.

use async_graphql::http::GraphiQLSource;
use axum::{
    extract::State,
    response::{Html, IntoResponse},
    Json,
};

use crate::graphql;
use crate::state::AppState;

/// POST /graphql - execute a query or mutation document.
pub async fn execute(
    State(state): State<AppState>,
    Json(request): Json<async_graphql::Request>,
) -> Json<async_graphql::Response> {
    let operation = request.operation_name.clone();
    let response = graphql::execute(&state.schema, &state.store, request).await;
    if response.is_err() {
        tracing::debug!(
            ?operation,
            errors = response.errors.len(),
            "GraphQL request returned errors"
        );
    }
    Json(response)
}

/// GET /graphql - GraphiQL IDE.
pub async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}
