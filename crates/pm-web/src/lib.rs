//! PM Web Server
//!
//! Axum server exposing the GraphQL API.

pub mod graphql;
pub mod routes;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use state::{AppState, SharedStore};

/// Server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Serve the GraphiQL IDE on `GET /graphql`.
    pub graphiql: bool,
}

/// Create the application router.
pub fn create_router(state: AppState, graphiql: bool) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let endpoint = if graphiql {
        get(routes::graphql::graphiql).post(routes::graphql::execute)
    } else {
        post(routes::graphql::execute)
    };

    Router::new()
        .route("/graphql", endpoint)
        .route("/health", get(routes::health::health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server.
pub async fn run_server(store: SharedStore, config: ServerConfig) -> anyhow::Result<()> {
    let state = AppState::new(store);
    let app = create_router(state, config.graphiql);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("GraphQL server listening on http://{}/graphql", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use pm_store::MemoryStore;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(graphiql: bool) -> Router {
        create_router(AppState::new(Arc::new(MemoryStore::new())), graphiql)
    }

    async fn post_graphql(app: Router, body: Value) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/graphql")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_post_with_variables() {
        let query = "mutation Add($name: String!, $email: String!, $phone: String!) { \
            addClient(name: $name, email: $email, phone: $phone) { name email phone } }";
        let (status, body) = post_graphql(
            app(false),
            json!({
                "query": query,
                "variables": { "name": "Ada", "email": "ada@example.com", "phone": "555" }
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["data"]["addClient"],
            json!({"name": "Ada", "email": "ada@example.com", "phone": "555"})
        );
        assert!(body.get("errors").is_none());
    }

    #[tokio::test]
    async fn test_errors_are_reported_in_body() {
        let (status, body) = post_graphql(
            app(false),
            json!({ "query": "mutation { updateProject(id: \"ghost\", name: \"x\") { id } }" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["updateProject"], Value::Null);
        assert_eq!(body["errors"][0]["extensions"]["code"], json!("NOT_FOUND"));
    }

    #[tokio::test]
    async fn test_graphiql_only_when_enabled() {
        let get = || Request::builder().uri("/graphql").body(Body::empty()).unwrap();

        let enabled = app(true).oneshot(get()).await.unwrap();
        assert_eq!(enabled.status(), StatusCode::OK);

        let disabled = app(false).oneshot(get()).await.unwrap();
        assert_eq!(disabled.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(false)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({"status": "ok"}));
    }
}
