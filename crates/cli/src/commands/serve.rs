use crate::host::MockHost;
use anyhow::Result;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use colored::Colorize;
use graphql_mock_session::{GraphQLRequest, GraphQLResponse, MockServer};
use std::sync::Arc;

/// Serve the mock GraphQL endpoint over HTTP.
///
/// Only the configured endpoint is mounted; every other route 404s
/// (asset serving is a concern of the harness consuming this server,
/// not of the mock itself).
pub async fn run(host: MockHost, port: u16, quiet: bool) -> Result<()> {
    let endpoint = host.endpoint.clone();
    let server = Arc::new(host.server);

    let app = Router::new()
        .route(&endpoint, post(graphql_handler))
        .with_state(server);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    let addr = listener.local_addr()?;
    if !quiet {
        eprintln!(
            "{} mock GraphQL server listening on http://{addr}{endpoint}",
            "✓".green()
        );
    }
    tracing::info!(%addr, endpoint, "serving");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn graphql_handler(
    State(server): State<Arc<MockServer>>,
    Json(request): Json<GraphQLRequest>,
) -> Json<GraphQLResponse> {
    Json(server.handle(&request))
}
