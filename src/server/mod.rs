use axum::{
    extract::Request,
    routing::post,
    Router,
    ServiceExt,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::Layer;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::TraceLayer;
use crate::graphql::UserSchema;

pub mod routes;

/// Server state
pub struct AppState {
    pub schema: UserSchema,
}

/// Routes with the host middleware: request logging, gzip, panic recovery
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/graphql", post(routes::graphql))
        .layer(CatchPanicLayer::new())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Router wrapped so `/graphql/` routes like `/graphql`. Path rewriting has to
/// happen before routing, hence outside the `Router`.
pub fn app(state: Arc<AppState>) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}

pub async fn start_server(addr: SocketAddr, schema: UserSchema) -> anyhow::Result<()> {
    let state = Arc::new(AppState { schema });
    let app = app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Starting server on {}", listener.local_addr()?);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
