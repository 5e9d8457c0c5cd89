//! # HTTP Server
//!
//! `postwall serve` exposes the wall as a JSON API. Like the CLI, the server is
//! a client of [`PostwallApi`]: handlers extract the request, call one facade
//! method and map the outcome to a status code.
//!
//! ## Routes
//!
//! ```text
//! GET    /health          -> {status: "ok", timestamp}
//! GET    /api/posts       -> 200 {success, data: Post[]}   (newest first)
//! POST   /api/posts       -> 201 {success, data: Post}     (includes editId)
//! GET    /api/posts/:id   -> 200 {success, data: Post}
//! PATCH  /api/posts/:id   -> 200 {success, data: Post}
//! ```
//!
//! ## Status Mapping
//!
//! Validation errors and unreadable bodies are 400 (with `field` when one is
//! known), a wrong edit code is 403, an unknown post is 404. Everything else
//! is 500 with a fixed message; the detail is only logged.
//!
//! The facade is built once by the caller and shared through `Arc`.

pub mod handlers;
pub mod response;

use anyhow::Context;
use axum::http::{header, HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use postwallapp::api::PostwallApi;
use postwallapp::config::PostwallConfig;
use postwallapp::store::DataStore;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub type SharedApi<S> = Arc<PostwallApi<S>>;

/// CORS for the browser client. `*` allows any origin without credentials.
pub fn cors_layer(origin: &str) -> anyhow::Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if origin.trim() == "*" {
        return Ok(layer.allow_origin(Any));
    }
    let value = HeaderValue::from_str(origin.trim())
        .with_context(|| format!("invalid CORS origin '{}'", origin))?;
    Ok(layer.allow_origin(value).allow_credentials(true))
}

pub fn router<S: DataStore + 'static>(api: SharedApi<S>, cors: CorsLayer) -> Router {
    let posts = Router::new()
        .route(
            "/posts",
            get(handlers::list_posts::<S>).post(handlers::create_post::<S>),
        )
        .route(
            "/posts/:id",
            get(handlers::get_post::<S>).patch(handlers::update_post::<S>),
        )
        .with_state(api);

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", posts)
        .fallback(handlers::not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Seeds the wall if configured, then serves until Ctrl-C or SIGTERM.
pub async fn serve<S: DataStore + 'static>(
    api: PostwallApi<S>,
    config: &PostwallConfig,
) -> anyhow::Result<()> {
    if config.seed_default_post {
        match api.seed_default_post() {
            Ok(result) => {
                for message in &result.messages {
                    info!("{}", message.content);
                }
            }
            Err(e) => error!(error = %e, "failed to seed default post"),
        }
    }

    let app = router(Arc::new(api), cors_layer(&config.cors_origin)?);
    let listener = TcpListener::bind(config.bind.as_str())
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    let addr = listener.local_addr()?;

    info!("Postwall server running on http://{}", addr);
    info!("  GET    /health");
    info!("  GET    /api/posts");
    info!("  POST   /api/posts");
    info!("  GET    /api/posts/:id");
    info!("  PATCH  /api/posts/:id");
    info!("CORS origin: {}", config.cors_origin);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl-C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
