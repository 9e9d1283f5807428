//! HTTP surface built on axum.
//!
//! Public routes: `/`, `/signup`, `/login`, `/forgot-password`,
//! `/reset-password`. Everything else requires a bearer token.

pub mod account;
pub mod auth;
pub mod market;
pub mod response;
pub mod state;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::error::Result;
use crate::infrastructure::config::server::ServerConfig;

pub use auth::AuthUser;
pub use response::ApiError;
pub use state::AppState;

/// Build the full router, nested under `base_path` unless it is empty or `/`.
pub fn router(state: AppState, base_path: &str) -> Router {
    let protected = Router::new()
        .route("/profile", get(account::profile))
        .route("/market-prices", get(market::market_prices))
        .route("/landings", get(market::landings))
        .route("/market-signals", get(market::market_signals))
        .route("/quotas", get(market::quotas))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));

    let routes = Router::new()
        .route("/", get(market::welcome))
        .route("/signup", post(account::signup))
        .route("/login", post(account::login))
        .route("/forgot-password", post(account::forgot_password))
        .route("/reset-password", post(account::reset_password))
        .merge(protected)
        .with_state(state);

    let prefix = base_path.trim_end_matches('/');
    let app = if prefix.is_empty() {
        routes
    } else if prefix.starts_with('/') {
        Router::new().nest(prefix, routes)
    } else {
        Router::new().nest(&format!("/{prefix}"), routes)
    };

    app.layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Bind the listener and serve until ctrl-c.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(config: &ServerConfig, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(&config.bind).await?;
    let app = router(state, &config.base_path);
    info!(
        addr = %listener.local_addr()?,
        base_path = %config.base_path,
        "http server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("http server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => {
            warn!(error = %e, "failed to listen for ctrl-c, running until killed");
            std::future::pending::<()>().await;
        }
    }
}
