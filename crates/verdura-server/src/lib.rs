//! Verdura Server — axum HTTP API over the plant catalog.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod state;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, post, put};
use surrealdb::Connection;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::state::AppState;

/// Build the API router. Generic over the database engine so
/// integration tests can drive it with the in-memory one.
pub fn router<C: Connection>(state: Arc<AppState<C>>) -> Router {
    Router::new()
        .route("/signup", post(handlers::auth::signup::<C>))
        .route("/login", post(handlers::auth::login::<C>))
        .route(
            "/plants",
            get(handlers::plants::list::<C>).post(handlers::plants::create::<C>),
        )
        .route(
            "/plants/{id}",
            get(handlers::plants::get::<C>)
                .put(handlers::plants::update::<C>)
                .delete(handlers::plants::remove::<C>),
        )
        .route("/plants/{id}/reviews", post(handlers::reviews::add::<C>))
        .route(
            "/plants/{id}/reviews/{review_id}",
            put(handlers::reviews::update::<C>).delete(handlers::reviews::remove::<C>),
        )
        .fallback(handlers::not_found)
        .with_state(state)
}

pub async fn start_server() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    info!("Loading configuration...");
    let config = Config::load();

    let state = AppState::connect(&config)
        .await
        .expect("Failed to initialize database!");

    let cors = CorsLayer::new()
        .allow_origin(
            config
                .cors_origin
                .parse::<HeaderValue>()
                .expect("Invalid CORS origin!"),
        )
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(Duration::from_secs(3600));

    let app = router(state).layer(cors);

    let address = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&address)
        .await
        .expect("Failed to bind listener!");
    info!("Listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server crashed!");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("Failed to listen for ctrl-c!");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler!")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
