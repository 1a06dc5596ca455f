/// Axum webserver implementation
///
/// Server lifecycle: startup, shutdown notification, and graceful termination.
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;

use crate::{
    auth::AuthEvent,
    logger::{self, LogTag},
    webserver::{routes, state::AppState},
};

/// Global shutdown notifier
static SHUTDOWN_NOTIFY: once_cell::sync::Lazy<Arc<Notify>> =
    once_cell::sync::Lazy::new(|| Arc::new(Notify::new()));

/// Start the webserver
///
/// Blocks until the server is shut down via [`shutdown`].
pub async fn start_server(state: Arc<AppState>) -> Result<(), String> {
    let host = state.config.server.host.clone();
    let port = crate::arguments::get_port_override().unwrap_or(state.config.server.port);

    logger::debug(
        LogTag::Webserver,
        &format!("Starting webserver on {}:{}", host, port),
    );

    spawn_auth_event_logger(&state);

    let app = build_app(state);

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|e| format!("Invalid bind address: {}", e))?;

    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        match e.kind() {
            std::io::ErrorKind::AddrInUse => {
                format!(
                    "Failed to bind to {}: Address already in use\n\
                     Another Waypost instance may be running. Stop it or pick a\n\
                     different port with --port.",
                    addr
                )
            }
            std::io::ErrorKind::PermissionDenied => {
                format!(
                    "Failed to bind to {}: Permission denied\n\
                     Ports below 1024 require elevated privileges; use --port to\n\
                     choose a higher one.",
                    addr
                )
            }
            _ => format!("Failed to bind to {}: {}", addr, e),
        }
    })?;

    logger::info(
        LogTag::Webserver,
        &format!("Waypost listening on http://{}", addr),
    );

    let shutdown_signal = async {
        SHUTDOWN_NOTIFY.notified().await;
        logger::debug(
            LogTag::Webserver,
            "Received shutdown signal, stopping webserver...",
        );
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| format!("Server error: {}", e))?;

    logger::info(LogTag::Webserver, "Webserver stopped gracefully");

    Ok(())
}

/// Trigger webserver shutdown
pub fn shutdown() {
    logger::debug(LogTag::Webserver, "Triggering webserver shutdown...");
    SHUTDOWN_NOTIFY.notify_one();
}

/// Log sign-in/out events for the lifetime of the server
fn spawn_auth_event_logger(state: &Arc<AppState>) {
    let mut events = state.auth.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                AuthEvent::SignedIn { user_id } => {
                    logger::debug(LogTag::Auth, &format!("Session opened for {}", user_id));
                }
                AuthEvent::SignedOut { user_id } => {
                    logger::debug(LogTag::Auth, &format!("Session closed for {}", user_id));
                }
            }
        }
    });
}

/// Build the Axum application with all routes and middleware
fn build_app(state: Arc<AppState>) -> Router {
    routes::create_router(state)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}
