//! # Motiv HTTP Server Implementation
//!
//! File: server/src/commands/serve/server_logic.rs
//! Author: Motiv Developers
//!
//! ## Overview
//!
//! Runs the Axum server behind `motiv serve`:
//! - The JSON API from `routes.rs`, sharing one read-only `AppState`
//! - Static files from the configured directory for every other path
//! - Permissive CORS (unless disabled) and request tracing
//! - Automatic fallback to the next free port
//! - Graceful shutdown on Ctrl+C or SIGTERM
//!
//! ## Architecture
//!
//! 1. Find an available address starting at the configured port
//! 2. Build the router with `create_app`
//! 3. Print the connection details and serve until a shutdown signal arrives
//!
use super::config::ServerConfig;
use super::routes::{self, AppState};
use crate::core::error::Result;
use crate::services::{quotes::QuoteSet, relay::ChatRelay};
use anyhow::Context;
use axum::{
    extract::Request,
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{debug, error, info, warn, Level};

/// # Run HTTP Server (`run_server`)
///
/// Binds to the first free port at or above `config.port` and serves the
/// application until Ctrl+C or SIGTERM.
///
/// ## Errors
///
/// Fails if no port is free within the allowed attempts, if binding the
/// listener fails, or if the server itself hits a fatal error.
pub async fn run_server(config: ServerConfig) -> Result<()> {
    // Try the configured port and up to nine after it.
    let max_port_attempts = 10;
    let addr = find_available_port(config.host, config.port, max_port_attempts).await?;

    // Build the router (API routes, static files, middleware).
    let app = create_app(&config);

    // Print a startup summary for the user.
    println!("\n=================================================================");
    println!("📂 Serving files from: {}", config.directory.display());
    println!("🌐 Local URL:         http://localhost:{}", addr.port());
    println!("⚙️  Binding to address: {}", addr);
    println!("🤖 Default model:     {}", config.relay.default_model);
    println!("🔗 Upstream API:      {}", config.relay.api_url);
    println!(
        "🔑 API key:           {}",
        match &config.relay.credential {
            Some(credential) => format!("{:?}", credential.source),
            None => "not configured".to_string(),
        }
    );
    println!("🔒 CORS enabled:      {}", config.enable_cors);
    println!("=================================================================\n");

    info!(
        "Starting server on {} for directory {}",
        addr,
        config.directory.display()
    );
    println!("Server RUNNING on port {}. Press Ctrl+C to stop.", addr.port());

    // Bind for real. Another process may have taken the port since the check.
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind TCP listener to address {}", addr))?;

    // Serve until a shutdown signal arrives; in-flight requests are allowed to finish.
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    println!("\nServer shutdown complete.");
    Ok(())
}

/// Resolves when Ctrl+C or (on Unix) SIGTERM is received.
async fn shutdown_signal() {
    // Future that completes when Ctrl+C is pressed.
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, initiating graceful shutdown..."),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                // Never complete; SIGTERM can still stop the server.
                std::future::pending::<()>().await;
            }
        }
    };

    // Future that completes when SIGTERM is received (Unix only).
    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
                info!("Received SIGTERM, initiating graceful shutdown...");
            }
            Err(e) => {
                error!(
                    "Failed to install SIGTERM handler: {}. Shutdown on SIGTERM might not work.",
                    e
                );
                // Keep the future pending indefinitely if the handler fails.
                std::future::pending::<()>().await;
            }
        }
    };

    // No SIGTERM outside Unix: a future that never completes.
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    // Wait for whichever signal comes first.
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// # Find Available Port (`find_available_port`)
///
/// Tries `start_port` and then each following port, up to `max_attempts`
/// ports in total, returning the first address that can be bound.
async fn find_available_port(
    req_host: IpAddr,
    start_port: u16,
    max_attempts: u8,
) -> Result<SocketAddr> {
    let mut current_port = start_port;

    // Loop through ports sequentially, starting from start_port.
    for attempt in 0..max_attempts {
        let addr = SocketAddr::new(req_host, current_port);

        // Try to bind a listener to the current address.
        match TcpListener::bind(addr).await {
            Ok(listener) => {
                // Free the port again; `run_server` binds it for real.
                drop(listener);

                // Log if we had to use a different port than requested.
                if attempt > 0 {
                    info!(
                        "Port {} was unavailable, using port {} instead.",
                        start_port, current_port
                    );
                }
                return Ok(addr);
            }
            Err(e) => {
                // Most likely the port is in use.
                warn!(
                    "Attempt {}: Port {} on host {} is unavailable ({}). Trying next port...",
                    attempt + 1,
                    current_port,
                    req_host,
                    e
                );
                // Stop at 65535 rather than wrapping around.
                current_port = match current_port.checked_add(1) {
                    Some(next) => next,
                    None => break,
                };
            }
        }
    }

    // Every attempt failed.
    anyhow::bail!(
        "Could not find an available port on host {} starting from port {} after trying {} ports.",
        req_host,
        start_port,
        max_attempts
    )
}

/// # Create Axum Application (`create_app`)
///
/// API routes first; anything they do not match falls through to `ServeDir`,
/// which serves `index.html` for directory requests and 404s otherwise.
fn create_app(config: &ServerConfig) -> Router {
    // One relay (and one pooled HTTP client) for the lifetime of the server.
    let relay = ChatRelay::new(config.relay.clone());
    if !relay.is_configured() {
        warn!(
            "OPENAI_API_KEY (or GROQ_API_KEY) is not set. /api/ai will return a placeholder response."
        );
    }
    let state = Arc::new(AppState {
        relay,
        quotes: QuoteSet::default(),
    });

    // Permissive CORS lets a frontend on another origin call the API.
    let cors_layer = if config.enable_cors {
        info!("CORS middleware enabled (permissive).");
        CorsLayer::permissive()
    } else {
        info!("CORS middleware disabled.");
        CorsLayer::new()
    };

    // Log each request and response at INFO level.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::default().include_headers(false))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    // API routes first, static files for everything else. Dotfiles are
    // hidden before either sees the request.
    routes::router()
        .with_state(state)
        .fallback_service(ServeDir::new(&config.directory))
        .layer(middleware::from_fn(hide_dotfiles))
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(cors_layer),
        )
}

/// # Hide Dotfiles (`hide_dotfiles`)
///
/// Answers 404 for any path with a segment starting with `.`. The served
/// directory is usually the working directory, which is also where `.env`
/// (API keys) and `.motiv.toml` live.
async fn hide_dotfiles(request: Request, next: Next) -> Response {
    let hidden = request.uri().path().split('/').any(|segment| {
        // Decode first so `/%2Eenv` is caught as well; undecodable segments are hidden.
        urlencoding::decode(segment)
            .map(|decoded| decoded.starts_with('.'))
            .unwrap_or(true)
    });

    if hidden {
        debug!("Refusing to serve dotfile path: {}", request.uri().path());
        return StatusCode::NOT_FOUND.into_response();
    }
    next.run(request).await
}

// --- Unit Tests ---
