//! Serving binary: binds a listener, wires tracing, serves the router.

use std::net::SocketAddr;

use axum::{
    extract::{self, FromRequestParts},
    http,
    middleware::{self, Next},
};
use ipmirror::ClientIdentity;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{Span, info, info_span, level_filters::LevelFilter};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(serde::Deserialize)]
struct Config {
    #[serde(default = "default_listen")]
    listen: SocketAddr,
}

fn default_listen() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 3000))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with(fmt::layer())
        .init();

    let config: Config = envy::from_env()?;

    let app = ipmirror::app().layer(
        ServiceBuilder::new()
            // Create a request span with a placeholder for the client IP
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &http::Request<_>| {
                    info_span!(
                        "request",
                        method = %request.method(),
                        uri = %request.uri(),
                        client_ip = tracing::field::Empty
                    )
                }),
            )
            // Resolve the identity and fill the span placeholder
            .layer(middleware::from_fn(
                async |request: extract::Request, next: Next| {
                    let (mut parts, body) = request.into_parts();
                    if let Ok(identity) = ClientIdentity::from_request_parts(&mut parts, &()).await
                    {
                        Span::current().record("client_ip", identity.0.as_str());
                    }
                    next.run(extract::Request::from_parts(parts, body)).await
                },
            )),
    );

    let listener = TcpListener::bind(config.listen).await?;
    info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("shutdown signal received");
}
