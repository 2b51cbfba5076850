//! newton-tutor HTTP server.
//!
//! - `POST /api/solve`: solve an exercise and judge the student's answer
//! - `GET  /health`: server status
//!
//! Configuration comes from `NEWTON_SERVER_BIND`, `NEWTON_SERVER_PORT` and
//! `NEWTON_KNOWLEDGE`.
//!
//! Build and run: `cargo run --bin newton-tutor-server`

use newton_tutor::config::ServerConfig;
use newton_tutor::knowledge::Knowledge;
use newton_tutor::server;
use newton_tutor::tutor::Tutor;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env().unwrap_or_else(|e| {
        tracing::error!("invalid configuration: {e}");
        std::process::exit(1);
    });

    // Loaded once; a failure leaves the server up in degraded mode.
    let knowledge = Knowledge::load(&config.knowledge);
    if !knowledge.is_available() {
        tracing::warn!("serving without a knowledge base; /api/solve will return 500");
    }

    let app = server::router(Tutor::new(knowledge));
    let addr = config.addr();

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("failed to bind {addr}: {e}");
            std::process::exit(1);
        }
    };
    tracing::info!("newton-tutor server listening on {addr}");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("server error: {e}");
        std::process::exit(1);
    }
}
