//! scout-server – entry point.
//!
//! Startup order:
//! 1. Load `.env`, then parse configuration from environment variables.
//!    A missing `GROQ_API_KEY` stops the process here.
//! 2. Initialise structured tracing (JSON or human-readable).
//! 3. Build the model client and the generation pipeline.
//! 4. Build the Axum router and start the HTTP server with graceful shutdown.

mod config;
mod error;
mod extract;
mod middleware;
mod routes;
mod schemas;
mod state;

use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;

use scout_core::{GenerationPipeline, InMemoryConversationStore, OpenAiCompatClient};
use tracing::{info, warn};

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> ExitCode {
    // ── 1. Configuration ───────────────────────────────────────────────────────
    let dotenv = dotenvy::dotenv();

    let cfg = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("ERROR: {e}");
            eprintln!("Add it to a .env file next to the server or export it before starting.");
            return ExitCode::FAILURE;
        }
    };

    // ── 2. Tracing ─────────────────────────────────────────────────────────────
    init_tracing(&cfg);
    if let Ok(path) = dotenv {
        info!(path = %path.display(), "loaded environment file");
    }

    match run(cfg).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = ?e, "scout-server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cfg: Config) -> anyhow::Result<()> {
    info!(
        version = env!("CARGO_PKG_VERSION"),
        provider = %cfg.llm_provider,
        model = %cfg.model,
        "scout-server starting"
    );

    // ── 3. Model client + pipeline ─────────────────────────────────────────────
    let client = OpenAiCompatClient::new(
        cfg.api_key.clone(),
        &cfg.llm_base_url,
        cfg.model.clone(),
        cfg.llm_timeout,
    )?
    .with_provider(cfg.llm_provider.clone());
    info!(endpoint = client.endpoint(), "model client ready");

    let pipeline = GenerationPipeline::new(Arc::new(client), cfg.profiles)?;

    let state = Arc::new(AppState {
        config: Arc::new(cfg.clone()),
        pipeline: Arc::new(pipeline),
        conversations: Arc::new(InMemoryConversationStore::new()),
    });

    // ── 4. HTTP server with graceful shutdown ──────────────────────────────────
    let app = routes::build(Arc::clone(&state));
    let addr: SocketAddr = cfg.bind_address.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server listening; API available under /api");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("scout-server stopped");
    Ok(())
}

fn init_tracing(cfg: &Config) {
    // RUST_LOG wins over SCOUT_LOG. Warn loudly if SCOUT_LOG is not a valid
    // filter expression.
    let env_filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => match cfg.log_level.parse::<tracing_subscriber::EnvFilter>() {
            Ok(f) => f,
            Err(e) => {
                eprintln!(
                    "WARN: SCOUT_LOG='{}' is not a valid tracing filter ({}); \
                     falling back to 'info'",
                    cfg.log_level, e
                );
                tracing_subscriber::EnvFilter::new("info")
            }
        },
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(true);

    if cfg.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

/// Returns a future that resolves when SIGINT (Ctrl-C) or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install CTRL+C signal handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => warn!(error = %e, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("shutdown signal received; starting graceful shutdown");
}
