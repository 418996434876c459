use anyhow::{Context, Result};
use clap::Parser;
use profweb::{AppConfig, AppState, Stores, build_router, store::seed};
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "profweb")]
#[command(about = "Portfolio site resource API")]
struct Cli {
    /// Overrides APP_HOST
    #[arg(long)]
    host: Option<String>,
    /// Overrides APP_PORT
    #[arg(long)]
    port: Option<u16>,
    /// Load demo projects, publications, news and comments on startup
    #[arg(long)]
    seed: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let mut config = AppConfig::from_env().context("failed to load application configuration")?;
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    config.seed_demo_data |= cli.seed;

    let stores = Stores::in_memory();
    if config.seed_demo_data {
        seed::load_demo(&stores)
            .await
            .context("failed to load demo content")?;
    }

    let mut app = build_router(AppState::new(stores).with_revalidate(config.revalidate));
    if config.cors_permissive {
        app = app.layer(CorsLayer::permissive());
    }

    let addr = config.address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(
        address = %addr,
        public_base_url = config.public_base_url.as_deref().unwrap_or("(relative)"),
        "portfolio api started"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

const DEFAULT_LOG_FILTER: &str = "profweb=debug,tower_http=info";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

/// Resolves on the first of SIGINT or SIGTERM and logs which one it was.
///
/// A signal whose handler cannot be installed never fires.
async fn shutdown_signal() {
    let interrupt = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => "SIGINT",
            Err(err) => {
                error!(error = %err, "Ctrl+C handler unavailable");
                std::future::pending::<&'static str>().await
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                "SIGTERM"
            }
            Err(err) => {
                error!(error = %err, "SIGTERM handler unavailable");
                std::future::pending::<&'static str>().await
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<&'static str>();

    let received = tokio::select! {
        name = interrupt => name,
        name = terminate => name,
    };
    info!(signal = received, "shutting down, draining in-flight requests");
}
