use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ocr_gateway::api::{create_router, AppState};
use ocr_gateway::config::Config;
use ocr_gateway::language::Language;
use ocr_gateway::ocr::OcrProvider;
use ocr_gateway::server;

const BIND_HOST: &str = "0.0.0.0";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ocr_gateway=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    let languages = Language::ALL
        .iter()
        .map(|lang| format!("{} ({})", lang.name(), lang.code()))
        .collect::<Vec<_>>()
        .join(", ");
    tracing::info!("Starting OCR server on port {}", config.server.port);
    tracing::info!("Timeout: {} seconds", config.server.timeout_secs);
    tracing::info!("Max file size: {} MB", config.server.max_upload_size_mb);
    tracing::info!("Supported languages: {}", languages);
    if config.server.timeout().is_none() {
        tracing::warn!("OCR_TIMEOUT is not positive - connections will not time out");
    }

    let ocr = OcrProvider::new(&config.ocr);
    let state = AppState::new(config.clone(), ocr);
    let app = create_router(state);

    let addr = format!("{}:{}", BIND_HOST, config.server.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            return Err(e.into());
        }
    };

    tracing::info!("OCR gateway listening on http://{}", addr);
    tracing::info!("  Health check: http://{}/health", addr);
    tracing::info!("  OCR endpoint: POST http://{}/ocr", addr);

    let cancel_token = CancellationToken::new();
    tokio::spawn(shutdown_signal(cancel_token.clone()));

    server::serve(listener, app, config.server.timeout(), cancel_token).await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal(cancel_token: CancellationToken) {
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections...");
    cancel_token.cancel();
}
