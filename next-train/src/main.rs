use std::process;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use next_train::board::PredictionBoard;
use next_train::config::AppConfig;
use next_train::predictions::{FixtureTransport, PredictionFetcher, Transport};
use next_train::stations::StationCatalog;
use next_train::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match dotenvy::dotenv() {
        Ok(path) => info!(path = %path.display(), "loaded environment file"),
        Err(e) if e.not_found() => {}
        Err(e) => warn!("ignoring unreadable environment file: {e}"),
    }

    let config = AppConfig::from_env().unwrap_or_else(|e| fatal("invalid configuration", e));

    let catalog = match &config.stations_file {
        Some(path) => StationCatalog::from_file(path),
        None => StationCatalog::builtin(),
    }
    .unwrap_or_else(|e| fatal("failed to load stations", e));
    info!(stations = catalog.len(), "loaded station catalog");

    match &config.fixtures_dir {
        Some(dir) => {
            let transport =
                FixtureTransport::new(dir).unwrap_or_else(|e| fatal("failed to load fixtures", e));
            info!(codes = ?transport.available_codes(), "serving predictions from fixtures");
            let fetcher = PredictionFetcher::with_transport(config.prediction_config(), transport);
            serve(PredictionBoard::new(catalog, fetcher), &config).await;
        }
        None => {
            let fetcher = PredictionFetcher::new(config.prediction_config())
                .unwrap_or_else(|e| fatal("failed to create prediction client", e));
            serve(PredictionBoard::new(catalog, fetcher), &config).await;
        }
    }
}

async fn serve<T: Transport>(board: PredictionBoard<T>, config: &AppConfig) {
    let state = AppState::new(board, config.deadline);
    let app = create_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .unwrap_or_else(|e| fatal("failed to bind", e));

    info!("Next train board listening on http://{}", config.bind_addr);
    info!("  GET  /                        - Dashboard");
    info!("  GET  /api/stations            - Station names");
    info!("  GET  /api/predictions?station - Predictions as JSON");
    info!("  GET  /health                  - Health check");

    if let Err(e) = axum::serve(listener, app).await {
        fatal("server error", e);
    }
}

fn fatal(context: &str, err: impl std::fmt::Display) -> ! {
    error!("{context}: {err}");
    process::exit(1);
}
