use std::{net::SocketAddr, sync::Arc, time::Instant};

use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::get,
    Json, Router,
};
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};

use crate::{
    app_state::AppState,
    gas::{
        api::{create_gas_routes, gas_fee_page},
        FeeEstimator,
    },
    logger::mark_shutdown_started,
    provider::{EvmChainClient, RetryClientError},
    shared::HttpError,
    GasFeeConfig,
};

#[derive(Error, Debug)]
pub enum StartError {
    #[error("{0}")]
    RetryClientError(#[from] RetryClientError),

    #[error("Failed to start the API: {0}")]
    ApiStartupError(#[from] std::io::Error),
}

async fn health_check() -> Result<Json<String>, HttpError> {
    Ok(Json("healthy".to_string()))
}

/// Logs every HTTP request with its status and latency.
async fn activity_logger(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let start = Instant::now();

    let response = next.run(req).await;

    let status = response.status();
    let duration = start.elapsed();

    if status.is_server_error() {
        error!("{} {} responded with {} after {:?}", method, uri, status, duration);
    } else if status.is_client_error() {
        warn!("{} {} responded with {} after {:?}", method, uri, status, duration);
    } else {
        info!("{} {} responded with {} after {:?}", method, uri, status, duration);
    }

    response
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}

/// Builds the router serving the page, the JSON API and the health check.
pub fn create_app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/", get(gas_fee_page))
        .route("/health", get(health_check))
        .nest("/api", create_gas_routes())
        .fallback(not_found)
        .layer(middleware::from_fn(activity_logger))
        .layer(cors)
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }

    mark_shutdown_started();
    info!("Shutdown signal received, stopping gasfee");
}

/// Connects to the configured node and serves until Ctrl-C.
pub async fn start(config: GasFeeConfig) -> Result<(), StartError> {
    let chain_client = EvmChainClient::connect(&config.rpc_url, config.rpc_timeout)?;
    let state = Arc::new(AppState::new(FeeEstimator::new(Arc::new(chain_client)), &config));

    info!(
        "Averaging {} blocks at percentiles {} with {:?} labels",
        config.block_count, config.reward_percentiles, config.labels
    );

    let app = create_app(state).into_make_service_with_connect_info::<SocketAddr>();

    let address = format!("{}:{}", config.api_config.host, config.api_config.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("gasfee is up on http://{}", address);

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    Ok(())
}
