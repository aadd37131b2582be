use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::error;

use crate::{
    app_state::AppState,
    gas::{FeeEstimate, FeeEstimatorError},
    render::{render_error_page, render_page, GasFeeDisplay, RenderError},
    shared::{estimator_status, HttpError},
};

#[derive(Debug, Serialize)]
pub struct GasFeeResponse {
    /// Fee per gas for each tier, in wei
    pub estimate: FeeEstimate,
    /// The same tiers in gwei, captioned as on the page
    pub display: GasFeeDisplay,
}

async fn estimate(state: &AppState) -> Result<FeeEstimate, FeeEstimatorError> {
    state.fee_estimator.estimate(state.block_count, &state.reward_percentiles).await
}

/// Returns a fresh fee estimate as JSON.
///
/// # Returns
/// * `Ok(Json<GasFeeResponse>)` - Raw wei values and their gwei display
/// * `Err(HttpError)` - 502/504 with `{ error, kind }` when the node misbehaves
async fn get_gas_fee(
    State(state): State<Arc<AppState>>,
) -> Result<Json<GasFeeResponse>, HttpError> {
    let estimate = estimate(&state).await?;
    let display = GasFeeDisplay::new(&estimate, state.labels)?;

    Ok(Json(GasFeeResponse { estimate, display }))
}

fn render_failure(error: RenderError) -> Response {
    error!("Fee estimate could not be rendered - {:?}", error);
    (StatusCode::INTERNAL_SERVER_ERROR, error.to_string()).into_response()
}

/// Renders the average gas fee page, or its failure state.
pub async fn gas_fee_page(State(state): State<Arc<AppState>>) -> Response {
    let estimate = match estimate(&state).await {
        Ok(estimate) => estimate,
        Err(err) => {
            error!("Fee estimation failed - {:?}", err);
            return match render_error_page(&err, &state.network_name) {
                Ok(page) => (estimator_status(&err), Html(page)).into_response(),
                Err(render_err) => render_failure(render_err),
            };
        }
    };

    match GasFeeDisplay::new(&estimate, state.labels)
        .and_then(|display| render_page(&display, &state.network_name))
    {
        Ok(page) => Html(page).into_response(),
        Err(err) => render_failure(err),
    }
}

/// Creates the gas fee JSON routes.
pub fn create_gas_routes() -> Router<Arc<AppState>> {
    Router::new().route("/gas-fee", get(get_gas_fee))
}
