//! Pricing API route handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::cache::CacheStats;
use crate::error::Result;
use crate::AppState;

use super::requests::StayQuoteRequest;
use super::responses::StayQuoteResponse;
use super::services;

/// Router for the pricing API
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/pricing/stay-quote", post(stay_quote))
        .route("/api/cache/stats", get(cache_stats))
        .route("/api/cache/invalidate/:contract_id", post(invalidate_contract))
}

/// Price one stay from the contract snapshot carried in the request
async fn stay_quote(
    State(state): State<AppState>,
    Json(request): Json<StayQuoteRequest>,
) -> Result<Json<StayQuoteResponse>> {
    let quote = services::quote_stay(&state.cache, &request).await?;
    Ok(Json(quote.into()))
}

/// Cache statistics for monitoring
async fn cache_stats(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache.stats())
}

/// Drop the cached rate index for a contract; called by the
/// contract-editing screens after any rate, period or offer change
async fn invalidate_contract(
    State(state): State<AppState>,
    Path(contract_id): Path<Uuid>,
) -> StatusCode {
    state.cache.invalidate_contract(contract_id).await;
    StatusCode::NO_CONTENT
}
