//! Cache-aware pricing service.
//!
//! Thin orchestration over the pure calculator: resolves (or builds) the
//! rate period index for the request's contract snapshot, then delegates.
//! The cached index is keyed by contract id and checked against the
//! snapshot's version, so an index built from an older edit of the
//! contract is rebuilt rather than reused.

use std::sync::Arc;
use tracing::debug;

use crate::cache::{AppCache, CachedRateIndex};

use super::calculators::{price_stay, StayPricingInput, StayQuote};
use super::error::PricingError;
use super::rates::RatePeriodIndex;
use super::requests::StayQuoteRequest;

/// Price one stay, reusing the cached rate index when current.
pub async fn quote_stay(
    cache: &AppCache,
    request: &StayQuoteRequest,
) -> Result<StayQuote, PricingError> {
    let contract = &request.contract;

    let entry = match cache.rate_indexes.get(&contract.contract_id).await {
        Some(cached) if cached.version == contract.current_version => {
            debug!(contract = %contract.contract_id, "cache HIT for rate index");
            cached
        }
        _ => {
            debug!(contract = %contract.contract_id, "cache MISS for rate index");
            let built = Arc::new(CachedRateIndex {
                version: contract.current_version,
                index: RatePeriodIndex::from_snapshot(contract),
            });
            cache
                .rate_indexes
                .insert(contract.contract_id, built.clone())
                .await;
            built
        }
    };

    price_stay(StayPricingInput {
        index: &entry.index,
        contract,
        room_type_id: request.room_type_id,
        check_in: request.check_in,
        check_out: request.check_out,
        occupancy: request.occupancy,
        selected_offers: &request.selected_offers,
        booking_date: request.booking_date,
        apply_discounts_to_supplements: request.apply_discounts_to_supplements,
    })
}
