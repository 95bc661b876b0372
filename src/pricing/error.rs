//! Pricing error taxonomy.
//!
//! Anything that affects the base rate is fatal and surfaced verbatim; a
//! partial, wrong-looking total is worse than an explicit error. Per-offer
//! data problems are recovered locally by skipping the offer.

use chrono::NaiveDate;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PricingError {
    /// No rate period covers a date inside the stay. There is no fallback
    /// rate; the request must fail rather than price the gap at zero.
    #[error("no rate period covers {date}")]
    PeriodNotFound { date: NaiveDate },

    /// The period exists but the room type was never attached to the
    /// contract's configured rates.
    #[error("room type {room_type_id} has no configured rate in period {period_id}")]
    RoomTypeRateNotFound { period_id: Uuid, room_type_id: Uuid },

    /// An offer references a malformed date range or night bounds. The
    /// offer is skipped with a warning; pricing proceeds without it.
    #[error("offer {offer_id} is misconfigured: {reason}")]
    InvalidOfferConfiguration { offer_id: Uuid, reason: String },

    #[error("invalid stay range: check-out {check_out} is not after check-in {check_in}")]
    InvalidStayRange {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },

    #[error("adults must be at least 1 for per-person pricing")]
    InvalidOccupancy,

    /// Aggregate error at the calculator boundary wrapping every
    /// sub-interval failure encountered for one request.
    #[error("pricing incomplete: {n} sub-interval(s) could not be priced", n = .errors.len())]
    IncompletePricing { errors: Vec<PricingError> },
}
