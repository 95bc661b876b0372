//! Stay-price calculation engine for hotel contracts.
//!
//! A pure, synchronous computation over immutable snapshots: season rate
//! periods, per-period room-type rates and promotional offers go in, a
//! per-sub-interval price breakdown comes out. The booking screens and
//! the HTTP surface call this module; it never touches shared mutable
//! state and performs no I/O.

pub mod calculators;
pub mod discounts;
pub mod error;
pub mod models;
pub mod offers;
pub mod rates;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod segmenter;
pub mod services;

// Re-export commonly used items
pub use calculators::{price_stay, round_money, StayPricingInput, StayQuote};
pub use error::PricingError;
pub use rates::RatePeriodIndex;
pub use routes::router;
