//! Offer eligibility and discount-value resolution.
//!
//! Decisions are made per stay sub-interval, never per whole stay: the
//! segmenter has already split the stay at every offer boundary, so a
//! blackout can disqualify one slice of a stay while its neighbours keep
//! the discount.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::PricingError;
use super::models::{DateRange, SpecialOffer, StaySubInterval};

/// Check an offer's configuration before it participates in pricing.
///
/// A malformed offer must not block the whole request; callers skip it
/// with a warning and keep going.
pub fn validate(offer: &SpecialOffer) -> Result<(), PricingError> {
    let misconfigured = |reason: String| PricingError::InvalidOfferConfiguration {
        offer_id: offer.id,
        reason,
    };

    let check_range = |range: &DateRange, what: &str| {
        if range.is_well_formed() {
            Ok(())
        } else {
            Err(misconfigured(format!(
                "{what} ends {} before it starts {}",
                range.end, range.start
            )))
        }
    };

    check_range(&offer.travel_date_range, "travel date range")?;
    if let Some(window) = &offer.booking_window {
        check_range(window, "booking window")?;
    }
    for blackout in &offer.blackout_dates {
        check_range(blackout, "blackout range")?;
    }
    for value in &offer.discount_values {
        check_range(&value.date_range(), "discount value range")?;
    }

    if let (Some(min), Some(max)) = (offer.minimum_nights, offer.maximum_nights) {
        if min > max {
            return Err(misconfigured(format!(
                "minimum nights {min} exceeds maximum nights {max}"
            )));
        }
    }

    Ok(())
}

/// Whether `offer` applies to `sub`.
///
/// All conditions must hold: the sub-interval lies inside the travel
/// range, it overlaps no blackout range (any overlap, even partial,
/// disqualifies this sub-interval only), the booking date falls in the
/// booking window when one is configured, and the *total stay* length
/// satisfies the offer's night bounds.
pub fn is_eligible(
    offer: &SpecialOffer,
    sub: &StaySubInterval,
    booking_date: NaiveDate,
    total_stay_nights: u32,
) -> bool {
    let travel = &offer.travel_date_range;
    if sub.start < travel.start || sub.last_night() > travel.end {
        return false;
    }

    if offer
        .blackout_dates
        .iter()
        .any(|b| sub.start <= b.end && b.start <= sub.last_night())
    {
        return false;
    }

    if let Some(window) = &offer.booking_window {
        if !window.contains(booking_date) {
            return false;
        }
    }

    if let Some(min) = offer.minimum_nights {
        if total_stay_nights < min {
            return false;
        }
    }
    if let Some(max) = offer.maximum_nights {
        if total_stay_nights > max {
            return false;
        }
    }

    true
}

/// Discount value in effect for `sub`: the first configured value whose
/// own date range contains the sub-interval's start date. First match in
/// declaration order wins; no match means no discount.
pub fn discount_for(offer: &SpecialOffer, sub: &StaySubInterval) -> Decimal {
    offer
        .discount_values
        .iter()
        .find(|v| v.date_range().contains(sub.start))
        .map(|v| v.value)
        .unwrap_or(Decimal::ZERO)
}
