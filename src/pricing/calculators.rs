//! Stay pricing orchestration.
//!
//! Pure functions over immutable snapshots - no database access, no I/O,
//! no shared state. One call prices one room for one stay range and one
//! occupancy; concurrent requests need no coordination.

use chrono::NaiveDate;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use tracing::warn;
use uuid::Uuid;

use super::discounts::{self, OfferDiscount};
use super::error::PricingError;
use super::models::{
    ContractSnapshot, DiscountType, Occupancy, OfferType, SpecialOffer, StaySubInterval,
};
use super::offers;
use super::rates::{meal_plan_supplement, nightly_rate, RatePeriodIndex};
use super::segmenter;

/// Round to specified decimal places using banker's rounding
/// (ROUND_HALF_EVEN), which reduces cumulative rounding bias across
/// line items.
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Everything one pricing request needs, bundled as borrowed snapshots.
///
/// Invariant (enforced by the caller building `selected_offers`, see the
/// offer screens): combinable and cumulative offers are never selected
/// together for the same booking.
#[derive(Debug, Clone, Copy)]
pub struct StayPricingInput<'a> {
    pub index: &'a RatePeriodIndex,
    pub contract: &'a ContractSnapshot,
    pub room_type_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub occupancy: Occupancy,
    pub selected_offers: &'a [SpecialOffer],
    pub booking_date: NaiveDate,
    /// When set, meal-plan supplements fold into the discountable base;
    /// otherwise they are added to the total after all discounting.
    pub apply_discounts_to_supplements: bool,
}

/// One offer that actually discounted a sub-interval, for invoice
/// line-item rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedOffer {
    pub offer_id: Uuid,
    pub name: String,
    pub offer_type: OfferType,
    pub discount_type: DiscountType,
    pub value: Decimal,
}

/// Priced slice of the stay.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedSubInterval {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub nights: u32,
    pub period_id: Option<Uuid>,
    pub rate_per_night: Decimal,
    pub supplement_per_night: Decimal,
    pub base_amount: Decimal,
    pub applied_offers: Vec<AppliedOffer>,
    pub final_amount: Decimal,
}

/// Full stay price breakdown: per-sub-interval line items plus totals.
#[derive(Debug, Clone, PartialEq)]
pub struct StayQuote {
    pub currency: String,
    pub nights: u32,
    pub sub_intervals: Vec<PricedSubInterval>,
    pub total_before_discount: Decimal,
    /// Supplements kept outside the discount base; zero when folded in.
    pub supplement_total: Decimal,
    pub total: Decimal,
    /// Strictest minimum length of stay among the periods the stay
    /// touches, surfaced for the booking screen; does not block pricing.
    pub minimum_length_of_stay: Option<u32>,
    pub meets_minimum_stay: bool,
    /// Whether any touched period is flagged as a blackout period.
    pub has_blackout_period: bool,
}

/// Price a stay for one room type and occupancy.
///
/// Segments the stay at every period and offer boundary, prices each
/// sub-interval from the rate index, applies the composed discount of the
/// offers eligible for that sub-interval, and assembles totals. Any
/// sub-interval whose base rate cannot be resolved fails the whole
/// request with [`PricingError::IncompletePricing`]; there is no fallback
/// rate and no silent zero-pricing.
pub fn price_stay(input: StayPricingInput<'_>) -> Result<StayQuote, PricingError> {
    if input.check_out <= input.check_in {
        return Err(PricingError::InvalidStayRange {
            check_in: input.check_in,
            check_out: input.check_out,
        });
    }
    if input.occupancy.adults == 0 {
        return Err(PricingError::InvalidOccupancy);
    }

    let total_nights = (input.check_out - input.check_in).num_days() as u32;

    // One bad offer must not block pricing: drop it with a warning.
    let valid_offers: Vec<&SpecialOffer> = input
        .selected_offers
        .iter()
        .filter(|offer| match offers::validate(offer) {
            Ok(()) => true,
            Err(err) => {
                warn!(offer_id = %offer.id, %err, "skipping misconfigured offer");
                false
            }
        })
        .collect();

    let offers_for_segmentation: Vec<SpecialOffer> =
        valid_offers.iter().map(|o| (*o).clone()).collect();
    let subs = segmenter::segment(
        input.check_in,
        input.check_out,
        &input.contract.periods,
        &offers_for_segmentation,
    );

    let mut priced = Vec::with_capacity(subs.len());
    let mut errors = Vec::new();
    let mut total_before_discount = Decimal::ZERO;
    let mut supplement_total = Decimal::ZERO;
    let mut total = Decimal::ZERO;

    for sub in &subs {
        let rate = match input.index.rates_for_date(sub.start, input.room_type_id) {
            Ok(rate) => rate,
            Err(err) => {
                errors.push(err);
                continue;
            }
        };

        let rate_per_night = nightly_rate(rate, input.occupancy);
        let supplement_per_night = meal_plan_supplement(
            rate,
            input.occupancy,
            &input.contract.base_meal_plan,
            &input.contract.selected_meal_plans,
        );

        let nights = Decimal::from(sub.nights);
        let mut base_amount = rate_per_night * nights;
        if input.apply_discounts_to_supplements {
            base_amount += supplement_per_night * nights;
        } else {
            supplement_total += supplement_per_night * nights;
        }

        let (applied, discount_inputs) =
            eligible_discounts(&valid_offers, sub, input.booking_date, total_nights);
        let final_amount = round_money(discounts::apply(base_amount, &discount_inputs), 2);

        total_before_discount += base_amount;
        total += final_amount;

        priced.push(PricedSubInterval {
            start: sub.start,
            end: sub.end,
            nights: sub.nights,
            period_id: sub.period_id,
            rate_per_night,
            supplement_per_night,
            base_amount,
            applied_offers: applied,
            final_amount,
        });
    }

    if !errors.is_empty() {
        return Err(PricingError::IncompletePricing { errors });
    }

    total += supplement_total;

    let touched_periods: Vec<_> = input
        .contract
        .periods
        .iter()
        .filter(|p| priced.iter().any(|s| s.period_id == Some(p.id)))
        .collect();
    let minimum_length_of_stay = touched_periods
        .iter()
        .filter_map(|p| p.minimum_length_of_stay)
        .max();
    let has_blackout_period = touched_periods.iter().any(|p| p.is_blackout);

    Ok(StayQuote {
        currency: input.contract.currency.clone(),
        nights: total_nights,
        sub_intervals: priced,
        total_before_discount,
        supplement_total,
        total: round_money(total, 2),
        minimum_length_of_stay,
        meets_minimum_stay: minimum_length_of_stay.map_or(true, |min| total_nights >= min),
        has_blackout_period,
    })
}

/// Offers eligible for one sub-interval, with their resolved discount
/// values, restricted to what the caller selected.
///
/// When both kinds are somehow eligible on the same sub-interval the
/// combinable pool takes precedence and the cumulative chain is held
/// back for the slices the combinable offers do not reach. Selection
/// screens prevent mixed selections outright, so this only matters for
/// stays where offer windows of both kinds overlap partially.
fn eligible_discounts(
    valid_offers: &[&SpecialOffer],
    sub: &StaySubInterval,
    booking_date: NaiveDate,
    total_nights: u32,
) -> (Vec<AppliedOffer>, Vec<OfferDiscount>) {
    let mut applied = Vec::new();
    let mut inputs = Vec::new();

    for offer in valid_offers {
        if !offers::is_eligible(offer, sub, booking_date, total_nights) {
            continue;
        }
        let value = offers::discount_for(offer, sub);
        if value <= Decimal::ZERO {
            continue;
        }
        applied.push(AppliedOffer {
            offer_id: offer.id,
            name: offer.name.clone(),
            offer_type: offer.offer_type,
            discount_type: offer.discount_type,
            value,
        });
        inputs.push(OfferDiscount {
            offer_type: offer.offer_type,
            discount_type: offer.discount_type,
            value,
        });
    }

    if inputs
        .iter()
        .any(|d| d.offer_type == OfferType::Combinable)
    {
        applied.retain(|a| a.offer_type == OfferType::Combinable);
        inputs.retain(|d| d.offer_type == OfferType::Combinable);
    }

    (applied, inputs)
}
