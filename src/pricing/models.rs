//! Domain model for contract rates and promotional offers.
//!
//! These types are the immutable snapshot the pricing engine computes over.
//! They are produced by the (external) contract and offer management screens
//! and passed in per request; the engine never mutates them.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Inclusive date range (both endpoints are stay/valid dates).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// A range is well-formed when it does not end before it starts.
    pub fn is_well_formed(&self) -> bool {
        self.start <= self.end
    }

    /// Inclusive containment test.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Day after the inclusive end, used as an exclusive boundary when
    /// splitting half-open stay intervals.
    pub fn exclusive_end(&self) -> NaiveDate {
        self.end.checked_add_days(Days::new(1)).unwrap_or(self.end)
    }
}

/// A season rate period. Periods within one season must not overlap;
/// stay dates match by inclusive containment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Period {
    pub id: Uuid,
    pub season_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub minimum_length_of_stay: Option<u32>,
    #[serde(default)]
    pub is_blackout: bool,
}

impl Period {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    pub fn date_range(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }
}

/// How a room rate is quoted: per occupant tier or one flat unit rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateBasis {
    PerPerson,
    PerUnit,
}

/// Occupancy-count-indexed rate table.
///
/// Interpretation depends on the occupant kind: the adult table is a tier
/// lookup (`rates[2]` is the whole-room rate for exactly 2 adults), while
/// child and infant tables are additive schedules (`rates[1]` is the 1st
/// child's supplement, `rates[2]` the 2nd's, and so on).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TierTable {
    #[serde(default)]
    pub rates: BTreeMap<u32, Decimal>,
}

impl TierTable {
    /// Tier lookup: the rate configured for exactly `count` occupants,
    /// or zero when no tier is configured.
    pub fn tier(&self, count: u32) -> Decimal {
        self.rates.get(&count).copied().unwrap_or(Decimal::ZERO)
    }

    /// Additive schedule: sum of the 1st..=`count` per-unit entries,
    /// treating missing entries as zero.
    pub fn additive_total(&self, count: u32) -> Decimal {
        (1..=count).map(|i| self.tier(i)).sum()
    }
}

/// Per-occupant-kind rate tables for a `per_person` room rate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonTierRates {
    #[serde(default)]
    pub adult: TierTable,
    #[serde(default)]
    pub child: TierTable,
    #[serde(default)]
    pub infant: TierTable,
}

/// Flat per-person nightly supplement for one meal plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MealPlanSupplement {
    pub adult: Decimal,
    pub child: Decimal,
    pub infant: Decimal,
}

/// Configured rate entry for one room type within one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomTypeRate {
    pub room_type_id: Uuid,
    pub rate_basis: RateBasis,
    #[serde(default)]
    pub person_tier_rates: Option<PersonTierRates>,
    #[serde(default)]
    pub villa_rate: Option<Decimal>,
    /// Keyed by meal plan code (e.g. "HB", "FB", "AI").
    #[serde(default)]
    pub meal_plan_supplements: BTreeMap<String, MealPlanSupplement>,
}

/// Room occupancy for one pricing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupancy {
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    #[serde(default)]
    pub infants: u32,
}

/// Whether an offer pools with others or compounds against them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferType {
    Combinable,
    Cumulative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    Percentage,
    Fixed,
}

/// One date-scoped discount value inside an offer. Resolution is
/// first-match in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountValue {
    pub value: Decimal,
    pub valid_from: NaiveDate,
    pub valid_to: NaiveDate,
}

impl DiscountValue {
    pub fn date_range(&self) -> DateRange {
        DateRange::new(self.valid_from, self.valid_to)
    }
}

/// A published promotional offer. Immutable once published.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialOffer {
    pub id: Uuid,
    pub name: String,
    pub offer_type: OfferType,
    pub discount_type: DiscountType,
    pub discount_values: Vec<DiscountValue>,
    pub travel_date_range: DateRange,
    #[serde(default)]
    pub booking_window: Option<DateRange>,
    #[serde(default)]
    pub blackout_dates: Vec<DateRange>,
    #[serde(default)]
    pub minimum_nights: Option<u32>,
    #[serde(default)]
    pub maximum_nights: Option<u32>,
}

/// Half-open stay slice `[start, end)` within which the applicable period
/// and offer set is constant. Derived per request, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct StaySubInterval {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub nights: u32,
    pub period_id: Option<Uuid>,
}

impl StaySubInterval {
    /// Date of the last night spent inside this sub-interval.
    pub fn last_night(&self) -> NaiveDate {
        self.end.pred_opt().unwrap_or(self.start)
    }
}

/// Rates configured for one period of the contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodRates {
    pub period_id: Uuid,
    pub room_rates: Vec<RoomTypeRate>,
}

/// Immutable contract snapshot handed to the engine per request: the
/// outputs of the external season/contract/offer collaborators bundled
/// into one value, so pricing never observes a half-edited contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractSnapshot {
    pub contract_id: Uuid,
    pub hotel_id: Uuid,
    pub market_id: Uuid,
    pub season_id: Uuid,
    /// Bumped by the contract editor on every change; part of the
    /// rate-index cache key.
    pub current_version: i32,
    pub currency: String,
    pub base_meal_plan: String,
    #[serde(default)]
    pub selected_meal_plans: Vec<String>,
    pub periods: Vec<Period>,
    pub rates: Vec<PeriodRates>,
}
