//! Rate period index and nightly rate resolution.
//!
//! Pure lookup structures built from a contract snapshot - no database
//! access. The index resolves the period covering a stay date (inclusive
//! containment) and the room-type rate attached to that period.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::warn;
use uuid::Uuid;

use super::error::PricingError;
use super::models::{
    ContractSnapshot, Occupancy, Period, PeriodRates, RateBasis, RoomTypeRate,
};

/// Indexes a season's periods and, per period, the configured room-type
/// rate entries. Read-only once built; safe to cache and share.
#[derive(Debug, Clone)]
pub struct RatePeriodIndex {
    /// Sorted by start date for deterministic first-match resolution.
    periods: Vec<Period>,
    rates_by_period: HashMap<Uuid, HashMap<Uuid, RoomTypeRate>>,
}

impl RatePeriodIndex {
    /// Build an index from period and rate snapshots.
    ///
    /// Periods within one season must not overlap; that invariant belongs
    /// to the contract editor. If a violation is observed anyway it is
    /// logged and resolution falls back to first match in start-date order.
    pub fn build(periods: &[Period], rates: &[PeriodRates]) -> Self {
        let mut periods: Vec<Period> = periods.to_vec();
        periods.sort_by_key(|p| p.start_date);

        for pair in periods.windows(2) {
            if pair[1].start_date <= pair[0].end_date {
                warn!(
                    first = %pair[0].id,
                    second = %pair[1].id,
                    "overlapping rate periods in season; resolving by first match"
                );
            }
        }

        let rates_by_period = rates
            .iter()
            .map(|entry| {
                let by_room = entry
                    .room_rates
                    .iter()
                    .map(|r| (r.room_type_id, r.clone()))
                    .collect();
                (entry.period_id, by_room)
            })
            .collect();

        Self {
            periods,
            rates_by_period,
        }
    }

    pub fn from_snapshot(snapshot: &ContractSnapshot) -> Self {
        Self::build(&snapshot.periods, &snapshot.rates)
    }

    /// Period containing `date`, by inclusive date-range containment.
    pub fn period_for(&self, date: NaiveDate) -> Option<&Period> {
        self.periods.iter().find(|p| p.contains(date))
    }

    /// Resolve the rate entry in effect for `date` and `room_type_id`.
    pub fn rates_for_date(
        &self,
        date: NaiveDate,
        room_type_id: Uuid,
    ) -> Result<&RoomTypeRate, PricingError> {
        let period = self
            .period_for(date)
            .ok_or(PricingError::PeriodNotFound { date })?;

        self.rates_by_period
            .get(&period.id)
            .and_then(|by_room| by_room.get(&room_type_id))
            .ok_or(PricingError::RoomTypeRateNotFound {
                period_id: period.id,
                room_type_id,
            })
    }

    pub fn periods(&self) -> &[Period] {
        &self.periods
    }
}

/// Nightly room rate for the given occupancy, before meal-plan supplements.
///
/// `per_unit` rates ignore occupancy entirely. `per_person` rates combine
/// the adult tier lookup (the configured whole-room rate for exactly that
/// many adults) with the additive child and infant schedules.
pub fn nightly_rate(rate: &RoomTypeRate, occupancy: Occupancy) -> Decimal {
    match rate.rate_basis {
        RateBasis::PerUnit => rate.villa_rate.unwrap_or(Decimal::ZERO),
        RateBasis::PerPerson => {
            let Some(tiers) = &rate.person_tier_rates else {
                return Decimal::ZERO;
            };
            tiers.adult.tier(occupancy.adults)
                + tiers.child.additive_total(occupancy.children)
                + tiers.infant.additive_total(occupancy.infants)
        }
    }
}

/// Flat nightly supplement for every selected meal plan other than the
/// contract's base plan: per-person amounts multiplied by occupancy counts.
pub fn meal_plan_supplement(
    rate: &RoomTypeRate,
    occupancy: Occupancy,
    base_meal_plan: &str,
    selected_meal_plans: &[String],
) -> Decimal {
    selected_meal_plans
        .iter()
        .filter(|plan| plan.as_str() != base_meal_plan)
        .filter_map(|plan| rate.meal_plan_supplements.get(plan))
        .map(|supp| {
            Decimal::from(occupancy.adults) * supp.adult
                + Decimal::from(occupancy.children) * supp.child
                + Decimal::from(occupancy.infants) * supp.infant
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::models::{MealPlanSupplement, PersonTierRates, TierTable};
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn period(id: Uuid, start: &str, end: &str) -> Period {
        Period {
            id,
            season_id: Uuid::nil(),
            start_date: d(start),
            end_date: d(end),
            minimum_length_of_stay: None,
            is_blackout: false,
        }
    }

    fn per_person_rate(room_type_id: Uuid) -> RoomTypeRate {
        RoomTypeRate {
            room_type_id,
            rate_basis: RateBasis::PerPerson,
            person_tier_rates: Some(PersonTierRates {
                adult: TierTable {
                    rates: BTreeMap::from([(1, dec!(200)), (2, dec!(180)), (3, dec!(160))]),
                },
                child: TierTable {
                    rates: BTreeMap::from([(1, dec!(80)), (2, dec!(60))]),
                },
                infant: TierTable {
                    rates: BTreeMap::from([(1, dec!(10))]),
                },
            }),
            villa_rate: None,
            meal_plan_supplements: BTreeMap::from([(
                "HB".to_string(),
                MealPlanSupplement {
                    adult: dec!(25),
                    child: dec!(12.50),
                    infant: dec!(0),
                },
            )]),
        }
    }

    // ==================== index resolution tests ====================

    #[test]
    fn test_rates_for_date_resolves_covering_period() {
        let room = Uuid::new_v4();
        let p1 = Uuid::new_v4();
        let p2 = Uuid::new_v4();
        let index = RatePeriodIndex::build(
            &[
                period(p1, "2026-06-01", "2026-06-30"),
                period(p2, "2026-07-01", "2026-08-31"),
            ],
            &[
                PeriodRates {
                    period_id: p1,
                    room_rates: vec![per_person_rate(room)],
                },
                PeriodRates {
                    period_id: p2,
                    room_rates: vec![per_person_rate(room)],
                },
            ],
        );

        assert_eq!(index.period_for(d("2026-06-15")).unwrap().id, p1);
        assert!(index.rates_for_date(d("2026-07-01"), room).is_ok());
    }

    #[test]
    fn test_inclusive_end_date_belongs_to_period() {
        let p1 = Uuid::new_v4();
        let p2 = Uuid::new_v4();
        let index = RatePeriodIndex::build(
            &[
                period(p1, "2026-06-01", "2026-06-30"),
                period(p2, "2026-07-01", "2026-08-31"),
            ],
            &[],
        );

        // A date equal to a period's end_date matches that period, not the next.
        assert_eq!(index.period_for(d("2026-06-30")).unwrap().id, p1);
        assert_eq!(index.period_for(d("2026-07-01")).unwrap().id, p2);
    }

    #[test]
    fn test_period_not_found_is_an_error_not_zero() {
        let room = Uuid::new_v4();
        let p1 = Uuid::new_v4();
        let index = RatePeriodIndex::build(&[period(p1, "2026-06-01", "2026-06-30")], &[]);

        let err = index.rates_for_date(d("2026-09-15"), room).unwrap_err();
        assert_eq!(
            err,
            PricingError::PeriodNotFound {
                date: d("2026-09-15")
            }
        );
    }

    #[test]
    fn test_room_type_not_attached_to_contract() {
        let attached = Uuid::new_v4();
        let missing = Uuid::new_v4();
        let p1 = Uuid::new_v4();
        let index = RatePeriodIndex::build(
            &[period(p1, "2026-06-01", "2026-06-30")],
            &[PeriodRates {
                period_id: p1,
                room_rates: vec![per_person_rate(attached)],
            }],
        );

        let err = index.rates_for_date(d("2026-06-10"), missing).unwrap_err();
        assert_eq!(
            err,
            PricingError::RoomTypeRateNotFound {
                period_id: p1,
                room_type_id: missing
            }
        );
    }

    // ==================== nightly rate tests ====================

    #[test]
    fn test_nightly_rate_adult_tier_is_a_lookup() {
        let rate = per_person_rate(Uuid::new_v4());
        let occ = Occupancy {
            adults: 2,
            children: 0,
            infants: 0,
        };
        // Whole-room rate for 2 adults is 180, not 200 + 180.
        assert_eq!(nightly_rate(&rate, occ), dec!(180));
    }

    #[test]
    fn test_nightly_rate_children_are_additive() {
        let rate = per_person_rate(Uuid::new_v4());
        let occ = Occupancy {
            adults: 2,
            children: 2,
            infants: 1,
        };
        // 180 (adult tier) + 80 + 60 (children) + 10 (infant)
        assert_eq!(nightly_rate(&rate, occ), dec!(330));
    }

    #[test]
    fn test_nightly_rate_missing_adult_tier_yields_zero_component() {
        let rate = per_person_rate(Uuid::new_v4());
        let occ = Occupancy {
            adults: 5,
            children: 1,
            infants: 0,
        };
        // No tier for 5 adults; only the child schedule contributes.
        assert_eq!(nightly_rate(&rate, occ), dec!(80));
    }

    #[test]
    fn test_nightly_rate_per_unit_ignores_occupancy() {
        let rate = RoomTypeRate {
            room_type_id: Uuid::new_v4(),
            rate_basis: RateBasis::PerUnit,
            person_tier_rates: None,
            villa_rate: Some(dec!(750)),
            meal_plan_supplements: BTreeMap::new(),
        };
        let one = Occupancy {
            adults: 1,
            children: 0,
            infants: 0,
        };
        let many = Occupancy {
            adults: 3,
            children: 2,
            infants: 1,
        };
        assert_eq!(nightly_rate(&rate, one), dec!(750));
        assert_eq!(nightly_rate(&rate, many), dec!(750));
    }

    // ==================== meal plan supplement tests ====================

    #[test]
    fn test_meal_plan_supplement_per_person() {
        let rate = per_person_rate(Uuid::new_v4());
        let occ = Occupancy {
            adults: 2,
            children: 2,
            infants: 1,
        };
        // 2*25 + 2*12.50 + 1*0
        let supp = meal_plan_supplement(&rate, occ, "BB", &["HB".to_string()]);
        assert_eq!(supp, dec!(75));
    }

    #[test]
    fn test_base_meal_plan_carries_no_supplement() {
        let rate = per_person_rate(Uuid::new_v4());
        let occ = Occupancy {
            adults: 2,
            children: 0,
            infants: 0,
        };
        // HB is the base plan here, so selecting it adds nothing.
        let supp = meal_plan_supplement(&rate, occ, "HB", &["HB".to_string()]);
        assert_eq!(supp, Decimal::ZERO);
    }

    #[test]
    fn test_unconfigured_meal_plan_contributes_zero() {
        let rate = per_person_rate(Uuid::new_v4());
        let occ = Occupancy {
            adults: 2,
            children: 0,
            infants: 0,
        };
        let supp = meal_plan_supplement(&rate, occ, "BB", &["AI".to_string()]);
        assert_eq!(supp, Decimal::ZERO);
    }
}
