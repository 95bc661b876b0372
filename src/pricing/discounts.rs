//! Discount composition.
//!
//! Combinable offers pool their discounts and apply once; cumulative
//! offers compound sequentially. The caller guarantees it never selects
//! both kinds for the same booking (the offer screens toggle one kind off
//! when the other is picked); this module simply composes the list it is
//! given, combinable pool first, then the cumulative chain in order.

use rust_decimal::Decimal;

use super::models::{DiscountType, OfferType};

/// One eligible offer's resolved discount, ready for composition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OfferDiscount {
    pub offer_type: OfferType,
    pub discount_type: DiscountType,
    pub value: Decimal,
}

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Apply the composed discount of `discounts` to `base_amount`.
///
/// Percentages are 0-100; fixed amounts are in contract currency and are
/// never stacked percentage-style - they subtract from the running amount,
/// floored at zero.
pub fn apply(base_amount: Decimal, discounts: &[OfferDiscount]) -> Decimal {
    let mut pooled_percent = Decimal::ZERO;
    let mut pooled_fixed = Decimal::ZERO;

    for d in discounts
        .iter()
        .filter(|d| d.offer_type == OfferType::Combinable)
    {
        match d.discount_type {
            DiscountType::Percentage => pooled_percent += d.value,
            DiscountType::Fixed => pooled_fixed += d.value,
        }
    }

    let mut amount = base_amount;
    if pooled_percent > Decimal::ZERO {
        amount *= Decimal::ONE - (pooled_percent.min(HUNDRED) / HUNDRED);
    }
    if pooled_fixed > Decimal::ZERO {
        amount = (amount - pooled_fixed).max(Decimal::ZERO);
    }

    for d in discounts
        .iter()
        .filter(|d| d.offer_type == OfferType::Cumulative)
    {
        match d.discount_type {
            DiscountType::Percentage => {
                amount *= Decimal::ONE - (d.value.min(HUNDRED) / HUNDRED);
            }
            DiscountType::Fixed => {
                amount = (amount - d.value).max(Decimal::ZERO);
            }
        }
    }

    amount
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn combinable_pct(value: Decimal) -> OfferDiscount {
        OfferDiscount {
            offer_type: OfferType::Combinable,
            discount_type: DiscountType::Percentage,
            value,
        }
    }

    fn cumulative_pct(value: Decimal) -> OfferDiscount {
        OfferDiscount {
            offer_type: OfferType::Cumulative,
            discount_type: DiscountType::Percentage,
            value,
        }
    }

    #[test]
    fn test_no_discounts_leaves_amount_unchanged() {
        assert_eq!(apply(dec!(1000), &[]), dec!(1000));
    }

    #[test]
    fn test_combinable_percentages_pool_then_apply_once() {
        let discounts = [combinable_pct(dec!(10)), combinable_pct(dec!(15))];
        // 25% off once, not 10% then 15%.
        assert_eq!(apply(dec!(1000), &discounts), dec!(750));
    }

    #[test]
    fn test_combinable_composition_is_commutative() {
        let ab = [combinable_pct(dec!(10)), combinable_pct(dec!(20))];
        let ba = [combinable_pct(dec!(20)), combinable_pct(dec!(10))];
        assert_eq!(apply(dec!(847), &ab), apply(dec!(847), &ba));
    }

    #[test]
    fn test_cumulative_percentages_compound_in_order() {
        let discounts = [cumulative_pct(dec!(10)), cumulative_pct(dec!(20))];
        // 1000 * 0.9 * 0.8 = 720, not 1000 * 0.7 = 700.
        assert_eq!(apply(dec!(1000), &discounts), dec!(720));
    }

    #[test]
    fn test_combinable_fixed_amounts_pool_and_floor_at_zero() {
        let discounts = [
            OfferDiscount {
                offer_type: OfferType::Combinable,
                discount_type: DiscountType::Fixed,
                value: dec!(60),
            },
            OfferDiscount {
                offer_type: OfferType::Combinable,
                discount_type: DiscountType::Fixed,
                value: dec!(55),
            },
        ];
        assert_eq!(apply(dec!(200), &discounts), dec!(85));
        assert_eq!(apply(dec!(100), &discounts), dec!(0));
    }

    #[test]
    fn test_cumulative_fixed_subtracts_from_running_amount() {
        let discounts = [
            cumulative_pct(dec!(50)),
            OfferDiscount {
                offer_type: OfferType::Cumulative,
                discount_type: DiscountType::Fixed,
                value: dec!(30),
            },
        ];
        // 1000 * 0.5 = 500, then minus 30.
        assert_eq!(apply(dec!(1000), &discounts), dec!(470));
    }

    #[test]
    fn test_pooled_percent_is_capped_at_full_discount() {
        let discounts = [combinable_pct(dec!(70)), combinable_pct(dec!(60))];
        assert_eq!(apply(dec!(1000), &discounts), dec!(0));
    }

    #[test]
    fn test_single_offer_pool_is_trivial() {
        assert_eq!(apply(dec!(400), &[combinable_pct(dec!(10))]), dec!(360));
        assert_eq!(apply(dec!(400), &[cumulative_pct(dec!(10))]), dec!(360));
    }
}
