//! Response DTOs for pricing API endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::calculators::{AppliedOffer, PricedSubInterval, StayQuote};
use super::models::{DiscountType, OfferType};

/// Money value for JSON responses
#[derive(Debug, Clone, Serialize)]
pub struct Money {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: String,
}

/// One offer that discounted a sub-interval, for invoice line items
#[derive(Debug, Clone, Serialize)]
pub struct AppliedOfferResponse {
    pub offer_id: Uuid,
    pub name: String,
    pub offer_type: OfferType,
    pub discount_type: DiscountType,
    #[serde(with = "rust_decimal::serde::str")]
    pub value: Decimal,
}

/// One priced slice of the stay
#[derive(Debug, Clone, Serialize)]
pub struct PricedSubIntervalResponse {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub nights: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_id: Option<Uuid>,
    pub rate_per_night: Money,
    pub supplement_per_night: Money,
    pub base_amount: Money,
    pub applied_offers: Vec<AppliedOfferResponse>,
    pub final_amount: Money,
}

/// Full stay quote: breakdown plus totals
#[derive(Debug, Clone, Serialize)]
pub struct StayQuoteResponse {
    pub currency: String,
    pub nights: u32,
    pub sub_intervals: Vec<PricedSubIntervalResponse>,
    pub total_before_discount: Money,
    pub supplement_total: Money,
    pub total: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_length_of_stay: Option<u32>,
    pub meets_minimum_stay: bool,
    pub has_blackout_period: bool,
}

impl From<StayQuote> for StayQuoteResponse {
    fn from(quote: StayQuote) -> Self {
        let currency = quote.currency.clone();
        let money = |amount: Decimal| Money {
            amount,
            currency: currency.clone(),
        };

        let sub_intervals = quote
            .sub_intervals
            .into_iter()
            .map(|sub: PricedSubInterval| PricedSubIntervalResponse {
                start: sub.start,
                end: sub.end,
                nights: sub.nights,
                period_id: sub.period_id,
                rate_per_night: money(sub.rate_per_night),
                supplement_per_night: money(sub.supplement_per_night),
                base_amount: money(sub.base_amount),
                applied_offers: sub
                    .applied_offers
                    .into_iter()
                    .map(|offer: AppliedOffer| AppliedOfferResponse {
                        offer_id: offer.offer_id,
                        name: offer.name,
                        offer_type: offer.offer_type,
                        discount_type: offer.discount_type,
                        value: offer.value,
                    })
                    .collect(),
                final_amount: money(sub.final_amount),
            })
            .collect();

        Self {
            sub_intervals,
            total_before_discount: money(quote.total_before_discount),
            supplement_total: money(quote.supplement_total),
            total: money(quote.total),
            currency: quote.currency,
            nights: quote.nights,
            minimum_length_of_stay: quote.minimum_length_of_stay,
            meets_minimum_stay: quote.meets_minimum_stay,
            has_blackout_period: quote.has_blackout_period,
        }
    }
}

/// Generic pricing error response
#[derive(Debug, Serialize)]
pub struct PricingErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_serializes_amount_as_string() {
        let money = Money {
            amount: dec!(123.45),
            currency: "EUR".to_string(),
        };
        let json = serde_json::to_value(&money).unwrap();
        assert_eq!(json["amount"], "123.45");
        assert_eq!(json["currency"], "EUR");
    }

    #[test]
    fn test_quote_response_from_domain_quote() {
        let quote = StayQuote {
            currency: "EUR".to_string(),
            nights: 2,
            sub_intervals: vec![],
            total_before_discount: dec!(200),
            supplement_total: dec!(0),
            total: dec!(180),
            minimum_length_of_stay: None,
            meets_minimum_stay: true,
            has_blackout_period: false,
        };
        let response = StayQuoteResponse::from(quote);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["total"]["amount"], "180");
        assert_eq!(json["nights"], 2);
        // None minimum stay is omitted entirely.
        assert!(json.get("minimum_length_of_stay").is_none());
    }
}
