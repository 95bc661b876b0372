//! Request DTOs for pricing API endpoints.
//!
//! Dates are ISO-8601; the contract snapshot travels inside the request
//! so the engine never reaches for mutable shared state.

use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use super::models::{ContractSnapshot, Occupancy, SpecialOffer};

/// Request to price one stay for one room type and occupancy
#[derive(Debug, Deserialize)]
pub struct StayQuoteRequest {
    pub contract: ContractSnapshot,
    pub room_type_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub occupancy: Occupancy,
    /// Offers the booking screen selected for this stay. Mixing
    /// combinable and cumulative offers is prevented there.
    #[serde(default)]
    pub selected_offers: Vec<SpecialOffer>,
    pub booking_date: NaiveDate,
    /// Fold meal-plan supplements into the discountable base instead of
    /// adding them after discounting.
    #[serde(default)]
    pub apply_discounts_to_supplements: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_deserializes_from_minimal_json() {
        let json = serde_json::json!({
            "contract": {
                "contract_id": "7f2c1e58-6f5a-4b6e-9a3e-2b1f6d9c0a11",
                "hotel_id": "7f2c1e58-6f5a-4b6e-9a3e-2b1f6d9c0a12",
                "market_id": "7f2c1e58-6f5a-4b6e-9a3e-2b1f6d9c0a13",
                "season_id": "7f2c1e58-6f5a-4b6e-9a3e-2b1f6d9c0a14",
                "current_version": 3,
                "currency": "EUR",
                "base_meal_plan": "BB",
                "periods": [{
                    "id": "7f2c1e58-6f5a-4b6e-9a3e-2b1f6d9c0a15",
                    "season_id": "7f2c1e58-6f5a-4b6e-9a3e-2b1f6d9c0a14",
                    "start_date": "2026-06-01",
                    "end_date": "2026-08-31"
                }],
                "rates": []
            },
            "room_type_id": "7f2c1e58-6f5a-4b6e-9a3e-2b1f6d9c0a16",
            "check_in": "2026-06-10",
            "check_out": "2026-06-13",
            "occupancy": { "adults": 2 },
            "booking_date": "2026-02-01"
        });

        let req: StayQuoteRequest = serde_json::from_value(json).unwrap();
        assert_eq!(req.occupancy.adults, 2);
        assert_eq!(req.occupancy.children, 0);
        assert!(req.selected_offers.is_empty());
        assert!(!req.apply_discounts_to_supplements);
        assert_eq!(req.contract.periods.len(), 1);
        assert!(!req.contract.periods[0].is_blackout);
    }
}
