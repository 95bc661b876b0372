//! Stay segmentation.
//!
//! Partitions a stay into minimal contiguous half-open sub-intervals such
//! that the applicable rate period and offer set is constant within each.
//! Every boundary-splitting decision in the engine goes through here; a
//! per-interval discount decision can then never straddle a period or
//! offer boundary it shouldn't cross.

use chrono::NaiveDate;
use std::collections::BTreeSet;

use super::models::{Period, SpecialOffer, StaySubInterval};

/// Split `[check_in, check_out)` at every period and offer boundary.
///
/// Returns ordered, contiguous sub-intervals covering the stay exactly,
/// each with at least one night and tagged with the period containing it
/// (inclusive date containment, so a night on a period's `end_date` stays
/// with that period). Returns an empty vector when the range is empty or
/// inverted; the calculator rejects those upstream.
pub fn segment(
    check_in: NaiveDate,
    check_out: NaiveDate,
    periods: &[Period],
    offers: &[SpecialOffer],
) -> Vec<StaySubInterval> {
    if check_out <= check_in {
        return Vec::new();
    }

    // Candidate boundaries; inclusive range ends contribute the day after,
    // so half-open intervals break exactly at eligibility edges.
    let mut boundaries = BTreeSet::new();
    boundaries.insert(check_in);
    boundaries.insert(check_out);

    for period in periods {
        boundaries.insert(period.start_date);
        boundaries.insert(period.date_range().exclusive_end());
    }

    for offer in offers {
        boundaries.insert(offer.travel_date_range.start);
        boundaries.insert(offer.travel_date_range.exclusive_end());
        if let Some(window) = &offer.booking_window {
            boundaries.insert(window.start);
            boundaries.insert(window.exclusive_end());
        }
        for blackout in &offer.blackout_dates {
            boundaries.insert(blackout.start);
            boundaries.insert(blackout.exclusive_end());
        }
    }

    // Clip to the stay range.
    let boundaries: Vec<NaiveDate> = boundaries
        .into_iter()
        .filter(|b| check_in <= *b && *b <= check_out)
        .collect();

    boundaries
        .windows(2)
        .filter_map(|pair| {
            let (start, end) = (pair[0], pair[1]);
            let nights = (end - start).num_days();
            if nights <= 0 {
                return None;
            }
            Some(StaySubInterval {
                start,
                end,
                nights: nights as u32,
                period_id: periods.iter().find(|p| p.contains(start)).map(|p| p.id),
            })
        })
        .collect()
}
