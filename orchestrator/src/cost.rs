// Cost aggregation across the generated schedule

use crate::models::{Candidate, CostBreakdown, DayPlan, Flight, Hotel};

pub fn sum_prices<C: Candidate>(candidates: &[C]) -> u64 {
    candidates
        .iter()
        .map(Candidate::price)
        .fold(0, u64::saturating_add)
}

/// Total trip cost.
///
/// Hotel prices are nightly and are multiplied by the number of itinerary
/// days, not nights, so a 3-day range is billed three hotel nights.
/// Every term saturates at `u64::MAX` instead of overflowing.
pub fn aggregate(flights: &[Flight], hotels: &[Hotel], days: &[DayPlan]) -> CostBreakdown {
    let transportation = sum_prices(flights);
    let lodging = sum_prices(hotels).saturating_mul(days.len() as u64);
    let activities = days
        .iter()
        .flat_map(|day| day.activities.iter())
        .map(|booking| booking.price)
        .fold(0, u64::saturating_add);

    CostBreakdown {
        transportation,
        lodging,
        activities,
        total: transportation
            .saturating_add(lodging)
            .saturating_add(activities),
    }
}
