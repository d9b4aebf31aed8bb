// Itinerary assembly: one DayPlan per calendar day plus the cost total

use crate::cost;
use crate::models::{
    Activity, ActivityBooking, DateRange, DayPlan, Flight, Hotel, TimeSlot, TripPlan, TripRequest,
};

pub const MAX_ACTIVITIES_PER_DAY: usize = 2;

/// Accommodation shown on a day when no hotel was found.
pub const NO_ACCOMMODATION: &str = "TBD";

// Used when a catalog entry carries no time slots, indexed by position in the day.
const DEFAULT_SLOTS: [TimeSlot; MAX_ACTIVITIES_PER_DAY] =
    [TimeSlot::at(10, 0), TimeSlot::at(14, 0)];

/// Build the full plan for a request from the candidates the catalog agents returned.
///
/// Pure and deterministic: identical inputs always give an identical plan.
pub fn build_itinerary(
    request: &TripRequest,
    flights: &[Flight],
    hotels: &[Hotel],
    activities: &[Activity],
) -> TripPlan {
    let daily_plan = build_days(&request.dates, hotels, activities);
    let cost = cost::aggregate(flights, hotels, &daily_plan);

    TripPlan {
        request: request.clone(),
        transportation: flights.to_vec(),
        accommodation: hotels.to_vec(),
        activities: activities.to_vec(),
        daily_plan,
        cost,
    }
}

/// Every day gets the same leading activities; there is no rotation across days.
pub fn build_days(range: &DateRange, hotels: &[Hotel], activities: &[Activity]) -> Vec<DayPlan> {
    let accommodation = hotels
        .first()
        .map(|hotel| hotel.name.clone())
        .unwrap_or_else(|| NO_ACCOMMODATION.to_string());

    let bookings: Vec<ActivityBooking> = activities
        .iter()
        .take(MAX_ACTIVITIES_PER_DAY)
        .enumerate()
        .map(|(index, activity)| book(index, activity))
        .collect();

    range
        .days()
        .map(|date| DayPlan {
            date,
            day_name: date.format("%A").to_string(),
            activities: bookings.clone(),
            accommodation: accommodation.clone(),
        })
        .collect()
}

fn book(index: usize, activity: &Activity) -> ActivityBooking {
    let time = activity
        .time_slots
        .iter()
        .min()
        .copied()
        .unwrap_or(DEFAULT_SLOTS[index]);

    ActivityBooking {
        time,
        activity_id: activity.id.clone(),
        activity: activity.name.clone(),
        location: activity.location.clone(),
        price: activity.price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interest::Interest;
    use chrono::NaiveDate;
    use std::num::NonZeroU32;

    fn request(start: &str, end: &str) -> TripRequest {
        TripRequest {
            destination: "Munich, Germany".into(),
            dates: DateRange::new(start.parse().unwrap(), end.parse().unwrap()).unwrap(),
            budget: NonZeroU32::new(800).unwrap(),
            interests: vec!["history".into(), "beer".into()],
            travelers: NonZeroU32::new(1).unwrap(),
        }
    }

    fn activity(id: &str, price: u64, slots: &[TimeSlot]) -> Activity {
        Activity {
            id: id.into(),
            name: format!("Activity {}", id),
            description: None,
            location: "Marienplatz".into(),
            time_slots: slots.to_vec(),
            price,
            rating: 4.5,
            categories: vec![Interest::History],
        }
    }

    fn flight() -> Flight {
        Flight {
            id: "flight_001".into(),
            price: 450,
            duration: "2h 30m".into(),
            departure: TimeSlot::at(10, 30),
            arrival: TimeSlot::at(13, 0),
            booking_link: None,
        }
    }

    fn hotel() -> Hotel {
        Hotel {
            id: "hotel_001".into(),
            name: "Munich City Hotel".into(),
            price: 120,
            rating: 4.2,
            check_in: None,
            check_out: None,
            booking_link: None,
        }
    }

    #[test]
    fn three_day_munich_trip_costs_930() {
        let activities = vec![activity("act_001", 25, &[]), activity("act_002", 15, &[])];
        let plan = build_itinerary(
            &request("2024-10-01", "2024-10-03"),
            &[flight()],
            &[hotel()],
            &activities,
        );

        assert_eq!(plan.daily_plan.len(), 3);
        assert_eq!(plan.total_cost(), 930);
        assert_eq!(plan.duration(), "3 days");
        assert_eq!(plan.daily_plan[0].day_name, "Tuesday");
        assert_eq!(plan.daily_plan[2].day_name, "Thursday");
        for day in &plan.daily_plan {
            assert_eq!(day.accommodation, "Munich City Hotel");
            assert_eq!(day.activities[0].time, TimeSlot::at(10, 0));
            assert_eq!(day.activities[1].time, TimeSlot::at(14, 0));
        }
    }

    #[test]
    fn single_day_without_candidates_is_free() {
        let plan = build_itinerary(&request("2024-10-01", "2024-10-01"), &[], &[], &[]);

        assert_eq!(plan.daily_plan.len(), 1);
        assert!(plan.daily_plan[0].activities.is_empty());
        assert_eq!(plan.daily_plan[0].accommodation, NO_ACCOMMODATION);
        assert_eq!(plan.total_cost(), 0);
    }

    #[test]
    fn at_most_two_activities_per_day() {
        let activities: Vec<_> = (0..5)
            .map(|i| activity(&format!("act_{}", i), 10, &[]))
            .collect();
        let days = build_days(&request("2024-12-01", "2024-12-07").dates, &[], &activities);

        assert_eq!(days.len(), 7);
        for day in &days {
            assert_eq!(day.activities.len(), MAX_ACTIVITIES_PER_DAY);
            assert_eq!(day.activities[0].activity_id, "act_0");
            assert_eq!(day.activities[1].activity_id, "act_1");
        }
    }

    #[test]
    fn earliest_supplied_slot_wins() {
        let slots = [TimeSlot::at(16, 0), TimeSlot::at(12, 0), TimeSlot::at(19, 0)];
        let days = build_days(
            &request("2024-10-01", "2024-10-01").dates,
            &[],
            &[activity("act_001", 25, &[]), activity("act_002", 15, &slots)],
        );

        assert_eq!(days[0].activities[0].time, TimeSlot::at(10, 0));
        assert_eq!(days[0].activities[1].time, TimeSlot::at(12, 0));
    }

    #[test]
    fn empty_activity_list_gives_empty_days() {
        let plan = build_itinerary(
            &request("2024-11-15", "2024-11-17"),
            &[flight()],
            &[hotel()],
            &[],
        );

        assert!(plan.daily_plan.iter().all(|day| day.activities.is_empty()));
        assert_eq!(plan.cost.activities, 0);
        assert_eq!(plan.total_cost(), 450 + 120 * 3);
    }

    #[test]
    fn day_count_matches_range_length() {
        let ranges = [
            ("2024-01-01", "2024-01-01"),
            ("2024-02-27", "2024-03-02"),
            ("2023-12-30", "2024-01-02"),
        ];
        for (start, end) in ranges {
            let req = request(start, end);
            let span = end.parse::<NaiveDate>().unwrap() - start.parse::<NaiveDate>().unwrap();
            let expected = span.num_days() + 1;
            let plan = build_itinerary(&req, &[], &[], &[]);
            assert_eq!(plan.daily_plan.len() as i64, expected);
            assert_eq!(plan.daily_plan.first().unwrap().date, req.dates.start());
            assert_eq!(plan.daily_plan.last().unwrap().date, req.dates.end());
        }
    }

    #[test]
    fn building_twice_gives_identical_plans() {
        let activities = vec![activity("act_001", 25, &[TimeSlot::at(10, 0)])];
        let req = request("2024-10-01", "2024-10-04");
        let first = build_itinerary(&req, &[flight()], &[hotel()], &activities);
        let second = build_itinerary(&req, &[flight()], &[hotel()], &activities);
        assert_eq!(first, second);
    }
}
