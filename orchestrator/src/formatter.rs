// Markdown rendering of a finished trip plan

use std::fmt::Write;

use crate::models::TripPlan;

pub fn render_markdown(plan: &TripPlan) -> String {
    let request = &plan.request;
    let mut md = String::new();

    let _ = writeln!(md, "# Trip Plan: {}\n", request.destination);

    md.push_str("## Trip Overview\n");
    let _ = writeln!(md, "- **Destination**: {}", request.destination);
    let _ = writeln!(
        md,
        "- **Dates**: {} to {} ({})",
        request.dates.start(),
        request.dates.end(),
        plan.duration()
    );
    let _ = writeln!(md, "- **Travelers**: {}", request.travelers);
    let _ = writeln!(md, "- **Budget**: ${}", request.budget);
    if !request.interests.is_empty() {
        let _ = writeln!(md, "- **Interests**: {}", request.interests.join(", "));
    }
    let _ = writeln!(md, "- **Estimated Total Cost**: ${}", plan.total_cost());
    let _ = writeln!(
        md,
        "  - Transportation ${}, lodging ${}, activities ${}",
        plan.cost.transportation, plan.cost.lodging, plan.cost.activities
    );
    if plan.within_budget() {
        let _ = writeln!(md, "  - Within budget, ${} to spare", plan.remaining_budget());
    } else {
        let _ = writeln!(
            md,
            "  - Over budget by ${}",
            plan.total_cost() - u64::from(request.budget.get())
        );
    }

    md.push_str("\n## Transportation\n");
    if plan.transportation.is_empty() {
        md.push_str("- No flights found\n");
    }
    for flight in &plan.transportation {
        let _ = writeln!(md, "- **Flight {}**: ${}, {}", flight.id, flight.price, flight.duration);
        let _ = writeln!(md, "  Departure: {} → Arrival: {}", flight.departure, flight.arrival);
        if let Some(link) = &flight.booking_link {
            let _ = writeln!(md, "  [Book Now]({})", link);
        }
        md.push('\n');
    }

    md.push_str("## Accommodation\n");
    if plan.accommodation.is_empty() {
        md.push_str("- No hotels found\n");
    }
    for hotel in &plan.accommodation {
        let _ = writeln!(
            md,
            "- **{}**: ${}/night, Rating: {:.1}/5",
            hotel.name, hotel.price, hotel.rating
        );
        if let (Some(check_in), Some(check_out)) = (hotel.check_in, hotel.check_out) {
            let _ = writeln!(md, "  Check-in: {} → Check-out: {}", check_in, check_out);
        }
        if let Some(link) = &hotel.booking_link {
            let _ = writeln!(md, "  [Book Now]({})", link);
        }
        md.push('\n');
    }

    md.push_str("## Daily Itinerary\n");
    for day in &plan.daily_plan {
        let _ = writeln!(md, "### {}, {}", day.day_name, day.date);
        let _ = writeln!(md, "**Accommodation**: {}\n", day.accommodation);
        if day.activities.is_empty() {
            md.push_str("- Free day\n\n");
        }
        for booking in &day.activities {
            let _ = writeln!(
                md,
                "- **{}**: {} (${})",
                booking.time, booking.activity, booking.price
            );
            let _ = writeln!(md, "  📍 {}\n", booking.location);
        }
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::activities::ActivitiesAgent;
    use crate::agents::flights_hotels::FlightsHotelsAgent;
    use crate::agents::planner::PlannerAgent;
    use crate::itinerary::build_itinerary;

    #[test]
    fn renders_every_section() {
        let request = PlannerAgent::default_request();
        let found = FlightsHotelsAgent::new().search(&request);
        let activities = ActivitiesAgent::new().search(&request);
        let plan = build_itinerary(&request, &found.flights, &found.hotels, &activities);

        let md = render_markdown(&plan);

        assert!(md.starts_with("# Trip Plan: Munich, Germany"));
        assert!(md.contains("- **Dates**: 2024-10-01 to 2024-10-03 (3 days)"));
        assert!(md.contains("- **Estimated Total Cost**: $930"));
        assert!(md.contains("Over budget by $130"));
        assert!(md.contains("- **Flight flight_001**: $450, 2h 30m"));
        assert!(md.contains("Departure: 10:30 → Arrival: 13:00"));
        assert!(md.contains("- **Munich City Hotel**: $120/night, Rating: 4.2/5"));
        assert!(md.contains("### Tuesday, 2024-10-01"));
        assert!(md.contains("### Thursday, 2024-10-03"));
        assert!(md.contains("- **10:00**: Marienplatz Historical Tour ($25)"));
        assert_eq!(md.matches("Hofbräu Beer Garden").count(), 3);
    }

    #[test]
    fn empty_plan_renders_placeholders() {
        let request = PlannerAgent::default_request();
        let plan = build_itinerary(&request, &[], &[], &[]);
        let md = render_markdown(&plan);

        assert!(md.contains("- No flights found"));
        assert!(md.contains("- No hotels found"));
        assert!(md.contains("**Accommodation**: TBD"));
        assert!(md.contains("Within budget, $800 to spare"));
    }
}
