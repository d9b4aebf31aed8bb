// Summarizer Agent: status line and narrative summary for a finished plan

use tracing::info;

use crate::models::TripPlan;

pub struct SummarizerAgent;

impl SummarizerAgent {
    pub fn new() -> Self {
        Self
    }

    /// One-line status returned alongside every plan.
    pub fn status_message(&self, plan: &TripPlan) -> String {
        format!(
            "Generated complete trip plan for {} ({}). Total estimated cost: ${}",
            plan.request.destination,
            plan.duration(),
            plan.total_cost()
        )
    }

    pub fn summarize(&self, plan: &TripPlan) -> String {
        info!("Summarizer: Creating summary for {}", plan.request.destination);

        let request = &plan.request;
        let mut paragraphs = Vec::new();

        let interests = if request.interests.is_empty() {
            String::new()
        } else {
            format!(" built around {}", request.interests.join(", "))
        };
        paragraphs.push(format!(
            "Your {} trip to {} from {} to {} for {} traveler{} is ready{}.",
            plan.duration(),
            request.destination,
            request.dates.start(),
            request.dates.end(),
            request.travelers,
            if request.travelers.get() == 1 { "" } else { "s" },
            interests
        ));

        let names: Vec<&str> = plan.activities.iter().map(|a| a.name.as_str()).collect();
        let lodging = match plan.accommodation.first() {
            Some(hotel) => format!("You will stay at {}.", hotel.name),
            None => "No accommodation has been found yet.".to_string(),
        };
        if names.is_empty() {
            paragraphs.push(format!(
                "{} No activities matched your interests, so your days are open.",
                lodging
            ));
        } else {
            paragraphs.push(format!("{} Planned experiences: {}.", lodging, names.join(", ")));
        }

        let budget = request.budget.get();
        if plan.within_budget() {
            paragraphs.push(format!(
                "The estimated cost is ${} against your ${} budget, leaving ${} to spare.",
                plan.total_cost(),
                budget,
                plan.remaining_budget()
            ));
        } else {
            paragraphs.push(format!(
                "The estimated cost is ${}, which is ${} over your ${} budget.",
                plan.total_cost(),
                plan.total_cost() - u64::from(budget),
                budget
            ));
        }

        paragraphs.join("\n\n")
    }
}

impl Default for SummarizerAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::planner::PlannerAgent;
    use crate::itinerary::build_itinerary;

    #[test]
    fn status_message_matches_plan() {
        let plan = build_itinerary(&PlannerAgent::default_request(), &[], &[], &[]);
        assert_eq!(
            SummarizerAgent::new().status_message(&plan),
            "Generated complete trip plan for Munich, Germany (3 days). Total estimated cost: $0"
        );
    }

    #[test]
    fn summary_reports_budget_headroom() {
        let plan = build_itinerary(&PlannerAgent::default_request(), &[], &[], &[]);
        let summary = SummarizerAgent::new().summarize(&plan);
        assert!(summary.contains("1 traveler is ready"));
        assert!(summary.contains("No accommodation has been found yet."));
        assert!(summary.contains("leaving $800 to spare"));
    }
}
