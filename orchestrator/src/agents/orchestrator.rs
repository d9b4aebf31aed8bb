// Orchestrator: runs planner -> catalog agents -> itinerary -> summarizer

use anyhow::Result;
use tracing::{debug, info, instrument};

use super::activities::ActivitiesAgent;
use super::flights_hotels::FlightsHotelsAgent;
use super::planner::PlannerAgent;
use super::summarizer::SummarizerAgent;
use crate::itinerary::build_itinerary;
use crate::memory::SharedStore;
use crate::metrics;
use crate::models::{Candidate, PlanOutcome, TripRequest, UserPreferences};

pub const DEFAULT_USER: &str = "anonymous";

pub struct TravelOrchestrator {
    planner: PlannerAgent,
    flights_hotels: FlightsHotelsAgent,
    activities: ActivitiesAgent,
    summarizer: SummarizerAgent,
    store: SharedStore,
}

impl TravelOrchestrator {
    pub fn new(store: SharedStore) -> Self {
        Self::with_agents(store, FlightsHotelsAgent::new(), ActivitiesAgent::new())
    }

    pub fn with_agents(
        store: SharedStore,
        flights_hotels: FlightsHotelsAgent,
        activities: ActivitiesAgent,
    ) -> Self {
        Self {
            planner: PlannerAgent::new(),
            flights_hotels,
            activities,
            summarizer: SummarizerAgent::new(),
            store,
        }
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// Plan a trip from a free-text prompt.
    #[instrument(skip(self))]
    pub async fn invoke(&self, prompt: &str, user_id: &str) -> Result<PlanOutcome> {
        let remembered = self.store.get(user_id).await?;
        let request = self.planner.parse(prompt, remembered.as_ref());
        self.plan_trip(&request, user_id).await
    }

    /// Plan a trip from a structured request and remember the user's preferences.
    pub async fn plan_trip(&self, request: &TripRequest, user_id: &str) -> Result<PlanOutcome> {
        info!(
            "Orchestrator: Planning trip to {} for {} (budget ${}, interests {:?})",
            request.destination, user_id, request.budget, request.interests
        );

        let preferences = UserPreferences::from(request);
        self.store.put(user_id, &preferences).await?;

        let found = self.flights_hotels.search(request);
        let activities = self.activities.search(request);
        debug!(
            "Orchestrator: candidates flights={:?} hotels={:?} activities={:?}",
            found.flights.iter().map(Candidate::id).collect::<Vec<_>>(),
            found.hotels.iter().map(Candidate::id).collect::<Vec<_>>(),
            activities.iter().map(Candidate::id).collect::<Vec<_>>()
        );

        let trip_plan = build_itinerary(request, &found.flights, &found.hotels, &activities);
        metrics::PLANS_GENERATED.inc();

        let message = self.summarizer.status_message(&trip_plan);
        let summary = self.summarizer.summarize(&trip_plan);
        info!("Orchestrator: {}", message);

        Ok(PlanOutcome {
            trip_plan,
            message,
            summary,
            user_memory: Some(preferences),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryStore;
    use std::sync::Arc;

    fn orchestrator() -> TravelOrchestrator {
        TravelOrchestrator::new(Arc::new(InMemoryStore::new()))
    }

    #[tokio::test]
    async fn default_munich_trip_costs_930() {
        let outcome = orchestrator()
            .plan_trip(&PlannerAgent::default_request(), "user_oktoberfest")
            .await
            .unwrap();

        assert_eq!(outcome.trip_plan.total_cost(), 930);
        assert_eq!(outcome.trip_plan.daily_plan.len(), 3);
        assert_eq!(
            outcome.message,
            "Generated complete trip plan for Munich, Germany (3 days). Total estimated cost: $930"
        );
        assert_eq!(
            outcome.user_memory.unwrap().last_destination,
            "Munich, Germany"
        );
    }

    #[tokio::test]
    async fn oktoberfest_prompt_books_tour_and_beer_garden() {
        let outcome = orchestrator()
            .invoke("Plan a 3-day trip to Munich for Oktoberfest", "user_oktoberfest")
            .await
            .unwrap();

        let plan = &outcome.trip_plan;
        assert_eq!(plan.request.interests, vec!["history", "beer", "Oktoberfest"]);
        let booked: Vec<&str> = plan.daily_plan[0]
            .activities
            .iter()
            .map(|booking| booking.activity_id.as_str())
            .collect();
        assert_eq!(booked, vec!["act_001", "act_002"]);
        assert_eq!(plan.total_cost(), 930);
    }

    #[tokio::test]
    async fn plan_trip_records_preferences() {
        let orchestrator = orchestrator();
        orchestrator
            .plan_trip(&PlannerAgent::default_request(), "repeat_customer")
            .await
            .unwrap();

        let stored = orchestrator.store().get("repeat_customer").await.unwrap().unwrap();
        assert_eq!(stored.budget, 800);
        assert_eq!(stored.interests, vec!["history", "beer", "Oktoberfest"]);
    }

    #[tokio::test]
    async fn invoke_reuses_remembered_interests() {
        let orchestrator = orchestrator();
        orchestrator
            .invoke("A week in Vienna for classical music", "returning")
            .await
            .unwrap();

        let outcome = orchestrator.invoke("Plan a trip to Berlin", "returning").await.unwrap();
        assert_eq!(outcome.trip_plan.request.destination, "Berlin, Germany");
        assert_eq!(outcome.trip_plan.request.interests, vec!["classical music"]);
        assert_eq!(outcome.trip_plan.activities[0].id, "act_006");
    }

    #[tokio::test]
    async fn plans_are_deterministic() {
        let orchestrator = orchestrator();
        let first = orchestrator.invoke("3-day trip to Munich", "u").await.unwrap();
        let second = orchestrator.invoke("3-day trip to Munich", "u").await.unwrap();
        assert_eq!(first.trip_plan, second.trip_plan);
    }
}
