pub mod activities;
pub mod flights_hotels;
pub mod orchestrator;
pub mod planner;
pub mod summarizer;
