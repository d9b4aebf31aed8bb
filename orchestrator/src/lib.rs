//! Travel planning service: a mock multi-agent pipeline behind one orchestrator.
//!
//! The core is [`itinerary::build_itinerary`], a pure function turning
//! candidate flights, hotels and activities plus a date range into a
//! day-by-day [`models::TripPlan`] with an aggregated cost.

pub mod agent_cli;
pub mod agents;
pub mod api;
pub mod config;
pub mod cost;
pub mod error;
pub mod formatter;
pub mod interest;
pub mod itinerary;
pub mod memory;
pub mod metrics;
pub mod middleware;
pub mod models;

pub use agents::orchestrator::TravelOrchestrator;
pub use error::{ApiError, PlanError};
pub use itinerary::build_itinerary;
pub use models::{DayPlan, TripPlan, TripRequest};
