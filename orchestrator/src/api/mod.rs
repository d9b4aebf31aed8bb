use std::path::PathBuf;
use std::sync::Arc;

use warp::{Filter, Rejection, Reply};

use crate::agent_cli::AgentCli;
use crate::agents::orchestrator::TravelOrchestrator;
use crate::metrics;

mod generate;
mod plan;
mod preferences;

pub const UI_PAGE: &str = "travel_planner_ui.html";

pub fn routes(
    orchestrator: Arc<TravelOrchestrator>,
    agent_cli: Arc<AgentCli>,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    let api = warp::path("api").and(warp::path("v1"));

    let plan_route = api
        .and(warp::path("plan"))
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::query())
        .and(warp::body::json().and_then(plan::decode_plan_body))
        .and(with_orchestrator(orchestrator.clone()))
        .and_then(plan::handle_plan);

    let invoke_route = api
        .and(warp::path("invoke"))
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(with_orchestrator(orchestrator.clone()))
        .and_then(plan::handle_invoke);

    let get_preferences_route = api
        .and(warp::path("preferences"))
        .and(warp::path::param())
        .and(warp::path::end())
        .and(warp::get())
        .and(with_orchestrator(orchestrator.clone()))
        .and_then(preferences::handle_get);

    let delete_preferences_route = api
        .and(warp::path("preferences"))
        .and(warp::path::param())
        .and(warp::path::end())
        .and(warp::delete())
        .and(with_orchestrator(orchestrator))
        .and_then(preferences::handle_delete);

    let generate_route = warp::path("api")
        .and(warp::path("generate-plan"))
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(with_agent_cli(agent_cli))
        .and_then(generate::handle_generate_plan);

    plan_route
        .or(invoke_route)
        .or(get_preferences_route)
        .or(delete_preferences_route)
        .or(generate_route)
}

pub fn health() -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::json(&serde_json::json!({"status": "healthy"})))
}

pub fn prometheus_metrics() -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path("metrics").and(warp::get()).map(|| {
        let (buffer, content_type) = metrics::render();
        warp::reply::with_header(buffer, "Content-Type", content_type)
    })
}

/// `/` serves the planner page; other paths fall through to the static directory.
pub fn ui(static_dir: PathBuf) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    let index = warp::path::end()
        .and(warp::get())
        .and(warp::fs::file(static_dir.join(UI_PAGE)));

    index.or(warp::fs::dir(static_dir))
}

fn with_orchestrator(
    orchestrator: Arc<TravelOrchestrator>,
) -> impl Filter<Extract = (Arc<TravelOrchestrator>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || orchestrator.clone())
}

fn with_agent_cli(
    agent_cli: Arc<AgentCli>,
) -> impl Filter<Extract = (Arc<AgentCli>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || agent_cli.clone())
}
