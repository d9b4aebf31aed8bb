use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use travel_orchestrator::agent_cli::AgentCli;
use travel_orchestrator::api;
use travel_orchestrator::error::handle_rejection;
use travel_orchestrator::memory::InMemoryStore;
use travel_orchestrator::TravelOrchestrator;
use warp::http::StatusCode;
use warp::{Filter, Reply};

fn app_with_cli(
    agent_cli: AgentCli,
) -> impl Filter<Extract = impl Reply, Error = std::convert::Infallible> + Clone {
    let orchestrator = Arc::new(TravelOrchestrator::new(Arc::new(InMemoryStore::new())));
    api::health()
        .or(api::routes(orchestrator, Arc::new(agent_cli)))
        .recover(handle_rejection)
}

fn app() -> impl Filter<Extract = impl Reply, Error = std::convert::Infallible> + Clone {
    app_with_cli(AgentCli::new(
        "definitely-not-an-agent-cli",
        vec![],
        Duration::from_secs(5),
    ))
}

fn sh_cli(script: &str, timeout: Duration) -> AgentCli {
    AgentCli::new("sh", vec!["-c".into(), script.into(), "sh".into()], timeout)
}

fn body_json(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap()
}

fn munich_request() -> Value {
    json!({
        "user_id": "user_oktoberfest",
        "request": {
            "destination": "Munich, Germany",
            "start_date": "2024-10-01",
            "end_date": "2024-10-03",
            "budget": 800,
            "interests": ["history", "beer", "Oktoberfest"],
            "travelers": 1
        }
    })
}

#[tokio::test]
async fn health_reports_healthy() {
    let res = warp::test::request().path("/health").reply(&app()).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res.body())["status"], "healthy");
}

#[tokio::test]
async fn structured_plan_returns_930_total() {
    let res = warp::test::request()
        .method("POST")
        .path("/api/v1/plan")
        .json(&munich_request())
        .reply(&app())
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res.body());
    let plan = &body["trip_plan"];
    assert_eq!(plan["cost"]["total"], 930);
    assert_eq!(plan["daily_plan"].as_array().unwrap().len(), 3);
    assert_eq!(plan["daily_plan"][0]["day_name"], "Tuesday");
    assert_eq!(plan["daily_plan"][0]["accommodation"], "Munich City Hotel");
    assert_eq!(plan["daily_plan"][0]["activities"][0]["time"], "10:00");
    assert_eq!(plan["daily_plan"][0]["activities"][1]["time"], "12:00");
    assert_eq!(
        body["message"],
        "Generated complete trip plan for Munich, Germany (3 days). Total estimated cost: $930"
    );
    assert_eq!(body["user_memory"]["last_destination"], "Munich, Germany");
}

#[tokio::test]
async fn structured_plan_renders_markdown() {
    let res = warp::test::request()
        .method("POST")
        .path("/api/v1/plan?format=markdown")
        .json(&munich_request())
        .reply(&app())
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/markdown"));
    let text = String::from_utf8(res.body().to_vec()).unwrap();
    assert!(text.starts_with("# Trip Plan: Munich, Germany"));
}

#[tokio::test]
async fn unknown_format_is_rejected() {
    let res = warp::test::request()
        .method("POST")
        .path("/api/v1/plan?format=pdf")
        .json(&munich_request())
        .reply(&app())
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn inverted_dates_are_a_bad_request() {
    let mut body = munich_request();
    body["request"]["start_date"] = json!("2024-10-05");

    let res = warp::test::request()
        .method("POST")
        .path("/api/v1/plan")
        .json(&body)
        .reply(&app())
        .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = body_json(res.body());
    assert_eq!(body["error"], "Invalid trip request");
    assert!(body["details"].as_str().unwrap().contains("precedes start date"));
}

#[tokio::test]
async fn overlong_date_range_is_a_bad_request() {
    let mut body = munich_request();
    body["request"]["start_date"] = json!("0001-01-01");
    body["request"]["end_date"] = json!("9999-12-31");

    let res = warp::test::request()
        .method("POST")
        .path("/api/v1/plan")
        .json(&body)
        .reply(&app())
        .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = body_json(res.body());
    assert_eq!(body["error"], "Invalid trip request");
    assert!(body["details"]
        .as_str()
        .unwrap()
        .contains("exceeds the maximum of 366"));
}

#[tokio::test]
async fn year_long_trip_is_accepted() {
    let mut body = munich_request();
    body["request"]["start_date"] = json!("2024-01-01");
    body["request"]["end_date"] = json!("2024-12-31");

    let res = warp::test::request()
        .method("POST")
        .path("/api/v1/plan")
        .json(&body)
        .reply(&app())
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res.body());
    assert_eq!(body["trip_plan"]["daily_plan"].as_array().unwrap().len(), 366);
}

#[tokio::test]
async fn invoke_then_read_and_forget_preferences() {
    let app = app();

    let res = warp::test::request()
        .method("POST")
        .path("/api/v1/invoke")
        .json(&json!({"prompt": "Plan a 2-day trip to Berlin for museums", "user_id": "u42"}))
        .reply(&app)
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res.body());
    assert_eq!(body["trip_plan"]["request"]["destination"], "Berlin, Germany");
    assert_eq!(body["trip_plan"]["daily_plan"].as_array().unwrap().len(), 2);

    let res = warp::test::request()
        .path("/api/v1/preferences/u42")
        .reply(&app)
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res.body())["interests"], json!(["museums"]));

    let res = warp::test::request()
        .method("DELETE")
        .path("/api/v1/preferences/u42")
        .reply(&app)
        .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = warp::test::request()
        .path("/api/v1/preferences/u42")
        .reply(&app)
        .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn empty_prompt_is_rejected() {
    for path in ["/api/v1/invoke", "/api/generate-plan"] {
        let res = warp::test::request()
            .method("POST")
            .path(path)
            .json(&json!({"prompt": "   "}))
            .reply(&app())
            .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(res.body())["error"], "No prompt provided");
    }
}

#[tokio::test]
async fn malformed_body_is_a_bad_request() {
    let res = warp::test::request()
        .method("POST")
        .path("/api/generate-plan")
        .header("content-type", "application/json")
        .body("{not json")
        .reply(&app())
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn generate_plan_extracts_decorated_cli_output() {
    let cli = sh_cli(
        concat!(
            "echo 'Session: d60cac61'; ",
            "printf 'Response:\\n{\"status\": \"success\", \"echo\": %s}\\n' \"$1\""
        ),
        Duration::from_secs(10),
    );
    let res = warp::test::request()
        .method("POST")
        .path("/api/generate-plan")
        .json(&json!({"prompt": "Plan a trip to Munich"}))
        .reply(&app_with_cli(cli))
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res.body());
    assert_eq!(body["status"], "success");
    assert_eq!(body["echo"]["prompt"], "Plan a trip to Munich");
}

#[tokio::test]
async fn generate_plan_maps_cli_failures() {
    let res = warp::test::request()
        .method("POST")
        .path("/api/generate-plan")
        .json(&json!({"prompt": "Plan a trip"}))
        .reply(&app())
        .await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_json(res.body())["error"]
        .as_str()
        .unwrap()
        .contains("command not found"));

    let slow = sh_cli("sleep 5", Duration::from_millis(200));
    let res = warp::test::request()
        .method("POST")
        .path("/api/generate-plan")
        .json(&json!({"prompt": "Plan a trip"}))
        .reply(&app_with_cli(slow))
        .await;
    assert_eq!(res.status(), StatusCode::GATEWAY_TIMEOUT);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let res = warp::test::request().path("/api/v1/nowhere").reply(&app()).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn metrics_expose_agent_cli_outcomes() {
    let res = warp::test::request()
        .method("POST")
        .path("/api/generate-plan")
        .json(&json!({"prompt": "Plan a trip"}))
        .reply(&app())
        .await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let res = warp::test::request()
        .path("/metrics")
        .reply(&api::prometheus_metrics())
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let text = String::from_utf8(res.body().to_vec()).unwrap();
    assert!(text.contains("travel_agent_cli_invocations_total{outcome=\"not_found\"}"));
}
