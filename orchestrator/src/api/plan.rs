use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::Value;
use tracing::{error, info};
use uuid::Uuid;
use warp::http::header::CONTENT_TYPE;
use warp::reply::Response;
use warp::{Rejection, Reply};

use crate::agents::orchestrator::{TravelOrchestrator, DEFAULT_USER};
use crate::error::ApiError;
use crate::formatter::render_markdown;
use crate::metrics;
use crate::models::{DateRange, PlanQuery, PlanRequest, PromptRequest};

/// Decode a plan body, reporting date range problems as plan errors rather than JSON errors.
pub async fn decode_plan_body(body: Value) -> Result<PlanRequest, Rejection> {
    decode_plan_request(body).map_err(warp::reject::custom)
}

fn decode_plan_request(body: Value) -> Result<PlanRequest, ApiError> {
    let request = &body["request"];
    let date = |field: &str| {
        request[field]
            .as_str()
            .and_then(|s| s.parse::<NaiveDate>().ok())
    };
    if let (Some(start), Some(end)) = (date("start_date"), date("end_date")) {
        DateRange::new(start, end)?;
    }

    serde_json::from_value(body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid plan request: {}", e)))
}

pub async fn handle_plan(
    query: PlanQuery,
    body: PlanRequest,
    orchestrator: Arc<TravelOrchestrator>,
) -> Result<Response, Rejection> {
    let markdown = match query.format.as_deref() {
        None | Some("json") => false,
        Some("markdown") | Some("md") => true,
        Some(other) => {
            return Err(warp::reject::custom(ApiError::BadRequest(format!(
                "Unsupported format: {}",
                other
            ))))
        }
    };

    let request_id = Uuid::new_v4();
    let user_id = body.user_id.as_deref().unwrap_or(DEFAULT_USER);
    info!("[{}] Planning structured request for {}", request_id, user_id);

    let outcome = orchestrator
        .plan_trip(&body.request, user_id)
        .await
        .map_err(|e| {
            error!("[{}] Failed to plan trip: {}", request_id, e);
            metrics::PLAN_FAILURES.inc();
            warp::reject::custom(ApiError::StoreError(e))
        })?;

    if markdown {
        Ok(warp::reply::with_header(
            render_markdown(&outcome.trip_plan),
            CONTENT_TYPE,
            "text/markdown; charset=utf-8",
        )
        .into_response())
    } else {
        Ok(warp::reply::json(&outcome).into_response())
    }
}

pub async fn handle_invoke(
    body: PromptRequest,
    orchestrator: Arc<TravelOrchestrator>,
) -> Result<impl Reply, Rejection> {
    if body.prompt.trim().is_empty() {
        return Err(warp::reject::custom(ApiError::BadRequest(
            "No prompt provided".to_string(),
        )));
    }

    let request_id = Uuid::new_v4();
    let user_id = body.user_id.as_deref().unwrap_or(DEFAULT_USER);
    info!("[{}] Planning prompt request for {}", request_id, user_id);
    let outcome = orchestrator
        .invoke(&body.prompt, user_id)
        .await
        .map_err(|e| {
            error!("[{}] Failed to plan trip from prompt: {}", request_id, e);
            metrics::PLAN_FAILURES.inc();
            warp::reject::custom(ApiError::StoreError(e))
        })?;

    Ok(warp::reply::json(&outcome))
}
