use chrono::NaiveDate;
use std::convert::Infallible;
use thiserror::Error;
use warp::http::StatusCode;
use warp::{reject::Reject, Rejection, Reply};

use crate::agent_cli::AgentCliError;

/// Errors raised while assembling a plan.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("Invalid date range: end date {end} precedes start date {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid date range: {days} days exceeds the maximum of {max}")]
    RangeTooLong { days: i64, max: u32 },
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Preference store error: {0}")]
    StoreError(#[from] anyhow::Error),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error(transparent)]
    AgentError(#[from] AgentCliError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl Reject for ApiError {}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Plan(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::AgentError(AgentCliError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::BadRequest(msg) => msg.clone(),
            ApiError::NotFound(_) => "Resource not found".to_string(),
            ApiError::Plan(_) => "Invalid trip request".to_string(),
            ApiError::AgentError(err) => err.to_string(),
            _ => "Internal server error".to_string(),
        }
    }
}

pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (code, message, details) = if let Some(api_err) = err.find::<ApiError>() {
        (api_err.status(), api_err.message(), api_err.to_string())
    } else if let Some(body_err) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (
            StatusCode::BAD_REQUEST,
            "Invalid JSON in request".to_string(),
            body_err.to_string(),
        )
    } else if err.is_not_found() {
        (
            StatusCode::NOT_FOUND,
            "Resource not found".to_string(),
            "no route matched".to_string(),
        )
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            "Method not allowed".to_string(),
            format!("{:?}", err),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".to_string(),
            format!("{:?}", err),
        )
    };

    let json = warp::reply::json(&serde_json::json!({
        "error": message,
        "details": details,
    }));

    Ok(warp::reply::with_status(json, code))
}
