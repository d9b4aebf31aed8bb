use std::sync::Arc;

use tracing::error;
use warp::{Rejection, Reply};

use crate::agent_cli::AgentCli;
use crate::error::ApiError;
use crate::metrics;
use crate::models::PromptRequest;

pub async fn handle_generate_plan(
    body: PromptRequest,
    agent_cli: Arc<AgentCli>,
) -> Result<impl Reply, Rejection> {
    if body.prompt.trim().is_empty() {
        return Err(warp::reject::custom(ApiError::BadRequest(
            "No prompt provided".to_string(),
        )));
    }

    match agent_cli.invoke(&body.prompt).await {
        Ok(response) => Ok(warp::reply::json(&response)),
        Err(e) => {
            error!("Agent CLI failed: {}", e);
            metrics::PLAN_FAILURES.inc();
            Err(warp::reject::custom(ApiError::AgentError(e)))
        }
    }
}
