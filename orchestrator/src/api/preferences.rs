use std::sync::Arc;

use tracing::info;
use warp::{Rejection, Reply};

use crate::agents::orchestrator::TravelOrchestrator;
use crate::error::ApiError;

pub async fn handle_get(
    user_id: String,
    orchestrator: Arc<TravelOrchestrator>,
) -> Result<impl Reply, Rejection> {
    info!("Fetching preferences for {}", user_id);

    match orchestrator.store().get(&user_id).await {
        Ok(Some(preferences)) => Ok(warp::reply::json(&preferences)),
        Ok(None) => Err(warp::reject::custom(ApiError::NotFound(format!(
            "preferences for {}",
            user_id
        )))),
        Err(e) => Err(warp::reject::custom(ApiError::StoreError(e))),
    }
}

pub async fn handle_delete(
    user_id: String,
    orchestrator: Arc<TravelOrchestrator>,
) -> Result<impl Reply, Rejection> {
    info!("Forgetting preferences for {}", user_id);

    orchestrator
        .store()
        .delete(&user_id)
        .await
        .map_err(|e| warp::reject::custom(ApiError::StoreError(e)))?;

    Ok(warp::reply::json(&serde_json::json!({"status": "deleted"})))
}
