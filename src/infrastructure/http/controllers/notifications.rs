use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{AggregatedItem, Notification};
use crate::infrastructure::http::middleware::{ApiError, ApiResult, AppState};
use crate::infrastructure::observability::{
    AGGREGATION_FAILURES, GROUPS_EMITTED, NOTIFICATIONS_AGGREGATED,
};

// Response DTOs
#[derive(Debug, Serialize, Deserialize)]
pub struct GroupedNotificationsResponse {
    pub items: Vec<AggregatedItem>,
    pub total: usize,
    pub groups: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

/// Fold a page of raw notifications into grouped entries
/// POST /api/notifications/group
pub async fn group_notifications(
    State(state): State<AppState>,
    payload: Result<Json<Vec<Notification>>, JsonRejection>,
) -> ApiResult<Json<GroupedNotificationsResponse>> {
    let Json(notifications) = payload.map_err(|rejection| {
        tracing::warn!("Rejected notification batch: {}", rejection.body_text());
        ApiError::BadRequest(rejection.body_text())
    })?;

    if notifications.len() > state.max_batch_size {
        return Err(ApiError::PayloadTooLarge(format!(
            "Batch of {} notifications exceeds the limit of {}",
            notifications.len(),
            state.max_batch_size
        )));
    }

    let items = state.aggregator.group(&notifications).map_err(|e| {
        tracing::warn!("Failed to group {} notifications: {}", notifications.len(), e);
        metrics::counter!(AGGREGATION_FAILURES).increment(1);
        ApiError::from(e)
    })?;

    let groups = items.iter().filter(|item| item.is_grouped()).count();
    metrics::counter!(NOTIFICATIONS_AGGREGATED).increment(notifications.len() as u64);
    metrics::counter!(GROUPS_EMITTED).increment(groups as u64);

    tracing::info!(
        "Grouped {} notifications into {} items ({} groups)",
        notifications.len(),
        items.len(),
        groups
    );

    Ok(Json(GroupedNotificationsResponse {
        total: items.len(),
        groups,
        items,
    }))
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: state.config.service_name.clone(),
    })
}
