use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::subscription::models::SubscriptionId;

pub async fn unsubscribe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let id = SubscriptionId::from_string(&id)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .subscriptions
        .unsubscribe(&id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, ()))
}
