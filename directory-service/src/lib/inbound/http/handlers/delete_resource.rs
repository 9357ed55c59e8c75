use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::resource::models::DocumentId;

pub async fn delete_resource(
    State(state): State<AppState>,
    Path((domain, id)): Path<(String, String)>,
) -> Result<ApiSuccess<()>, ApiError> {
    let service = state
        .resources
        .get(&domain)
        .ok_or_else(|| ApiError::NotFound("Unknown resource domain".to_string()))?;

    let id = DocumentId::from_string(&id)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    service
        .delete(&id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, ()))
}
