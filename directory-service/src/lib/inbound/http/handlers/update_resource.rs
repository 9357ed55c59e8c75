use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;

use super::add_resource::ResourceData;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::resource::models::ResourceInput;

pub async fn update_resource(
    State(state): State<AppState>,
    Path(domain): Path<String>,
    Json(body): Json<serde_json::Map<String, Value>>,
) -> Result<ApiSuccess<ResourceData>, ApiError> {
    let service = state
        .resources
        .get(&domain)
        .ok_or_else(|| ApiError::NotFound("Unknown resource domain".to_string()))?;

    let input = ResourceInput::from_json(&body)?;

    service
        .update(input)
        .await
        .map_err(ApiError::from)
        .map(|ref record| ApiSuccess::new(StatusCode::OK, record.into()))
}
