use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::add_resource::ResourceData;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn get_all_resources(
    State(state): State<AppState>,
    Path(domain): Path<String>,
) -> Result<ApiSuccess<Vec<ResourceData>>, ApiError> {
    let service = state
        .resources
        .get(&domain)
        .ok_or_else(|| ApiError::NotFound("Unknown resource domain".to_string()))?;

    service
        .get_all()
        .await
        .map_err(ApiError::from)
        .map(|records| {
            ApiSuccess::new(
                StatusCode::OK,
                records.iter().map(ResourceData::from).collect(),
            )
        })
}
