use std::collections::BTreeMap;

use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::resource::models::ResourceInput;
use crate::resource::models::ResourceRecord;

pub async fn add_resource(
    State(state): State<AppState>,
    Path(domain): Path<String>,
    Json(body): Json<serde_json::Map<String, Value>>,
) -> Result<ApiSuccess<ResourceData>, ApiError> {
    let service = state
        .resources
        .get(&domain)
        .ok_or_else(|| ApiError::NotFound("Unknown resource domain".to_string()))?;

    let input = ResourceInput::from_json(&body)?;
    let record = service.add(input).await.map_err(ApiError::from)?;

    // Shelter records carry "location" instead of "city"; either works as the
    // subscription match key.
    let city = record
        .fields
        .get("city")
        .or_else(|| record.fields.get("location"))
        .cloned();

    if let Some(city) = city {
        let subscriptions = state.subscriptions.clone();
        let resource = domain.clone();
        tokio::spawn(async move {
            if let Err(e) = subscriptions.notify(&resource, &city).await {
                tracing::warn!(
                    resource = %resource,
                    city = %city,
                    error = %e,
                    "Notification fan-out failed"
                );
            }
        });
    }

    Ok(ApiSuccess::new(StatusCode::CREATED, (&record).into()))
}

/// Wire form of a stored record: the id plus its fields, flattened into one
/// JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceData {
    pub id: String,
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
}

impl From<&ResourceRecord> for ResourceData {
    fn from(record: &ResourceRecord) -> Self {
        Self {
            id: record.id.to_string(),
            fields: record.fields.clone(),
        }
    }
}
