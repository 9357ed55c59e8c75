use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::subscription::errors::ContactError;
use crate::subscription::models::Contact;
use crate::subscription::models::SubscribeCommand;

pub async fn subscribe(
    State(state): State<AppState>,
    Json(body): Json<SubscribeRequest>,
) -> Result<ApiSuccess<SubscribeResponseData>, ApiError> {
    state
        .subscriptions
        .subscribe(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|subscription| {
            ApiSuccess::new(
                StatusCode::CREATED,
                SubscribeResponseData {
                    id: subscription.id.to_string(),
                },
            )
        })
}

/// HTTP request body for subscribing to a resource/city pair (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubscribeRequest {
    resource: String,
    city: String,
    contact: String,
}

#[derive(Debug, Clone, Error)]
enum ParseSubscribeRequestError {
    #[error("Invalid contact: {0}")]
    Contact(#[from] ContactError),
}

impl SubscribeRequest {
    fn try_into_command(self) -> Result<SubscribeCommand, ParseSubscribeRequestError> {
        let contact = Contact::parse(&self.contact)?;
        Ok(SubscribeCommand {
            resource: self.resource,
            city: self.city,
            contact,
        })
    }
}

impl From<ParseSubscribeRequestError> for ApiError {
    fn from(err: ParseSubscribeRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscribeResponseData {
    pub id: String,
}
