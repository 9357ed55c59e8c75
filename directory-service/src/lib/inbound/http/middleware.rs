use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::inbound::http::router::AppState;

/// Extension type carrying the authenticated caller's identity through the
/// request pipeline.
#[derive(Debug, Clone)]
pub struct AuthenticatedClient {
    pub subject: String,
    pub email: Option<String>,
    pub role: String,
}

/// Maps static API keys onto roles for machine-to-machine callers.
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    api_key_roles: HashMap<String, String>,
}

impl AccessPolicy {
    pub fn new(api_key_roles: HashMap<String, String>) -> Self {
        Self { api_key_roles }
    }

    pub fn role_for_key(&self, key: &str) -> Option<&str> {
        self.api_key_roles.get(key).map(String::as_str)
    }
}

/// Middleware that authenticates the caller and stores their identity in
/// request extensions.
///
/// An `X-Api-Key` header takes precedence over bearer tokens; otherwise the
/// `Authorization` header must carry a valid, unexpired JWT.
pub async fn authorize(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    if let Some(key_header) = req.headers().get("x-api-key") {
        let key = key_header.to_str().map_err(|_| {
            unauthorized("Invalid API key")
        })?;

        let role = state.access.role_for_key(key).ok_or_else(|| {
            tracing::warn!("Rejected request with unknown API key");
            unauthorized("Invalid API key")
        })?;

        req.extensions_mut().insert(AuthenticatedClient {
            subject: "api-key".to_string(),
            email: None,
            role: role.to_string(),
        });

        return Ok(next.run(req).await);
    }

    let token = extract_token_from_header(&req)?;

    let claims = state.authenticator.decode_token(token).ok_or_else(|| {
        tracing::warn!("JWT validation failed");
        unauthorized("Invalid or expired token")
    })?;

    req.extensions_mut().insert(AuthenticatedClient {
        subject: claims.sub,
        email: Some(claims.email),
        role: claims.role,
    });

    Ok(next.run(req).await)
}

/// Middleware factory restricting a route to the given roles.
///
/// Must run after [`authorize`], which populates the [`AuthenticatedClient`]
/// extension this reads.
pub fn require_roles(
    allowed: &'static [&'static str],
) -> impl Fn(Request, Next) -> Pin<Box<dyn Future<Output = Response> + Send>> + Clone + Send {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let Some(client) = req.extensions().get::<AuthenticatedClient>() else {
                return unauthorized("Authentication required");
            };

            if !allowed.contains(&client.role.as_str()) {
                tracing::warn!(
                    subject = %client.subject,
                    role = %client.role,
                    "Rejected request from caller without a permitted role"
                );
                return (
                    StatusCode::FORBIDDEN,
                    Json(json!({
                        "error": "Insufficient role"
                    })),
                )
                    .into_response();
            }

            next.run(req).await
        })
    }
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| unauthorized("Authentication required"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| unauthorized("Invalid authorization header format"))?;

    if !auth_str.starts_with("Bearer ") {
        return Err(unauthorized("Invalid authorization header format"));
    }

    Ok(auth_str.trim_start_matches("Bearer "))
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": message
        })),
    )
        .into_response()
}
