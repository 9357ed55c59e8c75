use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::add_resource::add_resource;
use super::handlers::delete_resource::delete_resource;
use super::handlers::get_all_resources::get_all_resources;
use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::subscribe::subscribe;
use super::handlers::unsubscribe::unsubscribe;
use super::handlers::update_resource::update_resource;
use super::middleware::authorize;
use super::middleware::require_roles;
use super::middleware::AccessPolicy;
use crate::domain::account::ports::AccountServicePort;
use crate::domain::resource::ports::ResourceServicePort;
use crate::domain::subscription::ports::SubscriptionServicePort;

/// Roles allowed to delete resource records.
const DELETE_ROLES: &[&str] = &["ngo", "clinic", "government", "admin"];

/// Resolves a route's `:domain` segment to the service instance owning that
/// domain's collection.
#[derive(Default)]
pub struct ResourceRegistry {
    services: HashMap<&'static str, Arc<dyn ResourceServicePort>>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, domain: &'static str, service: Arc<dyn ResourceServicePort>) {
        self.services.insert(domain, service);
    }

    pub fn get(&self, domain: &str) -> Option<Arc<dyn ResourceServicePort>> {
        self.services.get(domain).cloned()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<dyn AccountServicePort>,
    pub resources: Arc<ResourceRegistry>,
    pub subscriptions: Arc<dyn SubscriptionServicePort>,
    pub authenticator: Arc<Authenticator>,
    pub access: Arc<AccessPolicy>,
}

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/subscriptions/subscribe", post(subscribe))
        .route("/subscriptions/unsubscribe/:id", delete(unsubscribe));

    let protected_routes = Router::new()
        .route("/resources/:domain/add", post(add_resource))
        .route("/resources/:domain/getAll", get(get_all_resources))
        .route("/resources/:domain/update", patch(update_resource))
        .route_layer(middleware::from_fn_with_state(state.clone(), authorize));

    // Layers run outside-in: authorize populates the client extension, then
    // the role check reads it.
    let gated_routes = Router::new()
        .route("/resources/:domain/delete/:id", delete(delete_resource))
        .route_layer(middleware::from_fn(require_roles(DELETE_ROLES)))
        .route_layer(middleware::from_fn_with_state(state.clone(), authorize));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(gated_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
