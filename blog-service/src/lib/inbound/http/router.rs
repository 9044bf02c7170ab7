use std::sync::Arc;
use std::time::Duration;

use auth::SessionService;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::posts::create_post::create_post;
use super::handlers::posts::delete_post::delete_post;
use super::handlers::posts::get_post::get_post;
use super::handlers::posts::list_posts::list_posts;
use super::handlers::posts::update_post::update_post;
use super::handlers::users::get_profile::get_profile;
use super::handlers::users::login::login;
use super::handlers::users::register::register;
use super::handlers::ApiError;
use crate::domain::post::ports::PostServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserServicePort>,
    pub posts: Arc<dyn PostServicePort>,
    pub sessions: Arc<SessionService>,
}

/// Build the application router.
///
/// Authentication is declared per handler through the `AuthenticatedUser`
/// extractor; registration, login, and post reads are public.
pub fn create_router(
    users: Arc<dyn UserServicePort>,
    posts: Arc<dyn PostServicePort>,
    sessions: Arc<SessionService>,
) -> Router {
    let state = AppState {
        users,
        posts,
        sessions,
    };

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
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
        .route("/api/users/register", post(register))
        .route("/api/users/login", post(login))
        .route("/api/users/profile", get(get_profile))
        .route("/api/posts", get(list_posts).post(create_post))
        .route(
            "/api/posts/:id",
            get(get_post).put(update_post).delete(delete_post),
        )
        .fallback(unmatched_route)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn unmatched_route() -> ApiError {
    ApiError::NotFound("Resource not found".to_string())
}
