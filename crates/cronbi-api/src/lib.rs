pub mod admin;
pub mod auth;
pub mod contact;
pub mod error;
pub mod middleware;
pub mod sessions;

use std::sync::Arc;

use axum::{
    Json, Router,
    http::{HeaderValue, Method, header},
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use cronbi_db::Database;

use crate::middleware::require_session;
use crate::sessions::{CredentialVerifier, SessionStore};

pub type AppState = Arc<AppStateInner>;

/// Everything the handlers need, injected once at startup. The concrete
/// credential source and session backing store sit behind traits.
pub struct AppStateInner {
    pub db: Database,
    pub credentials: Box<dyn CredentialVerifier>,
    pub sessions: Box<dyn SessionStore>,
}

/// Build the full application router: public contact + auth routes,
/// session-gated admin routes, CORS pinned to the front-end origin.
pub fn app(state: AppState, client_origin: HeaderValue) -> Router {
    let public_routes = Router::new()
        .route("/api/contact", post(contact::submit_contact))
        .route("/api/contact", get(contact::list_contacts))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/verify", get(auth::verify))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/health", get(health))
        .with_state(state.clone());

    let admin_routes = Router::new()
        .route("/api/admin/messages", get(admin::admin_messages))
        .route_layer(from_fn_with_state(state.clone(), require_session))
        .with_state(state);

    let cors = CorsLayer::new()
        .allow_origin(client_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true);

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

async fn health() -> impl IntoResponse {
    Json(cronbi_types::api::HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
