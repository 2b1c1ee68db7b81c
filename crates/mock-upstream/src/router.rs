use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::{DefaultMakeSpan, TraceLayer};
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::{SessionConfig, Variant};
use crate::handlers::{api, delayed, health, session};
use crate::middleware::track_requests;
use crate::state::AppState;

/// Builds the HTTP/1 application for the variant held in `state`.
pub fn build_router(state: AppState) -> Router {
    let routes = match state.variant {
        Variant::Session => session_routes(),
        Variant::Api => session_routes()
            .merge(api_routes())
            .fallback(api::any_fixture),
        Variant::Delayed => Router::new().fallback(delayed::empty_object),
    };

    Router::new()
        .route("/health", get(health::health_check))
        .merge(routes)
        .layer(middleware::from_fn_with_state(
            state.metrics.clone(),
            track_requests,
        ))
        .layer(session_layer(&state.settings.session))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .with_state(state)
}

fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(session::root).delete(session::reset))
        .route("/login", get(session::login))
        .route("/counter", get(session::counter))
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/users.json", get(api::list_users))
        .route("/api/users", post(api::create_user))
        .route(
            "/api/users/{id}",
            get(api::show_user)
                .put(api::update_user)
                .delete(api::delete_user),
        )
        .route("/api/organizations", get(api::list_organizations))
        .route("/api/account", get(api::show_account))
        .route("/api/comments", get(api::list_comments))
        .route("/api/transactions", post(api::create_transaction))
}

/// In-memory session store; the cookie is only sent once a handler writes.
pub fn session_layer(cfg: &SessionConfig) -> SessionManagerLayer<MemoryStore> {
    let layer = SessionManagerLayer::new(MemoryStore::default())
        .with_name(cfg.cookie_name.clone())
        .with_secure(false)
        .with_http_only(true);

    match cfg.idle_timeout_secs {
        Some(secs) => layer.with_expiry(Expiry::OnInactivity(time::Duration::seconds(
            i64::from(secs),
        ))),
        None => layer,
    }
}
