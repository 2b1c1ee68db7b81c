//! Canned `/api` routes. Every handler paces first, then answers.

use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};

use crate::models::{StatusBody, TransactionBody};
use crate::state::AppState;
use crate::utils::ApiError;

pub async fn serve_fixture(state: &AppState, uri: &Uri) -> Result<Response, ApiError> {
    let path = uri.path();
    match state.fixtures.read(path).await? {
        Some(fixture) => Ok(([(CONTENT_TYPE, fixture.content_type)], fixture.body).into_response()),
        None => {
            state.metrics.inc_fixture_miss();
            Err(ApiError::FixtureMissing(path.to_string()))
        }
    }
}

/// GET /api/users.json
pub async fn list_users(State(state): State<AppState>, uri: Uri) -> Result<Response, ApiError> {
    state.pacer.pace('U').await;
    serve_fixture(&state, &uri).await
}

/// GET /api/users/{id}
pub async fn show_user(State(state): State<AppState>, uri: Uri) -> Result<Response, ApiError> {
    state.pacer.pace('u').await;
    serve_fixture(&state, &uri).await
}

/// GET /api/organizations
pub async fn list_organizations(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Response, ApiError> {
    state.pacer.pace('O').await;
    serve_fixture(&state, &uri).await
}

/// GET /api/account
pub async fn show_account(State(state): State<AppState>, uri: Uri) -> Result<Response, ApiError> {
    state.pacer.pace('A').await;
    serve_fixture(&state, &uri).await
}

/// Fallback: any other `GET /api/...` path is looked up as a fixture.
pub async fn any_fixture(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> Result<Response, ApiError> {
    if method != Method::GET || !uri.path().starts_with("/api/") {
        return Ok(StatusCode::NOT_FOUND.into_response());
    }
    state.pacer.pace('.').await;
    serve_fixture(&state, &uri).await
}

/// GET /api/comments
pub async fn list_comments(State(state): State<AppState>) -> Json<StatusBody> {
    state.pacer.pace('C').await;
    Json(StatusBody::OK)
}

/// POST /api/users - fails roughly once every `flaky.one_in` calls
pub async fn create_user(State(state): State<AppState>) -> Result<Json<StatusBody>, ApiError> {
    state.pacer.pace('P').await;
    if state.failures.roll() {
        state.metrics.inc_simulated_failure();
        return Err(ApiError::SimulatedFailure);
    }
    Ok(Json(StatusBody::OK))
}

/// PUT /api/users/{id}
pub async fn update_user(State(state): State<AppState>) -> Json<StatusBody> {
    state.pacer.pace('W').await;
    Json(StatusBody::OK)
}

/// DELETE /api/users/{id}
pub async fn delete_user(State(state): State<AppState>) -> Json<StatusBody> {
    state.pacer.pace('D').await;
    Json(StatusBody::OK)
}

/// POST /api/transactions
pub async fn create_transaction(
    State(state): State<AppState>,
    body: Result<TransactionBody, ApiError>,
) -> Result<Json<StatusBody>, ApiError> {
    state.pacer.pace('T').await;
    let body = body?;
    match body.concatenated() {
        Some(sum) if body.is_valid() => {
            tracing::debug!("Accepted transaction {}", sum);
            Ok(Json(StatusBody::OK))
        }
        Some(sum) => Err(ApiError::InvalidTransaction(format!(
            "a + b = {:?}, expected {:?}",
            sum,
            crate::models::transaction::EXPECTED_SUM
        ))),
        None => Err(ApiError::InvalidTransaction(
            "fields a and b must both be present".to_string(),
        )),
    }
}
