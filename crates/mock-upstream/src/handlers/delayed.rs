use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::state::AppState;

/// GET on any path: waits the configured delay, answers `{}`.
/// HEAD answers at once with no body; other methods are 501.
pub async fn empty_object(State(state): State<AppState>, method: Method) -> Response {
    match method {
        Method::GET => {
            state.pacer.pace('.').await;
            Json(json!({})).into_response()
        }
        Method::HEAD => StatusCode::OK.into_response(),
        _ => StatusCode::NOT_IMPLEMENTED.into_response(),
    }
}
