//! Cookie session counter routes (`/login`, `/counter`, `/`).

use axum::{
    extract::{rejection::QueryRejection, Query},
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::debug;

use crate::models::{CounterBody, StatusBody};
use crate::utils::ApiError;

pub const COUNTER_KEY: &str = "counter";
pub const VALID_USER: &str = "example";
pub const VALID_PASSWORD: &str = "3x4mpl3";

#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    pub user: Option<String>,
    pub password: Option<String>,
}

impl LoginQuery {
    pub fn is_valid(&self) -> bool {
        self.user.as_deref() == Some(VALID_USER) && self.password.as_deref() == Some(VALID_PASSWORD)
    }
}

/// Login handler - GET /login?user=..&password=..
pub async fn login(
    session: Session,
    query: Result<Query<LoginQuery>, QueryRejection>,
) -> Result<&'static str, ApiError> {
    let credentials = query.map(|Query(q)| q).unwrap_or_default();
    if !credentials.is_valid() {
        return Err(ApiError::Forbidden(format!(
            "bad credentials for user {:?}",
            credentials.user
        )));
    }

    session.insert(COUNTER_KEY, 1_u64).await?;
    debug!("Session counter initialised");
    Ok("Welcome!")
}

/// Counter handler - GET /counter
pub async fn counter(session: Session) -> Result<Json<CounterBody>, ApiError> {
    let current = session
        .get::<u64>(COUNTER_KEY)
        .await?
        .filter(|c| *c > 0)
        .ok_or_else(|| ApiError::Forbidden("no session counter".to_string()))?;

    let next = current.saturating_add(1);
    session.insert(COUNTER_KEY, next).await?;
    Ok(Json(CounterBody { counter: next }))
}

/// Reset handler - DELETE /
pub async fn reset(session: Session) -> Result<Json<CounterBody>, ApiError> {
    session.insert(COUNTER_KEY, 1_u64).await?;
    Ok(Json(CounterBody { counter: 1 }))
}

/// Root handler - GET /
pub async fn root() -> Json<StatusBody> {
    Json(StatusBody::ROOT)
}
