use axum::{
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

use crate::utils::ApiError;

/// The only `a` + `b` concatenation the transactions endpoint accepts.
pub const EXPECTED_SUM: &str = "123";

/// Body of `POST /api/transactions`, accepted as JSON or as a urlencoded form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionBody {
    #[serde(default)]
    pub a: Option<Value>,
    #[serde(default)]
    pub b: Option<Value>,
}

impl TransactionBody {
    pub fn new(a: impl Into<Value>, b: impl Into<Value>) -> Self {
        Self {
            a: Some(a.into()),
            b: Some(b.into()),
        }
    }

    /// `a` and `b` rendered as text and joined. `None` when either is
    /// missing or is not a scalar.
    pub fn concatenated(&self) -> Option<String> {
        let a = fragment(self.a.as_ref()?)?;
        let b = fragment(self.b.as_ref()?)?;
        Some(a + &b)
    }

    pub fn is_valid(&self) -> bool {
        self.concatenated().as_deref() == Some(EXPECTED_SUM)
    }
}

fn fragment(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

impl<S> FromRequest<S> for TransactionBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("application/json") {
            let Json(body) = Json::<TransactionBody>::from_request(req, state)
                .await
                .map_err(|e| ApiError::InvalidTransaction(e.body_text()))?;
            Ok(body)
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(mut fields) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| ApiError::InvalidTransaction(e.body_text()))?;
            Ok(Self {
                a: fields.remove("a").map(Value::String),
                b: fields.remove("b").map(Value::String),
            })
        } else {
            Err(ApiError::InvalidTransaction(format!(
                "unsupported content type '{}'",
                content_type
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_fields_concatenate() {
        assert!(TransactionBody::new("1", "23").is_valid());
        assert!(TransactionBody::new("12", "3").is_valid());
        assert!(TransactionBody::new("", "123").is_valid());
        assert!(!TransactionBody::new("3", "21").is_valid());
        assert!(!TransactionBody::new("1", "2").is_valid());
    }

    #[test]
    fn numbers_are_rendered_as_text() {
        assert!(TransactionBody::new(json!(12), json!(3)).is_valid());
        assert!(TransactionBody::new(json!(1), "23").is_valid());
        assert!(!TransactionBody::new(json!(1.5), json!(23)).is_valid());
    }

    #[test]
    fn missing_or_structured_fields_fail() {
        assert_eq!(TransactionBody::default().concatenated(), None);

        let only_a = TransactionBody {
            a: Some(json!("123")),
            b: None,
        };
        assert!(!only_a.is_valid());

        let nested = TransactionBody::new(json!(["1"]), "23");
        assert_eq!(nested.concatenated(), None);

        let null = TransactionBody::new(Value::Null, "123");
        assert!(!null.is_valid());
    }
}
