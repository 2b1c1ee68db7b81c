#![allow(dead_code)]

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use mock_upstream::{
    config::{Settings, Variant},
    router::build_router,
    services::{MarkerSink, Pacer},
    state::AppState,
};
use std::sync::{Arc, Mutex};

pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Reply {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("response body is JSON")
    }

    /// `name=value` part of the session cookie, the way a client replays it.
    pub fn session_cookie(&self) -> Option<String> {
        self.headers
            .get(header::SET_COOKIE)?
            .to_str()
            .ok()?
            .split(';')
            .next()
            .map(str::to_string)
    }
}

pub fn app(variant: Variant, tweak: impl FnOnce(&mut Settings)) -> (Router, AppState) {
    let mut settings = Settings::defaults(variant).expect("default settings");
    settings.http2.enabled = false;
    tweak(&mut settings);
    let state = AppState::new(settings, variant);
    (build_router(state.clone()), state)
}

/// Like [`app`], with markers on and captured instead of printed.
pub fn app_with_markers(
    variant: Variant,
    tweak: impl FnOnce(&mut Settings),
) -> (Router, Arc<Mutex<Vec<u8>>>) {
    let mut settings = Settings::defaults(variant).expect("default settings");
    settings.http2.enabled = false;
    settings.pacing.output = true;
    tweak(&mut settings);

    let (sink, markers) = MarkerSink::buffer();
    let mut state = AppState::new(settings, variant);
    state.pacer = Arc::new(Pacer::from_config(&state.settings.pacing).with_sink(sink));
    (build_router(state), markers)
}

pub fn markers(buf: &Mutex<Vec<u8>>) -> String {
    String::from_utf8_lossy(&buf.lock().unwrap()).into_owned()
}

pub async fn send(app: &Router, request: Request<Body>) -> Reply {
    let response = app.clone().oneshot(request).await.expect("infallible router");
    let status = response.status();
    let headers = response.headers().clone();
    let body = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();
    Reply {
        status,
        headers,
        body,
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

pub fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::get(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}
