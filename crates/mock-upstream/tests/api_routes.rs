mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use common::{app, app_with_markers, get, markers, send};
use mock_upstream::config::Variant;
use std::path::Path;
use std::time::{Duration, Instant};
use tempfile::TempDir;

fn fixture_tree() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let write = |rel: &str, contents: &[u8]| {
        let path = dir.path().join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    };

    write("api/users.json", br#"[{"id":1,"name":"Ada"},{"id":2,"name":"Linus"}]"#);
    write("api/users/1", br#"{"id":1,"name":"Ada"}"#);
    write("api/organizations", br#"[{"id":10}]"#);
    write("api/account", br#"{"plan":"free"}"#);
    write("api/reports/summary.txt", b"plain text report\n");
    dir
}

fn api_app(root: &Path) -> axum::Router {
    let root = root.to_path_buf();
    app(Variant::Api, move |s| s.fixtures.root = root).0
}

fn json_post(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn fixture_routes_return_exact_bytes() {
    let dir = fixture_tree();
    let router = api_app(dir.path());

    for path in [
        "/api/users.json",
        "/api/users/1",
        "/api/organizations",
        "/api/account",
        "/api/reports/summary.txt",
    ] {
        let expected = std::fs::read(dir.path().join(&path[1..])).unwrap();
        let reply = send(&router, get(path)).await;
        assert_eq!(reply.status, StatusCode::OK, "{path}");
        assert_eq!(&reply.body[..], &expected[..], "{path}");
    }
}

#[tokio::test]
async fn fixture_content_type_follows_extension() {
    let dir = fixture_tree();
    let router = api_app(dir.path());

    let json = send(&router, get("/api/users.json")).await;
    assert_eq!(json.headers[header::CONTENT_TYPE], "application/json");

    let bare = send(&router, get("/api/users/1")).await;
    assert_eq!(bare.headers[header::CONTENT_TYPE], "application/json");

    let text = send(&router, get("/api/reports/summary.txt")).await;
    assert_eq!(text.headers[header::CONTENT_TYPE], "text/plain");
}

#[tokio::test]
async fn query_string_is_ignored_for_lookup() {
    let dir = fixture_tree();
    let router = api_app(dir.path());

    let reply = send(&router, get("/api/users.json?page=2")).await;
    assert_eq!(reply.status, StatusCode::OK);
}

#[tokio::test]
async fn missing_fixture_is_empty_404() {
    let dir = fixture_tree();
    let (router, state) = app(Variant::Api, |s| s.fixtures.root = dir.path().to_path_buf());

    for path in ["/api/users/999", "/api/missing.json", "/api/reports", "/api/organizations/1"] {
        let reply = send(&router, get(path)).await;
        assert_eq!(reply.status, StatusCode::NOT_FOUND, "{path}");
        assert!(reply.body.is_empty(), "{path}");
    }
    assert_eq!(state.metrics.fixture_misses(), 4);
}

#[tokio::test]
async fn paths_outside_api_are_not_served() {
    let dir = fixture_tree();
    let router = api_app(dir.path());

    let reply = send(&router, get("/users.json")).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);

    let post = send(&router, empty(Method::POST, "/api/reports/summary.txt")).await;
    assert_eq!(post.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn canned_status_routes() {
    let dir = fixture_tree();
    let router = api_app(dir.path());

    for (method, uri) in [
        (Method::GET, "/api/comments"),
        (Method::PUT, "/api/users/1"),
        (Method::DELETE, "/api/users/1"),
    ] {
        let reply = send(&router, empty(method.clone(), uri)).await;
        assert_eq!(reply.status, StatusCode::OK, "{method} {uri}");
        assert_eq!(reply.text(), r#"{"status":":)"}"#);
    }
}

#[tokio::test]
async fn flaky_endpoint_always_failing() {
    let (router, state) = app(Variant::Api, |s| s.flaky.one_in = 1);

    for _ in 0..5 {
        let reply = send(&router, empty(Method::POST, "/api/users")).await;
        assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(reply.text(), r#"{"status":":("}"#);
    }
    assert_eq!(state.metrics.simulated_failures(), 5);
}

#[tokio::test]
async fn flaky_endpoint_disabled() {
    let (router, _) = app(Variant::Api, |s| s.flaky.one_in = 0);

    for _ in 0..50 {
        let reply = send(&router, empty(Method::POST, "/api/users")).await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.text(), r#"{"status":":)"}"#);
    }
}

#[tokio::test]
async fn flaky_endpoint_mostly_succeeds() {
    let (router, state) = app(Variant::Api, |_| {});
    let calls = 2_000;

    let mut failures = 0;
    for _ in 0..calls {
        let reply = send(&router, empty(Method::POST, "/api/users")).await;
        if reply.status == StatusCode::INTERNAL_SERVER_ERROR {
            failures += 1;
        } else {
            assert_eq!(reply.status, StatusCode::OK);
        }
    }

    // Expected ~39 failures at 1/51; this bound is many sigmas wide.
    assert!(failures > 5 && failures < 100, "failures: {failures}");
    assert_eq!(state.metrics.simulated_failures(), failures);
}

#[tokio::test]
async fn transactions_accept_json_and_form() {
    let (router, _) = app(Variant::Api, |_| {});

    for request in [
        json_post("/api/transactions", r#"{"a":"1","b":"23"}"#),
        json_post("/api/transactions", r#"{"a":"12","b":"3"}"#),
        json_post("/api/transactions", r#"{"a":12,"b":3}"#),
        form_post("/api/transactions", "a=1&b=23"),
        form_post("/api/transactions", "a=&b=123"),
    ] {
        let reply = send(&router, request).await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.text(), r#"{"status":":)"}"#);
    }
}

#[tokio::test]
async fn transactions_reject_everything_else() {
    let (router, _) = app(Variant::Api, |_| {});
    let plain = Request::post("/api/transactions")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("a=1&b=23"))
        .unwrap();

    for request in [
        json_post("/api/transactions", r#"{"a":"3","b":"21"}"#),
        json_post("/api/transactions", r#"{"a":"123"}"#),
        json_post("/api/transactions", r#"{"a":"1","b":"23""#),
        json_post("/api/transactions", r#"{"a":["1"],"b":"23"}"#),
        form_post("/api/transactions", "a=1&b=2"),
        empty(Method::POST, "/api/transactions"),
        plain,
    ] {
        let reply = send(&router, request).await;
        assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(reply.text(), r#"{"status":":("}"#);
    }
}

#[tokio::test]
async fn delay_applies_to_api_routes_only() {
    let dir = fixture_tree();
    let (router, _) = app(Variant::Api, |s| {
        s.fixtures.root = dir.path().to_path_buf();
        s.pacing.delay_ms = 120;
    });

    let started = Instant::now();
    let reply = send(&router, get("/api/users.json")).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(started.elapsed() >= Duration::from_millis(120));

    let started = Instant::now();
    send(&router, get("/")).await;
    assert!(started.elapsed() < Duration::from_millis(120));
}

#[tokio::test]
async fn delayed_requests_run_concurrently() {
    let dir = fixture_tree();
    let (router, _) = app(Variant::Api, |s| {
        s.fixtures.root = dir.path().to_path_buf();
        s.pacing.delay_ms = 150;
    });

    let started = Instant::now();
    let (a, b, c) = tokio::join!(
        send(&router, get("/api/users.json")),
        send(&router, get("/api/account")),
        send(&router, get("/api/comments")),
    );
    assert!([a.status, b.status, c.status].iter().all(|s| *s == StatusCode::OK));
    assert!(started.elapsed() < Duration::from_millis(440));
}

#[tokio::test]
async fn api_variant_keeps_session_routes() {
    let (router, _) = app(Variant::Api, |_| {});

    let login = send(&router, get("/login?user=example&password=3x4mpl3")).await;
    assert_eq!(login.status, StatusCode::OK);

    let root = send(&router, get("/")).await;
    assert_eq!(root.text(), r#"{"status":":D"}"#);
}

#[tokio::test]
async fn health_reports_counters() {
    let (router, _) = app(Variant::Api, |s| s.flaky.one_in = 1);
    send(&router, empty(Method::POST, "/api/users")).await;
    send(&router, get("/api/definitely-missing")).await;

    let reply = send(&router, get("/health")).await;
    assert_eq!(reply.status, StatusCode::OK);

    let body = reply.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["variant"], "api");
    assert_eq!(body["simulated_failures"], 1);
    assert_eq!(body["fixture_misses"], 1);
    assert_eq!(body["requests"], 3);
}

#[tokio::test]
async fn each_route_writes_its_marker() {
    let dir = fixture_tree();
    let root = dir.path().to_path_buf();
    let (router, buf) = app_with_markers(Variant::Api, move |s| {
        s.fixtures.root = root;
        s.flaky.one_in = 0;
    });

    let requests = vec![
        get("/api/users.json"),
        get("/api/users/1"),
        get("/api/organizations"),
        get("/api/account"),
        get("/api/comments"),
        json_post("/api/users", r#"{"name":"Grace"}"#),
        empty(Method::PUT, "/api/users/1"),
        empty(Method::DELETE, "/api/users/1"),
        json_post("/api/transactions", r#"{"a":"12","b":"3"}"#),
        get("/api/reports/summary.txt"),
    ];
    for request in requests {
        let reply = send(&router, request).await;
        assert_eq!(reply.status, StatusCode::OK);
    }
    assert_eq!(markers(&buf), "UuOACPWDT.");

    // session routes and misses outside /api are not paced
    send(&router, get("/")).await;
    send(&router, get("/counter")).await;
    send(&router, get("/nowhere")).await;
    assert_eq!(markers(&buf), "UuOACPWDT.");
}

#[tokio::test]
async fn no_markers_when_output_is_off() {
    let (router, buf) = app_with_markers(Variant::Api, |s| {
        s.pacing.output = false;
        s.flaky.one_in = 0;
    });

    send(&router, get("/api/comments")).await;
    send(&router, json_post("/api/users", "{}")).await;
    assert_eq!(markers(&buf), "");
}
