use std::collections::BTreeMap;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tinyurl_core::{Repository, ShortCode};
use tinyurl_gateway::{App, AppState};
use tinyurl_generator::Md5Deriver;
use tinyurl_shortener::ShortenerService;
use tinyurl_storage::InMemoryRepository;
use tower::ServiceExt;

fn router_with(repository: Arc<InMemoryRepository>) -> Router {
    let service = ShortenerService::from_shared(repository, Md5Deriver::default());
    App::router(AppState::new(Arc::new(service)))
}

fn router() -> Router {
    router_with(Arc::new(InMemoryRepository::new()))
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, body)
}

fn create(body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/create")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn create_returns_short_postfix() {
    let router = router();

    let (status, _, body) = send(&router, create(json!({"url": "https://example.com"}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["url"], "https://example.com");
    assert_eq!(body["short_postfix"], "c984d06a");
    assert!(body["message"].as_str().unwrap().contains("received"));
}

#[tokio::test]
async fn create_accepts_uppercase_field_name() {
    let router = router();

    let (status, _, body) = send(&router, create(json!({"URL": "https://a.com"}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["short_postfix"], "66ccb499");
}

#[tokio::test]
async fn create_twice_returns_same_code_and_one_row() {
    let repository = Arc::new(InMemoryRepository::new());
    let router = router_with(Arc::clone(&repository));

    let (_, _, first) = send(&router, create(json!({"url": "https://example.com"}))).await;
    let (status, _, second) = send(&router, create(json!({"url": "https://example.com"}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["short_postfix"], second["short_postfix"]);
    assert_eq!(repository.len(), 1);
}

#[tokio::test]
async fn create_rejects_invalid_url() {
    let repository = Arc::new(InMemoryRepository::new());
    let router = router_with(Arc::clone(&repository));

    let (status, _, body) = send(&router, create(json!({"url": "not a url"}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Failed to parse URL"}));
    assert!(repository.is_empty());
}

#[tokio::test]
async fn create_rejects_malformed_body() {
    let router = router();

    for body in [json!({}), json!({"link": "https://example.com"}), json!("https://example.com")] {
        let (status, _, response) = send(&router, create(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["error"], "Failed to parse URL");
    }

    let request = Request::builder()
        .method(Method::POST)
        .uri("/create")
        .body(Body::from("url=https://example.com"))
        .unwrap();
    let (status, _, _) = send(&router, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_reports_storage_failure_as_not_found() {
    let repository = Arc::new(InMemoryRepository::new());
    // Occupy the code with a different url so the insert collides.
    repository
        .insert(&ShortCode::new_unchecked("c984d06a"), "https://other.example")
        .await
        .unwrap();
    let router = router_with(repository);

    let (status, _, body) = send(&router, create(json!({"url": "https://example.com"}))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Failed to load URL from DB"}));
}

#[tokio::test]
async fn redirect_is_permanent() {
    let router = router();
    let (_, _, created) =
        send(&router, create(json!({"url": "https://example.com/landing?x=1"}))).await;
    let code = created["short_postfix"].as_str().unwrap().to_string();

    let (status, headers, _) = send(&router, get(&format!("/{code}"))).await;

    assert_eq!(status, StatusCode::PERMANENT_REDIRECT);
    assert_eq!(
        headers.get(header::LOCATION).unwrap(),
        "https://example.com/landing?x=1"
    );
}

#[tokio::test]
async fn accepted_urls_redirect_to_themselves() {
    let router = router();

    for url in [
        "https://a.com",
        "https://example.com/a b?q=1#frag",
        "https://例え.jp/パス",
        "mailto:someone@example.com",
    ] {
        let (status, _, created) = send(&router, create(json!({ "url": url }))).await;
        assert_eq!(status, StatusCode::OK, "{url}");
        let code = created["short_postfix"].as_str().unwrap().to_string();

        let (status, headers, _) = send(&router, get(&format!("/{code}"))).await;
        assert_eq!(status, StatusCode::PERMANENT_REDIRECT, "{url}");
        assert_eq!(headers.get(header::LOCATION).unwrap().as_bytes(), url.as_bytes());
    }
}

#[tokio::test]
async fn create_rejects_urls_with_stray_whitespace() {
    let repository = Arc::new(InMemoryRepository::new());
    let router = router_with(Arc::clone(&repository));

    for url in [" https://a.com", "https://a.com\n", "https://exa\tmple.com/", "foo:"] {
        let (status, _, body) = send(&router, create(json!({ "url": url }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{url:?}");
        assert_eq!(body, json!({"error": "Failed to parse URL"}));
    }
    assert!(repository.is_empty());
}

#[tokio::test]
async fn redirect_unknown_code_is_bad_request() {
    let router = router();

    let (status, headers, body) = send(&router, get("/doesnotexist")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(headers.get(header::LOCATION).is_none());
    assert_eq!(body, json!({"error": "Failed to find URL"}));
}

#[tokio::test]
async fn redirect_malformed_code_is_bad_request() {
    let router = router();

    let (status, _, body) = send(&router, get("/ab")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Failed to find URL");
}

#[tokio::test]
async fn get_url_returns_binding() {
    let router = router();
    send(&router, create(json!({"url": "https://a.com"}))).await;

    let (status, _, body) = send(&router, get("/get_url/66ccb499")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"full_url": "https://a.com", "short_postfix": "66ccb499"})
    );
}

#[tokio::test]
async fn get_url_unknown_code_is_bad_request() {
    let router = router();

    let (status, _, body) = send(&router, get("/get_url/doesnotexist")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Failed to find URL"}));
}

#[tokio::test]
async fn get_bindings_lists_every_mapping() {
    let router = router();

    let (status, _, body) = send(&router, get("/get_bindings")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));

    send(&router, create(json!({"url": "https://b.com"}))).await;
    send(&router, create(json!({"url": "https://a.com"}))).await;

    let (status, _, body) = send(&router, get("/get_bindings")).await;
    assert_eq!(status, StatusCode::OK);

    let bindings: BTreeMap<String, String> = serde_json::from_value(body).unwrap();
    let pairs: Vec<(String, String)> = bindings.into_iter().collect();
    assert_eq!(
        pairs,
        vec![
            ("https://a.com".to_string(), "66ccb499".to_string()),
            ("https://b.com".to_string(), "dda34245".to_string()),
        ]
    );
}

#[tokio::test]
async fn health() {
    let router = router();

    let (status, _, body) = send(&router, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}
