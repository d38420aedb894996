//! HTTP surface tests: in-process through the router, and over TCP.

use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;

mod common;

async fn get(server: &lapurd::HttpServer, uri: &str) -> (StatusCode, header::HeaderMap, String) {
    let response = server
        .router()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_page_from_query_parameter() {
    let server = common::server("HelloWorld");
    let (status, headers, body) = get(&server, "/?q=foo/bar").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("You are saying: 'bar'!"));
    assert!(headers[header::CONTENT_TYPE].to_str().unwrap().starts_with("text/html"));
    assert!(headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn test_uri_path_is_ignored() {
    let server = common::server("HelloWorld");
    let (status, _, body) = get(&server, "/some/where").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Hello World!"));
}

#[tokio::test]
async fn test_not_found_status_and_body() {
    let server = common::server("HelloWorld");
    let (status, _, body) = get(&server, "/?q=baz").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "<h1>404 Page Not Found</h1>The page you requested can not be found.");
}

#[tokio::test]
async fn test_internal_error_is_500() {
    let server = common::server("Demo");
    let (status, _, body) = get(&server, "/?q=a").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.starts_with("<pre>redirect cycle detected"));
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let server = common::server("HelloWorld");
    let response = server
        .router()
        .oneshot(
            Request::builder()
                .uri("/")
                .header("x-request-id", "test-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.headers()["x-request-id"], "test-123");
}

#[tokio::test]
async fn test_serve_and_reload() {
    let running = common::spawn(common::server("HelloWorld")).await;
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let url = format!("http://{}/", running.addr);

    let body = client.get(&url).send().await.unwrap().text().await.unwrap();
    assert!(body.contains("Hello World!"));

    // An invalid site is rejected and the current one keeps serving.
    running.config_updates.send(common::config("Nope")).unwrap();
    running.config_updates.send(common::config("Demo")).unwrap();

    let mut reloaded = false;
    for _ in 0..50 {
        let body = client.get(&url).send().await.unwrap().text().await.unwrap();
        if body.contains("Welcome home") {
            reloaded = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert!(reloaded, "site should be rebuilt from the new configuration");

    drop(client);
    running.shutdown.trigger();
    tokio::time::timeout(Duration::from_secs(5), running.handle)
        .await
        .unwrap()
        .unwrap()
        .unwrap();
}
