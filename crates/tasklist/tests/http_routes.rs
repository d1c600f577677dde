use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tasklist::api::TaskListApi;
use tasklist::datastore::memory::InMemoryDatastore;
use tasklist::http::router;
use tower::ServiceExt;

fn app() -> (Arc<TaskListApi<InMemoryDatastore>>, Router) {
    let api = Arc::new(TaskListApi::new(InMemoryDatastore::new()));
    (Arc::clone(&api), router(api))
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_json(response: axum::response::Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn root_says_ok() {
    let (_, app) = app();
    let response = app.oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"OK");
}

#[tokio::test]
async fn get_on_empty_store_is_empty_array() {
    let (_, app) = app();
    let response = app.oneshot(get("/person/get")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn get_ignores_name_and_lists_everything() {
    let (api, app) = app();
    api.add("buy milk").unwrap();
    api.add("call mom").unwrap();

    let response = app
        .oneshot(get("/person/get?name=nobody"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!(["1 : buy milk ", "2 : call mom "])
    );
}

#[tokio::test]
async fn update_adds_and_echoes_body() {
    let (api, app) = app();
    let response = app
        .oneshot(post_json(
            "/person/update",
            r#"{"name":"Ada","id":42,"done":true}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"name": "Ada", "id": 42, "done": true})
    );

    // id and done in the body are not used for the stored record.
    assert_eq!(api.list_formatted().unwrap(), vec!["1 : Ada "]);
    assert!(!api.mark_done(42).unwrap());
}

#[tokio::test]
async fn update_with_blank_name_is_bad_request() {
    let (api, app) = app();
    let response = app
        .oneshot(post_json("/person/update", r#"{"name":"  "}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({"error": "name cannot be empty"})
    );
    assert!(api.list_formatted().unwrap().is_empty());
}

#[tokio::test]
async fn update_with_malformed_json_is_rejected() {
    let (_, app) = app();
    let response = app
        .oneshot(post_json("/person/update", "{ nope"))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn store_failure_is_service_unavailable() {
    let (api, app) = app();
    api.store().backend().set_simulate_write_error(true);

    let response = app
        .oneshot(post_json("/person/update", r#"{"name":"Ada"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(
        body["error"],
        json!("datastore unavailable: Simulated write error")
    );
}
