use std::sync::Arc;

use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, router, Db, Store};
use serde_json::{json, Value};
use tokio::sync::RwLock;
use tower::ServiceExt;

const TOKEN: &str = "dsfd79843r32d1d3dx23d32d";

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn db_with_token() -> Db {
    Arc::new(RwLock::new(Store::seeded().with_token(TOKEN)))
}

// --- auth ---

#[tokio::test]
async fn auth_issues_token() {
    let resp = app().oneshot(get("/auth?login=test&pass=12345")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["status"], "OK");
    assert!(!body["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn auth_wrong_password_reports_fail() {
    let resp = app().oneshot(get("/auth?login=test&pass=nope")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body, json!({"status": "FAIL"}));
}

#[tokio::test]
async fn auth_missing_pass_returns_400() {
    let resp = app().oneshot(get("/auth?login=test")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- get-user ---

#[tokio::test]
async fn get_user_returns_record() {
    let resp = router(db_with_token())
        .oneshot(get(&format!("/get-user/ivanov?token={TOKEN}")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["status"], "OK");
    assert_eq!(body["id"], 23);
    assert_eq!(body["name"], "Ivanov Ivan");
    assert_eq!(body["permissions"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn get_user_without_token_returns_401() {
    let resp = app().oneshot(get("/get-user/ivanov")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn get_user_unknown_token_returns_401() {
    let resp = router(db_with_token())
        .oneshot(get("/get-user/ivanov?token=stale"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn get_user_unknown_user_returns_404() {
    let resp = router(db_with_token())
        .oneshot(get(&format!("/get-user/petrov?token={TOKEN}")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- update ---

#[tokio::test]
async fn update_user_applies_fields() {
    let db = db_with_token();
    let resp = router(db.clone())
        .oneshot(json_request(
            "POST",
            &format!("/user/23/update?token={TOKEN}"),
            r#"{"active":"1","blocked":true,"name":"Petr Petrovich","permissions":[{"id":1,"permission":"comment"}]}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!({"status": "OK"}));

    let store = db.read().await;
    let user = &store.users["ivanov"];
    assert!(user.blocked);
    assert_eq!(user.name, "Petr Petrovich");
    assert_eq!(user.permissions.len(), 1);
    assert_eq!(user.permissions[0].permission, "comment");
    assert_eq!(user.created_at, 1587457590); // untouched
}

#[tokio::test]
async fn update_user_partial_leaves_other_fields() {
    let db = db_with_token();
    let resp = router(db.clone())
        .oneshot(json_request(
            "POST",
            &format!("/user/23/update?token={TOKEN}"),
            r#"{"blocked":true}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let store = db.read().await;
    let user = &store.users["ivanov"];
    assert!(user.blocked);
    assert_eq!(user.name, "Ivanov Ivan");
    assert_eq!(user.permissions.len(), 3);
}

#[tokio::test]
async fn update_user_unknown_id_returns_404() {
    let resp = router(db_with_token())
        .oneshot(json_request(
            "POST",
            &format!("/user/99/update?token={TOKEN}"),
            r#"{"blocked":true}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_user_non_numeric_id_returns_400() {
    let resp = router(db_with_token())
        .oneshot(json_request(
            "POST",
            &format!("/user/ivanov/update?token={TOKEN}"),
            r#"{"blocked":true}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_user_without_token_returns_401() {
    let resp = app()
        .oneshot(json_request("POST", "/user/23/update", r#"{"blocked":true}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn update_user_get_is_not_allowed() {
    let resp = router(db_with_token())
        .oneshot(get(&format!("/user/23/update?token={TOKEN}")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// --- full flow ---

#[tokio::test]
async fn auth_then_get_then_update() {
    use tower::Service;

    let mut app = app().into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/auth?login=test&pass=12345"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let token = body_json(resp).await["token"].as_str().unwrap().to_string();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get(&format!("/get-user/ivanov?token={token}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let id = body_json(resp).await["id"].as_u64().unwrap();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            &format!("/user/{id}/update?token={token}"),
            r#"{"name":"Petr Petrovich"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // the update is visible on the next read
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get(&format!("/get-user/ivanov?token={token}")))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await["name"], "Petr Petrovich");
}
