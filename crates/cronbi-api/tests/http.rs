//! Integration tests for the full HTTP surface: contact submission,
//! session auth flow, and the gated admin listing.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderValue, Method, Request, Response, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use cronbi_api::sessions::{AdminCredentials, MemorySessionStore};
use cronbi_api::{AppState, AppStateInner};
use cronbi_db::Database;

fn test_app() -> Router {
    let db = Database::open_in_memory().unwrap();
    let state: AppState = Arc::new(AppStateInner {
        db,
        credentials: Box::new(AdminCredentials::new("admin", "cronbi2024")),
        sessions: Box::new(MemorySessionStore::new()),
    });
    cronbi_api::app(state, HeaderValue::from_static("http://localhost:5173"))
}

async fn send(app: &Router, req: Request<Body>) -> Response<Body> {
    app.clone().oneshot(req).await.unwrap()
}

async fn post_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    let req = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, req).await
}

async fn get(app: &Router, uri: &str, token: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}

async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn login(app: &Router) -> String {
    let response = post_json(
        app,
        "/api/auth/login",
        json!({ "username": "admin", "password": "cronbi2024" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn submit_contact_returns_201_with_id() {
    let app = test_app();

    let response = post_json(
        &app,
        "/api/contact",
        json!({ "name": "Ali", "email": "ali@x.com", "message": "Merhaba" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["id"], 1);

    // company is optional
    let response = post_json(
        &app,
        "/api/contact",
        json!({ "name": "Ayşe", "email": "ayse@x.com", "company": "Acme", "message": "Hello" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["id"], 2);
}

#[tokio::test]
async fn submit_with_missing_fields_persists_nothing() {
    let app = test_app();

    for bad in [
        json!({ "name": "", "email": "a@x.com", "message": "hi" }),
        json!({ "name": "A", "email": "   ", "message": "hi" }),
        json!({ "name": "A", "email": "a@x.com", "message": "" }),
        json!({ "email": "a@x.com", "message": "hi" }),
    ] {
        let response = post_json(&app, "/api/contact", bad).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    let response = get(&app, "/api/contact", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn created_at_not_earlier_than_request_time() {
    use chrono::{DateTime, SubsecRound, Utc};

    let app = test_app();
    // Stored timestamps carry second precision, so compare at that level.
    let before = Utc::now().trunc_subsecs(0);

    let response = post_json(
        &app,
        "/api/contact",
        json!({ "name": "Ali", "email": "ali@x.com", "message": "Merhaba" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(get(&app, "/api/contact", None).await).await;
    let created: DateTime<Utc> = body[0]["created_at"].as_str().unwrap().parse().unwrap();
    assert!(
        created >= before,
        "created_at {} earlier than {}",
        created,
        before
    );
}

#[tokio::test]
async fn contact_list_is_newest_first() {
    let app = test_app();

    for i in 1..=3 {
        let body = json!({
            "name": format!("User {}", i),
            "email": format!("u{}@x.com", i),
            "message": format!("message {}", i),
        });
        post_json(&app, "/api/contact", body).await;
    }

    let body = body_json(get(&app, "/api/contact", None).await).await;
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![3, 2, 1]);
    assert!(body[0]["company"].is_null());
}

#[tokio::test]
async fn login_token_is_valid_until_logout() {
    let app = test_app();
    let token = login(&app).await;

    let response = get(&app, "/api/auth/verify", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["valid"], true);
    assert_eq!(body["user"]["username"], "admin");

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/logout")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let response = send(&app, req).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["success"], true);

    // Revoked token no longer verifies and no longer opens the admin path
    let response = get(&app, "/api/auth/verify", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["valid"], false);

    let response = get(&app, "/api/admin/messages", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_rejects_wrong_credentials() {
    let app = test_app();

    for (user, pass) in [
        ("admin", "wrong"),
        ("root", "cronbi2024"),
        ("", ""),
    ] {
        let response = post_json(
            &app,
            "/api/auth/login",
            json!({ "username": user, "password": pass }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert!(body.get("token").is_none());
    }
}

#[tokio::test]
async fn logout_without_token_still_succeeds() {
    let app = test_app();
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/logout")
        .body(Body::empty())
        .unwrap();
    let response = send(&app, req).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn admin_messages_requires_a_session() {
    let app = test_app();
    post_json(
        &app,
        "/api/contact",
        json!({ "name": "Ali", "email": "ali@x.com", "message": "Merhaba" }),
    )
    .await;

    // No header at all
    let response = get(&app, "/api/admin/messages", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(body_json(response).await.get("contacts").is_none());

    // Token that was never issued
    let response = get(&app, "/api/admin/messages", Some("notatoken")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(body_json(response).await.get("contacts").is_none());
}

#[tokio::test]
async fn admin_messages_returns_contacts_and_stats() {
    let app = test_app();

    for i in 1..=2 {
        let body = json!({
            "name": format!("User {}", i),
            "email": format!("u{}@x.com", i),
            "message": "hello",
        });
        post_json(&app, "/api/contact", body).await;
    }

    let token = login(&app).await;
    let response = get(&app, "/api/admin/messages", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["stats"]["total"], 2);
    assert_eq!(body["stats"]["today"], 2);
    assert_eq!(body["contacts"].as_array().unwrap().len(), 2);
    assert_eq!(body["contacts"][0]["id"], 2);
}

#[tokio::test]
async fn health_returns_ok() {
    let app = test_app();
    let response = get(&app, "/api/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = test_app();
    let response = get(&app, "/api/nope", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cors_preflight_allows_the_configured_origin() {
    let app = test_app();

    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/contact")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .body(Body::empty())
        .unwrap();
    let response = send(&app, req).await;
    assert_eq!(response.status(), StatusCode::OK);

    let allow_origin = response
        .headers()
        .get("access-control-allow-origin")
        .expect("missing Access-Control-Allow-Origin")
        .to_str()
        .unwrap();
    assert_eq!(allow_origin, "http://localhost:5173");
}
