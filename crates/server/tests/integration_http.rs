//! # HTTP Integration Tests
//!
//! Drives the full router over in-memory requests: authentication
//! round-trips, the public verification link, role gating and the
//! glink/plink invariant at the API boundary.

mod common;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use common::{create_admin, create_contact, create_organization, create_port, create_user, setup_state};
use entity::users::UserRole;
use serde_json::{json, Value};
use server::verification::issue_verification;
use server::AppState;
use tower::ServiceExt;

fn app(state: &AppState) -> Router {
    server::create_app_router(state.clone(), false)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(serde_json::to_vec(body).unwrap())).unwrap()
}

fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

/// Logs in over HTTP and returns the bearer token.
async fn login(state: &AppState, email: &str, password: &str) -> String {
    let response = app(state)
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            &json!({ "email": email, "password": password }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_endpoint() {
    let state = setup_state().await;
    let response = app(&state).oneshot(get_request("/health", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_login_and_me_round_trip() {
    let state = setup_state().await;
    create_admin(&state.db, "admin@portray.example", "AdminPass123").await;

    let response = app(&state)
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            &json!({ "email": "admin@portray.example", "password": "AdminPass123" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["email"], "admin@portray.example");
    assert_eq!(body["redirectPath"], "/admin/dashboard");
    assert!(body["user"].get("password_hash").is_none(), "Hash must never leak");

    let token = body["token"].as_str().unwrap();
    let response = app(&state).oneshot(get_request("/api/auth/me", Some(token))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["user"]["email"], "admin@portray.example");
}

#[tokio::test]
async fn test_wrong_credentials_are_unauthorized() {
    let state = setup_state().await;
    create_admin(&state.db, "admin@portray.example", "AdminPass123").await;

    let response = app(&state)
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            &json!({ "email": "admin@portray.example", "password": "WrongPass123" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "AUTHENTICATION_ERROR");
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    let state = setup_state().await;

    let response = app(&state).oneshot(get_request("/api/ports", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers().get(header::WWW_AUTHENTICATE).unwrap(), "Bearer");

    let response = app(&state)
        .oneshot(get_request("/api/ports", Some("not-a-real-token")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_invalidates_token() {
    let state = setup_state().await;
    create_admin(&state.db, "admin@portray.example", "AdminPass123").await;
    let token = login(&state, "admin@portray.example", "AdminPass123").await;

    let response = app(&state)
        .oneshot(json_request("POST", "/api/auth/logout", Some(&token), &json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app(&state).oneshot(get_request("/api/auth/me", Some(&token))).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_verify_link_then_password_setup_then_login() {
    let state = setup_state().await;
    let org = create_organization(&state.db, "Harbor Group").await;
    let port = create_port(&state.db, org.id, "Port of Rotterdam").await;
    let contact = create_contact(&state.db, port.id, "ada@port.example", "Ada Marlow").await;
    let (_, token) = issue_verification(&state.db, contact.id).await.unwrap();

    // Public verification link from the email.
    let response = app(&state)
        .oneshot(get_request(&format!("/api/verify?token={}", token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["isVerified"], true);
    let user_id = body["data"]["userId"].as_str().unwrap().to_string();

    // Password setup doubles as the first login.
    let response = app(&state)
        .oneshot(json_request(
            "POST",
            "/api/setup-password",
            None,
            &json!({ "userId": user_id, "password": "FreshPassword1" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["redirectPath"], "/port/dashboard");
    assert!(body["token"].as_str().is_some());

    // The account is now active and the password works.
    let token = login(&state, "ada@port.example", "FreshPassword1").await;
    assert!(!token.is_empty());

    // Setup cannot run twice.
    let response = app(&state)
        .oneshot(json_request(
            "POST",
            "/api/setup-password",
            None,
            &json!({ "userId": body["user"]["id"], "password": "AnotherPass1" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_verify_rejects_unknown_token() {
    let state = setup_state().await;

    let response = app(&state)
        .oneshot(get_request("/api/verify?token=bogus", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_activate_over_http_is_admin_only() {
    let state = setup_state().await;
    create_user(&state.db, "padmin@port.example", "GoodPassword1", UserRole::PortAdmin, true).await;
    let org = create_organization(&state.db, "Harbor Group").await;
    let port = create_port(&state.db, org.id, "Port of Bergen").await;
    let terminal = server::lifecycle::submit(
        &state.db,
        port.id,
        server::lifecycle::TerminalDraft {
            terminal_name: "Cold Store".to_string(),
            ..Default::default()
        },
        None,
    )
    .await
    .unwrap();

    let token = login(&state, "padmin@port.example", "GoodPassword1").await;
    let response = app(&state)
        .oneshot(json_request(
            "PUT",
            &format!("/api/terminals/{}/activate", terminal.id),
            Some(&token),
            &json!({ "activationStartDate": "2025-01-01", "subscriptionTypeId": 2 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_menu_routes_enforce_admin_and_invariant() {
    let state = setup_state().await;
    create_admin(&state.db, "admin@portray.example", "AdminPass123").await;
    create_user(&state.db, "user@port.example", "GoodPassword1", UserRole::User, true).await;

    let user_token = login(&state, "user@port.example", "GoodPassword1").await;
    let admin_token = login(&state, "admin@portray.example", "AdminPass123").await;

    // Menu management is admin-only.
    let response = app(&state)
        .oneshot(json_request(
            "POST",
            "/api/menus",
            Some(&user_token),
            &json!({ "name": "dashboard", "label": "Dashboard", "menuType": "glink" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Admin creates a glink root.
    let response = app(&state)
        .oneshot(json_request(
            "POST",
            "/api/menus",
            Some(&admin_token),
            &json!({ "name": "settings", "label": "Settings", "menuType": "glink" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let glink_id = body["data"]["id"].as_str().unwrap().to_string();

    // A plink without a parent is invalid.
    let response = app(&state)
        .oneshot(json_request(
            "POST",
            "/api/menus",
            Some(&admin_token),
            &json!({ "name": "users", "label": "Users", "menuType": "plink" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // A plink under the glink is fine and shows up nested in the tree.
    let response = app(&state)
        .oneshot(json_request(
            "POST",
            "/api/menus",
            Some(&admin_token),
            &json!({
                "name": "users",
                "label": "Users",
                "menuType": "plink",
                "parentId": glink_id,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app(&state)
        .oneshot(get_request("/api/menus", Some(&user_token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let tree = body["data"].as_array().unwrap();
    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0]["children"][0]["name"], "users");
}

#[tokio::test]
async fn test_entity_payloads_use_camel_case() {
    let state = setup_state().await;
    create_admin(&state.db, "admin@portray.example", "AdminPass123").await;
    let token = login(&state, "admin@portray.example", "AdminPass123").await;

    let response = app(&state)
        .oneshot(json_request(
            "POST",
            "/api/organizations",
            Some(&token),
            &json!({ "organizationName": "Harbor Group", "organizationCode": "HG" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["organizationName"], "Harbor Group");
    assert_eq!(body["data"]["isActive"], true);
    assert!(body["data"].get("organization_name").is_none());
    let org_id = body["data"]["id"].as_str().unwrap().to_string();

    let response = app(&state)
        .oneshot(json_request(
            "POST",
            "/api/ports",
            Some(&token),
            &json!({ "portName": "Port of Hamburg", "organizationId": org_id }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["portName"], "Port of Hamburg");
    assert_eq!(body["data"]["organizationId"], org_id);
    assert!(body["data"].get("port_name").is_none());
    let port_id = body["data"]["id"].as_str().unwrap().to_string();

    let response = app(&state)
        .oneshot(json_request(
            "POST",
            &format!("/api/ports/{}/terminals", port_id),
            Some(&token),
            &json!({ "terminalName": "North Quay" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["terminalName"], "North Quay");
    assert_eq!(body["data"]["portId"], port_id);
    assert_eq!(body["data"]["status"], "Processing for activation");
    assert!(body["data"].get("terminal_name").is_none());
    assert!(body["data"].get("activation_start_date").is_none());
}

#[tokio::test]
async fn test_security_headers_on_every_response() {
    let state = setup_state().await;
    let response = app(&state).oneshot(get_request("/health", None)).await.unwrap();

    let headers = response.headers();
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert!(headers.contains_key("content-security-policy"));
}
