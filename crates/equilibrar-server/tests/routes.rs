use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{Value, json};
use tower::ServiceExt;

use equilibrar_server::config::ServerConfig;
use equilibrar_server::state::{AppState, Clock};

fn app() -> Router {
    let config = ServerConfig {
        time_zone: "UTC".to_string(),
        ..ServerConfig::default()
    };
    let state = AppState::new(&config)
        .unwrap()
        .with_clock(Clock::Fixed("2023-10-27T12:00:00Z".parse().unwrap()));
    equilibrar_server::app(state)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, String) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = send(app, Method::GET, uri, None).await;
    (status, serde_json::from_str(&body).unwrap())
}

#[tokio::test]
async fn health_reports_ok() {
    let (status, body) = get_json(&app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn index_shows_the_picker_until_login() {
    let app = app();
    let (status, html) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"data-view="login""#));

    let (status, html) = send(
        &app,
        Method::POST,
        "/session",
        Some(json!({ "user_id": "u-coord" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Panel de Gestión"));

    // The session is shared between requests.
    let (_, html) = send(&app, Method::GET, "/", None).await;
    assert!(html.contains(r#"data-view="coordinator""#));

    let (status, html) = send(&app, Method::DELETE, "/session", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"data-view="login""#));
    let (_, html) = send(&app, Method::GET, "/", None).await;
    assert!(html.contains(r#"data-view="login""#));
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let (status, body) = send(
        &app(),
        Method::POST,
        "/session",
        Some(json!({ "user_id": "u-ghost" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert!(body["error"].as_str().unwrap().contains("u-ghost"));
}

#[tokio::test]
async fn actions_rerender_the_mounted_view() {
    let app = app();
    let (status, _) = send(
        &app,
        Method::POST,
        "/actions",
        Some(json!({ "view": "admin", "payload": { "type": "back" } })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    send(
        &app,
        Method::POST,
        "/session",
        Some(json!({ "user_id": "u-admin" })),
    )
    .await;

    let (status, html) = send(
        &app,
        Method::POST,
        "/actions",
        Some(json!({ "view": "admin", "payload": { "type": "select_tab", "tab": "users" } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Gestión de Usuarios"));

    let (status, _) = send(
        &app,
        Method::POST,
        "/actions",
        Some(json!({ "view": "coordinator", "payload": { "type": "next_month" } })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn invalid_create_user_form_is_a_bad_request() {
    let app = app();
    send(
        &app,
        Method::POST,
        "/session",
        Some(json!({ "user_id": "u-coord" })),
    )
    .await;
    send(
        &app,
        Method::POST,
        "/actions",
        Some(json!({ "view": "coordinator", "payload": { "type": "open_create_user" } })),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/actions",
        Some(json!({
            "view": "coordinator",
            "payload": {
                "type": "create_user",
                "form": { "name": "Marta", "email": "not-an-email", "role": "CLIENT", "start_week": 1 }
            }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("email"));
}

#[tokio::test]
async fn malformed_bodies_are_json_bad_requests() {
    let app = app();
    for (uri, body) in [
        ("/session", json!({ "uid": "u-admin" })),
        ("/actions", json!({ "view": "admin", "payload": { "type": "bogus" } })),
    ] {
        let (status, body) = send(&app, Method::POST, uri, Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        let body: Value = serde_json::from_str(&body).unwrap();
        assert!(body["error"].is_string(), "{uri}");
    }

    let request = Request::builder()
        .method(Method::POST)
        .uri("/session")
        .body(Body::from("user_id=u-admin"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Nobody got logged in along the way.
    let (_, html) = send(&app, Method::GET, "/", None).await;
    assert!(html.contains(r#"data-view="login""#));
}

#[tokio::test]
async fn users_lists_the_roster() {
    let (status, body) = get_json(&app(), "/users").await;
    assert_eq!(status, StatusCode::OK);
    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 7);
    assert_eq!(users[0]["id"], "u-admin");
    assert_eq!(users[0]["role"], "ADMIN");
    assert!(users.iter().all(|u| u.get("email").is_some() && u.get("status").is_some()));
}

#[tokio::test]
async fn instruments_catalog() {
    let app = app();
    let (status, body) = get_json(&app, "/instruments").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["id"], "test_culpa");
    assert_eq!(body[0]["question_count"], 7);

    let (status, body) = get_json(&app, "/instruments/test_culpa").await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<u64> = body["questions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, [1, 2, 3, 4, 6, 19, 20]);
    assert_eq!(body["scale"]["max"], 5.0);

    let (status, _) = get_json(&app, "/instruments/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn next_meeting_for_a_client() {
    let app = app();
    let (status, body) = get_json(&app, "/clients/c-w1/next-meeting").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["week"], 1);
    assert_eq!(body["starts_at"], "2023-10-27T10:00:00");
    assert_eq!(body["formatted"], "Viernes, 27 de octubre");
    assert_eq!(body["is_past"], true);

    let (status, body) = get_json(&app, "/clients/c-w4/next-meeting").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["starts_at"], "2023-10-13T10:00:00");

    let (status, _) = get_json(&app, "/clients/u-admin/next-meeting").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn client_audio_series() {
    let app = app();
    let (status, body) = get_json(&app, "/clients/c-w3/audio/weekly").await;
    assert_eq!(status, StatusCode::OK);
    let minutes: Vec<u64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["minutes"].as_u64().unwrap())
        .collect();
    assert_eq!(minutes, [20, 0, 0, 0, 0, 0, 0]);

    let (_, body) = get_json(&app, "/clients/c-w3/audio/weekly?week_of=2023-10-04").await;
    let minutes: Vec<u64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["minutes"].as_u64().unwrap())
        .collect();
    assert_eq!(minutes, [15, 15, 0, 0, 0, 0, 0]);

    let (_, body) = get_json(&app, "/clients/c-w1/audio/weekly").await;
    assert!(body.as_array().unwrap().iter().all(|d| d["minutes"] == 0));
}

#[tokio::test]
async fn canned_weekly_series() {
    let (status, body) = get_json(&app(), "/metrics/audio/weekly").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 7);
    assert_eq!(body[0], json!({ "day": "Lun", "minutes": 45 }));
    assert_eq!(body[3], json!({ "day": "Jue", "minutes": 60 }));
}
