use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::util::ServiceExt;

use app_api::AppContext;
use waitdash_app::{AppPaths, AppState, ensure_app_data_dir};

use http_api::HttpState;

const TEST_TOKEN: &str = "testtoken";

struct TestApp {
    _temp_dir: tempfile::TempDir,
    router: axum::Router,
}

fn build_app() -> TestApp {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let paths = AppPaths::new(temp_dir.path().to_path_buf());
    ensure_app_data_dir(&paths).expect("ensure app data dir");
    let app_state = AppState::new(paths.db_path, paths.event_logs_dir);
    app_state.setup_db().expect("setup db");

    let context = AppContext {
        app_state,
        app_data_dir: paths.app_data_dir,
    };
    let state = HttpState::with_token(context, TEST_TOKEN.to_string());
    let router = http_api::router(state);

    TestApp {
        _temp_dir: temp_dir,
        router,
    }
}

fn api_request(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header("x-waitdash-token", TEST_TOKEN)
        .body(Body::from(body.to_string()))
        .expect("request")
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&body).expect("json body")
}

#[tokio::test]
async fn api_rejects_missing_csrf() {
    let app = build_app();

    let response = app
        .router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/get_data")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let payload = json_body(response).await;
    assert_eq!(payload["code"], "csrf_invalid");
}

#[tokio::test]
async fn api_rejects_foreign_origin() {
    let app = build_app();

    let response = app
        .router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/get_data")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::ORIGIN, "https://evil.example")
                .header("x-waitdash-token", TEST_TOKEN)
                .body(Body::from("{}"))
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn save_then_get_round_trips() {
    let app = build_app();

    let response = app
        .router
        .clone()
        .oneshot(api_request(
            "/api/save_data",
            json!({
                "site": "Claude",
                "data": {
                    "totalActiveTime": 4000,
                    "totalWaitTime": 1000,
                    "waitPercentage": 25.0,
                    "timestamp": 2000,
                    "date": "2026-08-24"
                }
            }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = json_body(response).await;
    assert_eq!(payload["success"], true);

    let response = app
        .router
        .oneshot(api_request("/api/get_data", json!({})))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = json_body(response).await;
    assert_eq!(
        payload["waitdash_stats"]["Claude"]["2026-08-24"]["totalActiveTime"],
        4000
    );
}

#[tokio::test]
async fn unknown_site_is_bad_request() {
    let app = build_app();

    let response = app
        .router
        .oneshot(api_request(
            "/api/save_data",
            json!({
                "site": "Copilot",
                "data": {
                    "totalActiveTime": 1000,
                    "totalWaitTime": 0,
                    "timestamp": 1000
                }
            }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = json_body(response).await;
    assert_eq!(payload["code"], "invalid_input");
}

#[tokio::test]
async fn clear_data_resets_summary() {
    let app = build_app();

    app.router
        .clone()
        .oneshot(api_request(
            "/api/save_data",
            json!({
                "site": "Gemini",
                "data": {
                    "totalActiveTime": 2000,
                    "totalWaitTime": 500,
                    "timestamp": 1000,
                    "date": "2026-08-24"
                }
            }),
        ))
        .await
        .expect("response");

    let response = app
        .router
        .clone()
        .oneshot(api_request("/api/clear_data", json!({})))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .router
        .oneshot(api_request("/api/summary", json!({})))
        .await
        .expect("response");
    let payload = json_body(response).await;
    assert_eq!(payload["totalActiveTime"], 0);
    assert_eq!(payload["sites"], json!([]));
}

#[tokio::test]
async fn replay_endpoint_reports_stats() {
    let app = build_app();

    let response = app
        .router
        .oneshot(api_request("/api/replay", json!({})))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = json_body(response).await;
    assert_eq!(payload["files_scanned"], 0);
    assert_eq!(payload["saves_flushed"], 0);
}
