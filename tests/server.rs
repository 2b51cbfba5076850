//! HTTP surface tests, driven through the router without binding a socket.

#![cfg(feature = "server")]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use newton_tutor::knowledge::{Knowledge, KnowledgeConfig};
use newton_tutor::server::router;
use newton_tutor::tutor::Tutor;

fn app() -> Router {
    router(Tutor::new(Knowledge::load(&KnowledgeConfig::Bundled)))
}

async fn post_body(
    app: Router,
    body: String,
    content_type: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method("POST").uri("/api/solve");
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    let request = builder.body(Body::from(body)).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn solve(app: Router, body: Value) -> (StatusCode, Value) {
    post_body(app, body.to_string(), Some("application/json")).await
}

#[tokio::test]
async fn solve_reports_math_error() {
    let (status, body) = solve(
        app(),
        json!({
            "given": {
                "mass": {"value": 4, "unit": "kg"},
                "acceleration": {"value": 3, "unit": "m/s^2"}
            },
            "target": "force",
            "studentAnswer": {"value": 11, "unit": "N"}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["correct"], json!(false));
    assert_eq!(body["correctValue"], json!(12.0));
    assert_eq!(body["target"], json!("force"));
    assert_eq!(body["errorType"], json!("math"));
    assert!(body["hint"].is_string());
}

#[tokio::test]
async fn correct_answer_has_null_hint() {
    let (status, body) = solve(
        app(),
        json!({
            "given": {"force": {"value": 12}, "mass": {"value": 4}},
            "target": "acceleration",
            "studentAnswer": {"value": 3, "unit": "m/s^2"}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["correct"], json!(true));
    assert_eq!(body["errorType"], json!("none"));
    assert_eq!(body["hint"], Value::Null);
}

#[tokio::test]
async fn unit_error_wins_over_exact_value() {
    let (status, body) = solve(
        app(),
        json!({
            "given": {"mass": {"value": 4}, "acceleration": {"value": 3}},
            "target": "force",
            "studentAnswer": {"value": 12, "unit": "kg"}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["errorType"], json!("unit"));
    assert_eq!(body["correct"], json!(false));
}

#[tokio::test]
async fn invalid_target_is_400() {
    let (status, body) = solve(
        app(),
        json!({
            "given": {"mass": {"value": 4}, "acceleration": {"value": 3}},
            "target": "energy",
            "studentAnswer": {"value": 12, "unit": "J"}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid target"}));
}

#[tokio::test]
async fn division_by_zero_is_400_without_verdict() {
    let (status, body) = solve(
        app(),
        json!({
            "given": {"force": {"value": 10}, "acceleration": {"value": 0}},
            "target": "mass",
            "studentAnswer": {"value": 1, "unit": "kg"}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        json!("Division by zero - check your input values.")
    );
    assert!(body.get("correct").is_none());
}

#[tokio::test]
async fn missing_input_is_400() {
    let (status, body) = solve(
        app(),
        json!({
            "given": {"force": {"value": 10}},
            "target": "mass",
            "studentAnswer": {"value": 1, "unit": "kg"}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        json!("Force and acceleration are required to compute mass.")
    );
}

#[tokio::test]
async fn malformed_body_is_400() {
    let (status, body) =
        post_body(app(), "{not json".to_string(), Some("application/json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn body_is_json_regardless_of_content_type() {
    let body = json!({
        "given": {"mass": {"value": 4}, "acceleration": {"value": 3}},
        "target": "force",
        "studentAnswer": {"value": 12, "unit": "N"}
    })
    .to_string();

    let (status, verdict) = post_body(app(), body.clone(), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(verdict["correct"], json!(true));
    assert_eq!(verdict["correctValue"], json!(12.0));

    let (status, verdict) = post_body(app(), body, Some("text/plain")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(verdict["errorType"], json!("none"));
}

#[tokio::test]
async fn overflowing_result_is_400() {
    let (status, body) = solve(
        app(),
        json!({
            "given": {"mass": {"value": 1e200}, "acceleration": {"value": 1e200}},
            "target": "force",
            "studentAnswer": {"value": 1, "unit": "N"}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert!(body.get("correctValue").is_none());
}

#[tokio::test]
async fn missing_knowledge_base_is_500() {
    let app = router(Tutor::new(Knowledge::unavailable()));
    let (status, body) = solve(
        app,
        json!({
            "given": {"mass": {"value": 4}, "acceleration": {"value": 3}},
            "target": "force",
            "studentAnswer": {"value": 12, "unit": "N"}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn health_reports_knowledge_status() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], json!("ok"));
    assert_eq!(body["knowledge"]["loaded"], json!(true));
    assert_eq!(body["knowledge"]["id"], json!("newton-second-law"));
}
