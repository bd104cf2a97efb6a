//! Exercises `GatewayClient` against a loopback axum server standing in for the upstream.

use api_client::{Error, FeedbackGateway, GatewayClient};
use app_config::types::GatewaySettings;
use axum::{
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use core_types::{AnalysisBatch, AnalysisTrade};
use serde_json::{json, Value};
use tokio::net::TcpListener;

async fn spawn_upstream(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/v1", addr)
}

fn client(base_url: String) -> GatewayClient {
    GatewayClient::new(&GatewaySettings {
        base_url,
        model: "test-model".to_string(),
        api_key: Some("secret-key".to_string()),
    })
    .unwrap()
}

fn batch() -> AnalysisBatch {
    AnalysisBatch::new(vec![AnalysisTrade {
        crypto_pair: "BTC/USDT".to_string(),
        entry_price: 50000.0,
        stop_loss: 49000.0,
        risk_percent: 1.5,
    }])
    .unwrap()
}

fn status_upstream(status: StatusCode, body: &'static str) -> Router {
    Router::new().route("/v1/chat/completions", post(move || async move { (status, body) }))
}

#[tokio::test]
async fn returns_first_completion_and_sends_credentials() {
    let router = Router::new().route(
        "/v1/chat/completions",
        post(|headers: HeaderMap, Json(body): Json<Value>| async move {
            let auth = headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            let user = body["messages"][1]["content"].as_str().unwrap_or_default().to_string();
            Json(json!({
                "choices": [{
                    "message": {
                        "role": "assistant",
                        "content": format!("{}|{}|{}", auth, body["model"].as_str().unwrap_or_default(), user.contains("Trade 1: BTC/USDT"))
                    }
                }]
            }))
        }),
    );
    let base_url = spawn_upstream(router).await;

    let feedback = client(base_url).request_feedback(&batch()).await.unwrap();
    assert_eq!(feedback, "Bearer secret-key|test-model|true");
}

#[tokio::test]
async fn maps_rate_limit_and_quota() {
    let base_url = spawn_upstream(status_upstream(StatusCode::TOO_MANY_REQUESTS, "{}")).await;
    let err = client(base_url).request_feedback(&batch()).await.unwrap_err();
    assert!(matches!(err, Error::RateLimited));

    let base_url = spawn_upstream(status_upstream(StatusCode::PAYMENT_REQUIRED, "{}")).await;
    let err = client(base_url).request_feedback(&batch()).await.unwrap_err();
    assert!(matches!(err, Error::QuotaExhausted));
}

#[tokio::test]
async fn other_statuses_keep_raw_body_for_logging() {
    let base_url =
        spawn_upstream(status_upstream(StatusCode::INTERNAL_SERVER_ERROR, "internal detail")).await;
    let err = client(base_url).request_feedback(&batch()).await.unwrap_err();
    match err {
        Error::UpstreamStatus { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "internal detail");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn success_without_choices_is_a_failure() {
    let base_url = spawn_upstream(status_upstream(StatusCode::OK, r#"{"choices":[]}"#)).await;
    let err = client(base_url).request_feedback(&batch()).await.unwrap_err();
    assert!(matches!(err, Error::MissingCompletion));

    let base_url = spawn_upstream(status_upstream(StatusCode::OK, "not json")).await;
    let err = client(base_url).request_feedback(&batch()).await.unwrap_err();
    assert!(matches!(err, Error::DeserializationFailed(_)));
}
