//! 外呼接口集成测试

mod common;

use std::net::SocketAddr;
use std::sync::Arc;

use glamour_voice::{create_router, CallProvider, ProviderKind};
use tokio::time::Duration;

use common::{test_state, ScriptedProvider};

// 启动测试服务器
async fn spawn_server(providers: Vec<Arc<dyn CallProvider>>) -> SocketAddr {
    let app = create_router(test_state(providers));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // 等待服务器启动
    tokio::time::sleep(Duration::from_millis(100)).await;
    addr
}

#[tokio::test]
async fn test_trigger_call_uses_primary() {
    let vonage = ScriptedProvider::accepting(ProviderKind::Vonage);
    let twilio = ScriptedProvider::accepting(ProviderKind::Twilio);
    let addr = spawn_server(vec![vonage.clone(), twilio.clone()]).await;

    let response = reqwest::Client::new()
        .post(format!("http://{}/trigger-call", addr))
        .json(&serde_json::json!({ "phone": "098765 43210" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let json: serde_json::Value = response.json().await.unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["provider"], "vonage");
    assert_eq!(json["call_id"], "vonage-0001");
    assert_eq!(json["message"], "AI call initiated to +919876543210");

    assert_eq!(vonage.call_count(), 1);
    assert_eq!(twilio.call_count(), 0);
    assert_eq!(
        vonage.last_number.lock().unwrap().as_deref(),
        Some("+919876543210")
    );
}

#[tokio::test]
async fn test_trigger_call_falls_back() {
    let vonage = ScriptedProvider::failing(ProviderKind::Vonage);
    let twilio = ScriptedProvider::accepting(ProviderKind::Twilio);
    let addr = spawn_server(vec![vonage.clone(), twilio.clone()]).await;

    let response = reqwest::Client::new()
        .post(format!("http://{}/trigger-call", addr))
        .json(&serde_json::json!({ "phone": "+1 (415) 555-0100" }))
        .send()
        .await
        .unwrap();

    let json: serde_json::Value = response.json().await.unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["provider"], "twilio");
    assert_eq!(vonage.call_count(), 1);
    assert_eq!(twilio.call_count(), 1);
    assert_eq!(
        twilio.last_number.lock().unwrap().as_deref(),
        Some("+14155550100")
    );
}

#[tokio::test]
async fn test_trigger_call_all_fail() {
    let addr = spawn_server(vec![
        ScriptedProvider::failing(ProviderKind::Vonage),
        ScriptedProvider::failing(ProviderKind::Twilio),
    ])
    .await;

    let response = reqwest::Client::new()
        .post(format!("http://{}/trigger-call", addr))
        .json(&serde_json::json!({ "phone": "9876543210" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let json: serde_json::Value = response.json().await.unwrap();
    assert_eq!(json["success"], false);
    assert!(json["message"].as_str().unwrap().starts_with("Failed to initiate call."));
    assert!(json.get("provider").is_none());
}

#[tokio::test]
async fn test_trigger_call_without_providers() {
    let addr = spawn_server(Vec::new()).await;

    let response = reqwest::Client::new()
        .post(format!("http://{}/trigger-call", addr))
        .json(&serde_json::json!({ "phone": "9876543210" }))
        .send()
        .await
        .unwrap();

    let json: serde_json::Value = response.json().await.unwrap();
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_trigger_call_rejects_bad_input() {
    let twilio = ScriptedProvider::accepting(ProviderKind::Twilio);
    let addr = spawn_server(vec![twilio.clone()]).await;
    let client = reqwest::Client::new();
    let url = format!("http://{}/trigger-call", addr);

    for body in [
        serde_json::json!({}),
        serde_json::json!({ "phone": "   " }),
        serde_json::json!({ "phone": "call me" }),
    ] {
        let response = client.post(&url).json(&body).send().await.unwrap();
        assert_eq!(response.status(), 400, "body: {}", body);
        let json: serde_json::Value = response.json().await.unwrap();
        assert!(json["error"].is_string());
    }

    let response = client
        .post(&url)
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    assert_eq!(twilio.call_count(), 0);
}

#[tokio::test]
async fn test_cors_preflight() {
    let addr = spawn_server(Vec::new()).await;

    let response = reqwest::Client::new()
        .request(reqwest::Method::OPTIONS, format!("http://{}/trigger-call", addr))
        .header("origin", "https://demo.example")
        .header("access-control-request-method", "POST")
        .send()
        .await
        .unwrap();

    assert!(response.status().is_success());
    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_some());
}
