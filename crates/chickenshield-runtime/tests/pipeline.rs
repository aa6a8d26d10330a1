//! Extraction-to-store pipeline against a mocked analysis endpoint.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{header, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

use chickenshield_analyzer_openai::OpenAiCompatAnalyzer;
use chickenshield_core::MessageSender;
use chickenshield_protocols::{ContentDescription, ExtensionMessage, ResultStore, Verdict};
use chickenshield_runtime::{BackgroundService, SharedBadge};
use chickenshield_store::MemoryResultStore;

fn completion(content: serde_json::Value) -> serde_json::Value {
    json!({
        "choices": [{"index": 0, "message": {"role": "assistant", "content": content.to_string()}}]
    })
}

async fn service_for(server: &MockServer) -> (Arc<BackgroundService>, Arc<MemoryResultStore>, SharedBadge) {
    let analyzer = OpenAiCompatAnalyzer::new("gsk-test".to_string(), format!("{}/openai/v1/chat/completions", server.uri()));
    let store = Arc::new(MemoryResultStore::new());
    let badge = SharedBadge::new();
    let service = BackgroundService::new(Arc::new(analyzer), store.clone(), Arc::new(badge.clone()));
    (Arc::new(service), store, badge)
}

#[tokio::test]
async fn dangerous_website_sets_last_and_badge() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("Authorization", "Bearer gsk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(json!({
            "content_type": "website",
            "risk_score": 85,
            "verdict": "dangerous",
            "technical_indicators": ["spoofed_domain"],
            "explanation_technical": "Credential harvesting form on a lookalike domain."
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let (service, store, badge) = service_for(&server).await;
    let (sender, rx) = MessageSender::channel();
    tokio::spawn(service.run(rx));

    let description = ContentDescription::website("https://paypa1.com/login", "PayPal", "Enter your password", 15_000);
    let response = sender.request(ExtensionMessage::analyze(description)).await.unwrap();
    let report = response.into_report().unwrap();

    assert_eq!(report.risk_score(), 85);
    assert_eq!(report.verdict(), Verdict::Dangerous);
    assert_eq!(report.source, "https://paypa1.com/login");
    assert!(!report.timestamp.is_empty());

    assert_eq!(store.get_last().await.unwrap(), Some(report));
    let current = badge.current().unwrap();
    assert_eq!(current.text, "BAD");
    assert_eq!(current.color, "red");
}

#[tokio::test]
async fn upstream_error_yields_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let (service, store, badge) = service_for(&server).await;
    let description = ContentDescription::email("Bob <bob@x.io>", "Hi", "Lunch?", 15_000);
    let report = service.analyze_content(&description).await;

    assert!(report.error);
    assert_eq!(report.risk_score(), 0);
    assert_eq!(report.verdict(), Verdict::Unknown);
    assert_eq!(store.history().await.unwrap().len(), 1);
    assert_eq!(badge.current().unwrap().text, "?");
}

#[tokio::test]
async fn malformed_reply_yields_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "I think this is fine!"}}]
        })))
        .mount(&server)
        .await;

    let (service, _store, _badge) = service_for(&server).await;
    let description = ContentDescription::website("https://example.com", "Example", "", 15_000);
    let report = service.analyze_content(&description).await;

    assert!(report.error);
    assert_eq!(report.verdict(), Verdict::Unknown);
}
