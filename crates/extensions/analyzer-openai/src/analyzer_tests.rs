use super::*;
use chickenshield_protocols::{SenderReputation, Verdict};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn description() -> ContentDescription {
    ContentDescription::website("https://paypa1-login.com", "Log in", "Enter your password", 15_000)
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "model": "llama-3.3-70b-versatile",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

fn analyzer(server: &MockServer) -> OpenAiCompatAnalyzer {
    OpenAiCompatAnalyzer::new("gsk-test".to_string(), format!("{}/v1/chat/completions", server.uri()))
}

#[test]
fn test_analyzer_id() {
    let analyzer = OpenAiCompatAnalyzer::new("k".to_string(), "http://localhost".to_string());
    assert_eq!(analyzer.id(), "openai-compat");
}

#[test]
fn test_from_config_requires_key() {
    let config = ProviderConfig::default();
    assert!(matches!(
        OpenAiCompatAnalyzer::from_config(&config, 10_000),
        Err(AnalysisError::MissingApiKey)
    ));

    let config = ProviderConfig {
        api_key: Some(String::new()),
        ..Default::default()
    };
    assert!(OpenAiCompatAnalyzer::from_config(&config, 10_000).is_err());
}

#[test]
fn test_from_config() {
    let config = ProviderConfig {
        api_key: Some("gsk-test".to_string()),
        model: "llama-3.1-8b-instant".to_string(),
        ..Default::default()
    };
    let analyzer = OpenAiCompatAnalyzer::from_config(&config, 500).unwrap();
    assert_eq!(analyzer.model, "llama-3.1-8b-instant");
    assert_eq!(analyzer.body_cap, 500);
    assert_eq!(analyzer.api_url, config.api_url);
}

#[test]
fn test_build_request() {
    let analyzer = OpenAiCompatAnalyzer::new("k".to_string(), "http://localhost".to_string());
    let request = analyzer.build_request(&description());
    assert_eq!(request.model, "llama-3.3-70b-versatile");
    assert_eq!(request.messages.len(), 2);
    assert_eq!(request.messages[0].role, "system");
    assert_eq!(request.messages[0].content, SYSTEM_MESSAGE);
    assert!(request.messages[1].content.contains("URL/SENDER: https://paypa1-login.com"));
    assert_eq!(request.response_format.format_type, "json_object");
}

#[tokio::test]
async fn test_analyze_success() {
    let server = MockServer::start().await;
    let reply = json!({
        "content_type": "website",
        "sender_reputation": "low",
        "social_engineering_indicators": ["urgency", "impersonation"],
        "technical_indicators": ["spoofed_domain"],
        "risk_score": 85,
        "verdict": "dangerous",
        "explanation_technical": "Typosquatted domain.",
        "explanation_simple": "A wolf dressed as grandma."
    })
    .to_string();

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", "Bearer gsk-test"))
        .and(body_partial_json(json!({
            "model": "llama-3.3-70b-versatile",
            "response_format": {"type": "json_object"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(&reply)))
        .expect(1)
        .mount(&server)
        .await;

    let assessment = analyzer(&server).analyze(&description()).await.unwrap();
    assert_eq!(assessment.risk_score, 85);
    assert_eq!(assessment.verdict, Verdict::Dangerous);
    assert_eq!(assessment.sender_reputation, SenderReputation::Low);
    assert_eq!(assessment.technical_indicators, vec!["spoofed_domain"]);
    assert_eq!(assessment.explanation_simple, "A wolf dressed as grandma.");
}

#[tokio::test]
async fn test_analyze_api_errors() {
    for status in [400u16, 401, 429, 500, 503] {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(status).set_body_string("upstream says no"))
            .expect(1)
            .mount(&server)
            .await;

        match analyzer(&server).analyze(&description()).await {
            Err(AnalysisError::Api { status: got, message }) => {
                assert_eq!(got, status);
                assert_eq!(message, "upstream says no");
            }
            other => panic!("status {}: unexpected result {:?}", status, other),
        }
    }
}

#[tokio::test]
async fn test_analyze_network_error() {
    let analyzer = OpenAiCompatAnalyzer::new("k".to_string(), "http://127.0.0.1:1/v1/chat/completions".to_string());
    let result = analyzer.analyze(&description()).await;
    assert!(matches!(result, Err(AnalysisError::Network(_))));
}

#[tokio::test]
async fn test_analyze_no_choices() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let result = analyzer(&server).analyze(&description()).await;
    assert!(matches!(result, Err(AnalysisError::EmptyResponse(_))));
}

#[tokio::test]
async fn test_analyze_non_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let result = analyzer(&server).analyze(&description()).await;
    assert!(matches!(result, Err(AnalysisError::MalformedReply(_))));
}

#[tokio::test]
async fn test_analyze_unparsable_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("```json\n{oops\n```")))
        .mount(&server)
        .await;

    let result = analyzer(&server).analyze(&description()).await;
    assert!(matches!(result, Err(AnalysisError::MalformedReply(_))));
}

#[tokio::test]
async fn test_analyze_non_object_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("[1, 2, 3]")))
        .mount(&server)
        .await;

    let result = analyzer(&server).analyze(&description()).await;
    assert!(matches!(result, Err(AnalysisError::MalformedReply(_))));
}

#[tokio::test]
async fn test_analyze_lenient_fields() {
    let server = MockServer::start().await;
    let reply = r#"{"risk_score": "150", "verdict": "catastrophic"}"#;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(reply)))
        .mount(&server)
        .await;

    let assessment = analyzer(&server).analyze(&description()).await.unwrap();
    assert_eq!(assessment.risk_score, 150);
    assert_eq!(assessment.verdict, Verdict::Unknown);
    assert!(assessment.social_engineering_indicators.is_empty());
}
