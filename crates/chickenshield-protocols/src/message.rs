//! Messages exchanged between the page side and the background service.

use serde::{Deserialize, Serialize};

use crate::types::{ContentDescription, RiskReport};

/// Request sent to the background service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum ExtensionMessage {
    /// Analyze a freshly scraped description.
    #[serde(rename = "ANALYZE_CONTENT")]
    AnalyzeContent { data: ContentDescription },

    /// Ask for the stored last result.
    #[serde(rename = "GET_LAST_RESULT")]
    GetLastResult,
}

impl ExtensionMessage {
    pub fn analyze(data: ContentDescription) -> Self {
        ExtensionMessage::AnalyzeContent { data }
    }

    pub fn action(&self) -> &'static str {
        match self {
            ExtensionMessage::AnalyzeContent { .. } => "ANALYZE_CONTENT",
            ExtensionMessage::GetLastResult => "GET_LAST_RESULT",
        }
    }
}

/// Reply from the background service.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MessageResponse {
    Analyzed { status: &'static str, result: RiskReport },
    LastResult(Option<RiskReport>),
}

impl MessageResponse {
    pub fn analyzed(result: RiskReport) -> Self {
        MessageResponse::Analyzed {
            status: "success",
            result,
        }
    }

    /// The report carried by this response, if any.
    pub fn into_report(self) -> Option<RiskReport> {
        match self {
            MessageResponse::Analyzed { result, .. } => Some(result),
            MessageResponse::LastResult(report) => report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ContentKind;

    #[test]
    fn test_analyze_message_wire_format() {
        let json = r#"{
            "action": "ANALYZE_CONTENT",
            "data": {"type": "website", "source": "http://example.com", "title": "Example", "content": "Buy now"}
        }"#;
        let msg: ExtensionMessage = serde_json::from_str(json).unwrap();
        match msg {
            ExtensionMessage::AnalyzeContent { data } => {
                assert_eq!(data.kind, ContentKind::Website);
                assert_eq!(data.body, "Buy now");
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_get_last_result_wire_format() {
        let msg: ExtensionMessage = serde_json::from_str(r#"{"action": "GET_LAST_RESULT"}"#).unwrap();
        assert_eq!(msg, ExtensionMessage::GetLastResult);
        assert_eq!(msg.action(), "GET_LAST_RESULT");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["action"], "GET_LAST_RESULT");
    }

    #[test]
    fn test_unknown_action_rejected() {
        let result = serde_json::from_str::<ExtensionMessage>(r#"{"action": "SCAN_ALL"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_analyzed_response_shape() {
        let report = RiskReport {
            timestamp: "t".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(MessageResponse::analyzed(report)).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["result"]["timestamp"], "t");
    }

    #[test]
    fn test_empty_last_result_is_null() {
        let json = serde_json::to_value(MessageResponse::LastResult(None)).unwrap();
        assert!(json.is_null());
        assert!(MessageResponse::LastResult(None).into_report().is_none());
    }
}
