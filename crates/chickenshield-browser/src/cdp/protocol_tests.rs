use super::*;

#[test]
fn test_cdp_request_serialize() {
    let req = CdpRequest {
        id: 1,
        method: "Runtime.evaluate".to_string(),
        params: Some(serde_json::json!({"expression": "document.title"})),
        session_id: Some("S1".to_string()),
    };
    let json = serde_json::to_value(&req).unwrap();
    assert_eq!(json["method"], "Runtime.evaluate");
    assert_eq!(json["sessionId"], "S1");
}

#[test]
fn test_cdp_request_omits_empty_fields() {
    let req = CdpRequest {
        id: 2,
        method: "Target.getTargets".to_string(),
        params: None,
        session_id: None,
    };
    let json = serde_json::to_string(&req).unwrap();
    assert!(!json.contains("params"));
    assert!(!json.contains("sessionId"));
}

#[test]
fn test_cdp_event_deserialize() {
    let json = r#"{"method": "Runtime.bindingCalled", "params": {"name": "x", "payload": ""}, "sessionId": "S1"}"#;
    let resp: CdpResponse = serde_json::from_str(json).unwrap();
    assert!(resp.id.is_none());
    assert_eq!(resp.method.as_deref(), Some("Runtime.bindingCalled"));
    assert_eq!(resp.session_id.as_deref(), Some("S1"));
}

#[test]
fn test_cdp_error_deserialize() {
    let json = r#"{"id": 3, "error": {"code": -32000, "message": "No target with given id"}}"#;
    let resp: CdpResponse = serde_json::from_str(json).unwrap();
    let error = resp.error.unwrap();
    assert_eq!(error.code, -32000);
    assert_eq!(error.message, "No target with given id");
}

#[test]
fn test_page_info_is_tab() {
    let json = r#"{
        "id": "page123",
        "type": "page",
        "title": "Inbox",
        "url": "https://mail.google.com/mail/u/0/#inbox",
        "webSocketDebuggerUrl": "ws://localhost:9222/devtools/page/page123"
    }"#;
    let info: PageInfo = serde_json::from_str(json).unwrap();
    assert!(info.is_tab());

    let worker = PageInfo {
        page_type: "service_worker".to_string(),
        ..info.clone()
    };
    assert!(!worker.is_tab());

    let devtools = PageInfo {
        url: "devtools://devtools/bundled/inspector.html".to_string(),
        ..info
    };
    assert!(!devtools.is_tab());
}

#[test]
fn test_browser_version_deserialize() {
    let json = r#"{
        "Browser": "Chrome/120.0.6099.109",
        "Protocol-Version": "1.3",
        "User-Agent": "Mozilla/5.0",
        "webSocketDebuggerUrl": "ws://localhost:9222/devtools/browser/abc"
    }"#;
    let version: BrowserVersion = serde_json::from_str(json).unwrap();
    assert_eq!(version.protocol_version, "1.3");
    assert!(version.web_socket_debugger_url.starts_with("ws://"));
}

#[test]
fn test_single_page_print_options() {
    let options = PrintOptions::single_page(960.0, 1920.0);
    assert_eq!(options.paper_width, 10.0);
    assert_eq!(options.paper_height, 20.0);
    assert_eq!(options.page_ranges, "1");

    let json = serde_json::to_value(&options).unwrap();
    assert_eq!(json["printBackground"], true);
    assert_eq!(json["paperWidth"], 10.0);
    assert_eq!(json["marginTop"], 0.0);
}

#[test]
fn test_single_page_print_options_minimum_size() {
    let options = PrintOptions::single_page(0.0, 10.0);
    assert_eq!(options.paper_width, 1.0);
    assert_eq!(options.paper_height, 1.0);
}
