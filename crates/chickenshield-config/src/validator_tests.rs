use super::*;

fn valid_config() -> Config {
    let mut config = Config::default();
    config.provider.api_key = Some("gsk-test".to_string());
    config
}

#[test]
fn test_valid_config() {
    let result = ConfigValidator::validate(&valid_config());
    assert!(result.is_valid(), "errors: {:?}", result.errors);
    assert!(result.warnings.is_empty());
}

#[test]
fn test_missing_api_key() {
    let result = ConfigValidator::validate(&Config::default());
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "provider.api_key"));
}

#[test]
fn test_empty_api_key() {
    let mut config = valid_config();
    config.provider.api_key = Some(String::new());
    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "provider.api_key"));
}

#[test]
fn test_invalid_api_url() {
    let mut config = valid_config();
    config.provider.api_url = "not a url".to_string();
    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "provider.api_url"));
}

#[test]
fn test_zero_caps() {
    let mut config = valid_config();
    config.limits.page_text_chars = 0;
    config.limits.request_body_chars = 0;
    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "limits.page_text_chars"));
    assert!(result.errors.iter().any(|e| e.path == "limits.request_body_chars"));
}

#[test]
fn test_request_cap_above_page_cap_warns() {
    let mut config = valid_config();
    config.limits.request_body_chars = 20_000;
    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "limits.request_body_chars"));
}

#[test]
fn test_zero_debounce() {
    let mut config = valid_config();
    config.webmail.debounce_ms = 0;
    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "webmail.debounce_ms"));
}

#[test]
fn test_empty_selector() {
    let mut config = valid_config();
    config.webmail.body_selector = String::new();
    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "webmail.body_selector"));
}

#[test]
fn test_invalid_browser_endpoint() {
    let mut config = valid_config();
    config.browser.endpoint = "localhost 9222".to_string();
    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "browser.endpoint"));
}

#[test]
fn test_zero_history_limit() {
    let mut config = valid_config();
    config.store.history_limit = 0;
    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "store.history_limit"));
}

#[test]
fn test_large_history_limit_warns() {
    let mut config = valid_config();
    config.store.history_limit = 500;
    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "store.history_limit"));
}

#[test]
fn test_zero_dashboard_port() {
    let mut config = valid_config();
    config.dashboard.port = 0;
    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "dashboard.port"));
}

#[test]
fn test_error_display() {
    let err = ValidationError::new("dashboard.port", "Port cannot be 0");
    assert_eq!(err.to_string(), "dashboard.port: Port cannot be 0");
}
