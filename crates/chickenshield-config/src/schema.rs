//! Configuration schema definitions.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub limits: LimitsConfig,

    #[serde(default)]
    pub webmail: WebmailConfig,

    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// External AI endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: None,
            model: default_model(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.groq.com/openai/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

/// Character budgets per pipeline stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Text read from a page or mail body.
    #[serde(default = "default_page_text_chars")]
    pub page_text_chars: usize,

    /// Body embedded in the analysis prompt.
    #[serde(default = "default_request_body_chars")]
    pub request_body_chars: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            page_text_chars: default_page_text_chars(),
            request_body_chars: default_request_body_chars(),
        }
    }
}

fn default_page_text_chars() -> usize {
    15_000
}

fn default_request_body_chars() -> usize {
    10_000
}

/// Webmail detection and extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebmailConfig {
    /// Host fragment identifying the webmail app.
    #[serde(default = "default_webmail_host")]
    pub host: String,

    #[serde(default = "default_subject_selector")]
    pub subject_selector: String,

    #[serde(default = "default_sender_selector")]
    pub sender_selector: String,

    #[serde(default = "default_body_selector")]
    pub body_selector: String,

    /// Attribute on the sender element carrying the address.
    #[serde(default = "default_sender_address_attribute")]
    pub sender_address_attribute: String,

    /// Quiet period before a burst of DOM mutations counts as settled.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for WebmailConfig {
    fn default() -> Self {
        Self {
            host: default_webmail_host(),
            subject_selector: default_subject_selector(),
            sender_selector: default_sender_selector(),
            body_selector: default_body_selector(),
            sender_address_attribute: default_sender_address_attribute(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_webmail_host() -> String {
    "mail.google.com".to_string()
}

fn default_subject_selector() -> String {
    ".hP".to_string()
}

fn default_sender_selector() -> String {
    ".gD".to_string()
}

fn default_body_selector() -> String {
    ".a3s".to_string()
}

fn default_sender_address_attribute() -> String {
    "email".to_string()
}

fn default_debounce_ms() -> u64 {
    1000
}

/// Browser attachment over the DevTools protocol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    #[serde(default = "default_browser_endpoint")]
    pub endpoint: String,

    /// How often to look for new or navigated tabs.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            endpoint: default_browser_endpoint(),
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

fn default_browser_endpoint() -> String {
    "http://localhost:9222".to_string()
}

fn default_poll_interval_secs() -> u64 {
    2
}

/// Persisted results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            history_limit: default_history_limit(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".chickenshield"))
        .unwrap_or_else(|| PathBuf::from(".chickenshield"))
}

fn default_history_limit() -> usize {
    10
}

/// Dashboard server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_dashboard_host")]
    pub host: String,

    #[serde(default = "default_dashboard_port")]
    pub port: u16,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            host: default_dashboard_host(),
            port: default_dashboard_port(),
        }
    }
}

fn default_dashboard_host() -> String {
    "127.0.0.1".to_string()
}

fn default_dashboard_port() -> u16 {
    5173
}

impl DashboardConfig {
    /// Base URL the dashboard is reachable at.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}
