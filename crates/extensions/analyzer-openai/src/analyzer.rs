//! OpenAI-compatible analyzer.

use async_trait::async_trait;
use tracing::debug;

use chickenshield_config::ProviderConfig;
use chickenshield_protocols::{
    AnalysisError, Analyzer, ContentDescription, ModelAssessment, REQUEST_BODY_CAP,
};

use crate::api::{ApiMessage, ApiRequest, ApiResponse, ResponseFormat};
use crate::prompt::{build_prompt, SYSTEM_MESSAGE};

const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Sends one chat completion per description and parses the reply as a
/// [`ModelAssessment`].
pub struct OpenAiCompatAnalyzer {
    api_key: String,
    api_url: String,
    model: String,
    body_cap: usize,
    client: reqwest::Client,
}

impl OpenAiCompatAnalyzer {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            api_key,
            api_url,
            model: DEFAULT_MODEL.to_string(),
            body_cap: REQUEST_BODY_CAP,
            client: reqwest::Client::new(),
        }
    }

    /// Build from the `[provider]` section.
    pub fn from_config(config: &ProviderConfig, body_cap: usize) -> Result<Self, AnalysisError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or(AnalysisError::MissingApiKey)?;
        Ok(Self::new(api_key, config.api_url.clone())
            .with_model(config.model.clone())
            .with_body_cap(body_cap))
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn with_body_cap(mut self, body_cap: usize) -> Self {
        self.body_cap = body_cap;
        self
    }

    fn build_request(&self, description: &ContentDescription) -> ApiRequest {
        ApiRequest {
            model: self.model.clone(),
            messages: vec![
                ApiMessage::system(SYSTEM_MESSAGE),
                ApiMessage::user(build_prompt(description, self.body_cap)),
            ],
            response_format: ResponseFormat::json_object(),
        }
    }

    async fn send_request(&self, api_request: &ApiRequest) -> Result<reqwest::Response, AnalysisError> {
        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(api_request)
            .send()
            .await
            .map_err(|e| AnalysisError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            return Err(AnalysisError::Api { status, message: text });
        }

        Ok(response)
    }
}

#[async_trait]
impl Analyzer for OpenAiCompatAnalyzer {
    fn id(&self) -> &str {
        "openai-compat"
    }

    async fn analyze(&self, description: &ContentDescription) -> Result<ModelAssessment, AnalysisError> {
        let api_request = self.build_request(description);
        debug!(model = %self.model, source = %description.source, "Requesting analysis");

        let response = self.send_request(&api_request).await?;
        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::MalformedReply(e.to_string()))?;

        let content = api_response
            .first_content()
            .ok_or_else(|| AnalysisError::EmptyResponse("no message content in first choice".to_string()))?;

        Ok(ModelAssessment::from_model_reply(content)?)
    }
}

#[cfg(test)]
#[path = "analyzer_tests.rs"]
mod tests;
