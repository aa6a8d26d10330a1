//! Configuration validation.

use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate everything needed to run the scan pipeline.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_provider(config, &mut result);
        Self::validate_limits(config, &mut result);
        Self::validate_webmail(config, &mut result);
        Self::validate_browser(config, &mut result);
        Self::validate_store(config, &mut result);
        Self::validate_dashboard(config, &mut result);

        result
    }

    fn validate_provider(config: &Config, result: &mut ValidationResult) {
        if config.provider.api_key.as_deref().map_or(true, str::is_empty) {
            result.add_error(ValidationError::new(
                "provider.api_key",
                "API key is not set (configure it or export GROQ_API_KEY)",
            ));
        }

        if url::Url::parse(&config.provider.api_url).is_err() {
            result.add_error(ValidationError::new(
                "provider.api_url",
                format!("Invalid URL: {}", config.provider.api_url),
            ));
        }

        if config.provider.model.is_empty() {
            result.add_error(ValidationError::new("provider.model", "Model cannot be empty"));
        }
    }

    fn validate_limits(config: &Config, result: &mut ValidationResult) {
        if config.limits.page_text_chars == 0 {
            result.add_error(ValidationError::new(
                "limits.page_text_chars",
                "page_text_chars must be greater than 0",
            ));
        }

        if config.limits.request_body_chars == 0 {
            result.add_error(ValidationError::new(
                "limits.request_body_chars",
                "request_body_chars must be greater than 0",
            ));
        }

        if config.limits.request_body_chars > config.limits.page_text_chars {
            result.add_warning(ValidationWarning::new(
                "limits.request_body_chars",
                "request_body_chars exceeds page_text_chars and will never apply",
            ));
        }
    }

    fn validate_webmail(config: &Config, result: &mut ValidationResult) {
        if config.webmail.host.is_empty() {
            result.add_error(ValidationError::new("webmail.host", "Host cannot be empty"));
        }

        if config.webmail.debounce_ms == 0 {
            result.add_error(ValidationError::new(
                "webmail.debounce_ms",
                "debounce_ms must be greater than 0",
            ));
        }

        for (path, selector) in [
            ("webmail.subject_selector", &config.webmail.subject_selector),
            ("webmail.body_selector", &config.webmail.body_selector),
        ] {
            if selector.is_empty() {
                result.add_error(ValidationError::new(path, "Selector cannot be empty"));
            }
        }
    }

    fn validate_browser(config: &Config, result: &mut ValidationResult) {
        if url::Url::parse(&config.browser.endpoint).is_err() {
            result.add_error(ValidationError::new(
                "browser.endpoint",
                format!("Invalid URL: {}", config.browser.endpoint),
            ));
        }

        if config.browser.poll_interval_secs == 0 {
            result.add_error(ValidationError::new(
                "browser.poll_interval_secs",
                "poll_interval_secs must be greater than 0",
            ));
        }
    }

    fn validate_store(config: &Config, result: &mut ValidationResult) {
        if config.store.history_limit == 0 {
            result.add_error(ValidationError::new(
                "store.history_limit",
                "history_limit must be greater than 0",
            ));
        }

        if config.store.history_limit > 100 {
            result.add_warning(ValidationWarning::new(
                "store.history_limit",
                "history_limit is very high (>100)",
            ));
        }
    }

    fn validate_dashboard(config: &Config, result: &mut ValidationResult) {
        if config.dashboard.port == 0 {
            result.add_error(ValidationError::new("dashboard.port", "Port cannot be 0"));
        }

        if config.dashboard.host.is_empty() {
            result.add_error(ValidationError::new("dashboard.host", "Host cannot be empty"));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
