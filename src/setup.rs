//! Shared construction of config, store and background service.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use chickenshield_analyzer_openai::OpenAiCompatAnalyzer;
use chickenshield_config::{Config, ConfigLoader, ConfigValidator};
use chickenshield_runtime::{BackgroundService, LogBadge};
use chickenshield_store::FileResultStore;

/// Load the config at `path`, or defaults when the file does not exist.
pub(crate) fn load_config(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    let path = PathBuf::from(ConfigLoader::expand_path(&path.to_string_lossy()));
    Ok(ConfigLoader::load_or_default(&path)?)
}

/// Validate `config`, logging warnings. Provider errors only count when the
/// command talks to the analysis endpoint.
pub(crate) fn validate(config: &Config, needs_provider: bool) -> Result<(), Box<dyn std::error::Error>> {
    let result = ConfigValidator::validate(config);
    for warning in &result.warnings {
        warn!("Config: {}: {}", warning.path, warning.message);
    }

    let errors: Vec<String> = result
        .errors
        .iter()
        .filter(|e| needs_provider || !e.path.starts_with("provider."))
        .map(ToString::to_string)
        .collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(format!("Invalid configuration:\n  {}", errors.join("\n  ")).into())
    }
}

pub(crate) async fn open_store(config: &Config) -> Result<Arc<FileResultStore>, Box<dyn std::error::Error>> {
    let store = FileResultStore::open_with_limit(&config.store.data_dir, config.store.history_limit).await?;
    Ok(Arc::new(store))
}

/// Background service backed by the configured endpoint and `store`.
pub(crate) fn build_service(
    config: &Config,
    store: Arc<FileResultStore>,
) -> Result<Arc<BackgroundService>, Box<dyn std::error::Error>> {
    let analyzer = OpenAiCompatAnalyzer::from_config(&config.provider, config.limits.request_body_chars)?;
    info!(
        "Analyzing with {} at {}, results in {}",
        config.provider.model,
        config.provider.api_url,
        config.store.data_dir.display()
    );
    Ok(Arc::new(BackgroundService::new(
        Arc::new(analyzer),
        store,
        Arc::new(LogBadge),
    )))
}
