use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - History path is non-empty when failure tracking is enabled
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.engine.failure_tracking && config.history.path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "history.path cannot be empty when failure tracking is enabled".to_string(),
        ));
    }

    Ok(())
}
