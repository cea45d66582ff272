//! Ready-made API outcome hooks and client construction.

use leptos::logging;
use manager_api::{ApiClient, ApiClientConfig, ConfigError, ErrorHooks, ManagerConfig};

/// Hooks that log forbidden, server and unknown outcomes.
pub fn logging_error_hooks() -> ErrorHooks {
    ErrorHooks::default()
        .on_forbidden(|| logging::warn!("manager api: forbidden"))
        .on_server(|detail| match detail {
            Some(detail) => logging::error!("manager api: server error: {detail}"),
            None => logging::error!("manager api: server error"),
        })
        .on_unknown(|| logging::warn!("manager api: request failed without a usable response"))
}

/// Builds a client from the embedded configuration with [`logging_error_hooks`].
///
/// # Errors
///
/// Returns a [`ConfigError`] if the embedded configuration is invalid or the base URL cannot be
/// resolved.
pub fn manager_client() -> Result<ApiClient, ConfigError> {
    let config = ManagerConfig::embedded()?;
    ApiClient::new(ApiClientConfig::from_manager_config(&config).with_hooks(logging_error_hooks()))
}
