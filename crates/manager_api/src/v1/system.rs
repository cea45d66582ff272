//! `/system`: host hardware summary.

use serde_json::Value;

use crate::{
    client::{ApiClient, RequestOptions},
    error::ApiError,
    transport::HttpTransport,
};

const SYSTEM_PATH: &str = "/system";

/// Hardware summary with `gpu`, `cpu`, `memory` and `disk` sections.
///
/// The section layout follows the node's probes and is passed through untyped.
pub type SystemInfo = Value;

/// Typed calls against `/system`.
#[derive(Debug, Clone, Copy)]
pub struct SystemApi<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: HttpTransport> SystemApi<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// Reads the hardware summary.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`].
    pub async fn get_system_info(&self) -> Result<SystemInfo, ApiError> {
        self.client.get(SYSTEM_PATH, &RequestOptions::default()).await
    }
}
