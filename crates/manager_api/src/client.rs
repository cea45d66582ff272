//! Verb-level client for the manager's versioned HTTP API.

use std::time::Duration;

use leptos::logging;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use crate::{
    classify::{ErrorClassifier, ErrorHooks},
    codec::{self, JSON_CONTENT_TYPE},
    config::{ConfigError, ManagerConfig},
    error::ApiError,
    transport::{HttpMethod, HttpRequest, HttpTransport, ReqwestTransport},
};

/// Path segment under which the manager is served when the page shares its origin.
pub const MANAGER_PATH_SEGMENT: &str = "/manager";
/// Path segment of the API version this client speaks.
pub const API_VERSION_SEGMENT: &str = "/v1";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Per-call extras: query parameters and headers.
pub struct RequestOptions {
    /// Query parameters appended to the URL.
    pub query: Vec<(String, String)>,
    /// Extra request headers.
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    /// Adds a query parameter.
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Adds a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

#[derive(Debug, Clone)]
/// Everything an [`ApiClient`] is built from.
pub struct ApiClientConfig {
    /// Manager base URL; empty selects `<page origin>/manager`.
    pub base_url: String,
    /// Deadline applied to every request.
    pub request_timeout: Duration,
    /// Outcome notifications.
    pub hooks: ErrorHooks,
    /// Origin used for the same-origin fallback. Defaults to the current page's origin.
    pub page_origin: Option<String>,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self::from_manager_config(&ManagerConfig::default())
    }
}

impl ApiClientConfig {
    /// Starts from a [`ManagerConfig`] with no hooks.
    pub fn from_manager_config(config: &ManagerConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            request_timeout: config.request_timeout(),
            hooks: ErrorHooks::default(),
            page_origin: None,
        }
    }

    /// Replaces the hooks.
    pub fn with_hooks(mut self, hooks: ErrorHooks) -> Self {
        self.hooks = hooks;
        self
    }

    /// Sets the origin used when `base_url` is empty.
    pub fn with_page_origin(mut self, origin: impl Into<String>) -> Self {
        self.page_origin = Some(origin.into());
        self
    }
}

/// Client for the manager's `/v1` API.
///
/// Every failure comes back as an [`ApiError`] produced by the [`ErrorClassifier`]. The client
/// holds no per-request state, so concurrent calls are independent.
#[derive(Debug, Clone)]
pub struct ApiClient<T = ReqwestTransport> {
    transport: T,
    classifier: ErrorClassifier,
    base_url: String,
    v1_base_url: String,
    request_timeout: Duration,
}

impl ApiClient<ReqwestTransport> {
    /// Builds a client that talks over `reqwest`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the base URL cannot be resolved.
    pub fn new(config: ApiClientConfig) -> Result<Self, ConfigError> {
        Self::with_transport(config, ReqwestTransport::new())
    }
}

impl<T: HttpTransport> ApiClient<T> {
    /// Builds a client over a caller-supplied transport.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the base URL cannot be resolved.
    pub fn with_transport(config: ApiClientConfig, transport: T) -> Result<Self, ConfigError> {
        let base_url = resolve_base_url(&config.base_url, config.page_origin.as_deref())?;
        let v1_base_url = format!("{base_url}{API_VERSION_SEGMENT}");
        Ok(Self {
            transport,
            classifier: ErrorClassifier::new(config.hooks),
            base_url,
            v1_base_url,
            request_timeout: config.request_timeout,
        })
    }

    /// Normalized manager base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Versioned base every request path is resolved against.
    pub fn v1_base_url(&self) -> &str {
        &self.v1_base_url
    }

    /// Deadline applied to every request.
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Transport the client sends through.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `GET path`.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`] for any non-200 outcome.
    pub async fn get(&self, path: &str, opts: &RequestOptions) -> Result<Value, ApiError> {
        self.execute(HttpMethod::Get, path, None, opts).await
    }

    /// `POST path` with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`] for any non-200 outcome.
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        opts: &RequestOptions,
    ) -> Result<Value, ApiError> {
        let body = self.encode_body(body)?;
        self.execute(HttpMethod::Post, path, Some(body), opts).await
    }

    /// `PUT path` with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`] for any non-200 outcome.
    pub async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        opts: &RequestOptions,
    ) -> Result<Value, ApiError> {
        let body = self.encode_body(body)?;
        self.execute(HttpMethod::Put, path, Some(body), opts).await
    }

    /// `DELETE path`.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`] for any non-200 outcome.
    pub async fn delete(&self, path: &str, opts: &RequestOptions) -> Result<Value, ApiError> {
        self.execute(HttpMethod::Delete, path, None, opts).await
    }

    /// [`Self::get`], decoded into `R`.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`]; a body that does not match `R` is `Unknown`.
    pub async fn get_as<R: DeserializeOwned>(
        &self,
        path: &str,
        opts: &RequestOptions,
    ) -> Result<R, ApiError> {
        let value = self.get(path, opts).await?;
        self.typed(path, value)
    }

    /// [`Self::post`], decoded into `R`.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`]; a body that does not match `R` is `Unknown`.
    pub async fn post_as<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        opts: &RequestOptions,
    ) -> Result<R, ApiError> {
        let value = self.post(path, body, opts).await?;
        self.typed(path, value)
    }

    /// [`Self::put`], decoded into `R`.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`]; a body that does not match `R` is `Unknown`.
    pub async fn put_as<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        opts: &RequestOptions,
    ) -> Result<R, ApiError> {
        let value = self.put(path, body, opts).await?;
        self.typed(path, value)
    }

    fn encode_body<B: Serialize + ?Sized>(&self, body: &B) -> Result<String, ApiError> {
        codec::encode(body).map_err(|err| {
            logging::warn!("manager request body not sent: {err}");
            self.classifier.classify_no_response()
        })
    }

    fn typed<R: DeserializeOwned>(&self, path: &str, value: Value) -> Result<R, ApiError> {
        codec::from_value(value).map_err(|err| {
            logging::warn!("manager response for `{path}` has an unexpected shape: {err}");
            self.classifier.classify_no_response()
        })
    }

    async fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<String>,
        opts: &RequestOptions,
    ) -> Result<Value, ApiError> {
        let url = match self.request_url(path, &opts.query) {
            Ok(url) => url,
            Err(err) => {
                logging::warn!("manager request {method} `{path}` not sent: {err}");
                return Err(self.classifier.classify_no_response());
            }
        };

        let mut headers = vec![("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string())];
        headers.extend(opts.headers.iter().cloned());
        let request = HttpRequest {
            method,
            url,
            headers,
            body,
            timeout: self.request_timeout,
        };

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(err) => {
                logging::warn!("manager request {method} `{path}` got no response: {err}");
                return Err(self.classifier.classify_no_response());
            }
        };

        if response.status == 200 {
            return codec::decode(&response.body).map_err(|err| {
                logging::warn!("manager response for {method} `{path}` is not JSON: {err}");
                self.classifier.classify_no_response()
            });
        }

        // Error pages are not always JSON; classify them on status alone.
        let body = codec::decode(&response.body).unwrap_or_else(|_| Value::Object(Map::new()));
        Err(self.classifier.classify(response.status, &body))
    }

    fn request_url(&self, path: &str, query: &[(String, String)]) -> Result<String, String> {
        let path = path.trim_start_matches('/');
        let joined = if path.is_empty() {
            self.v1_base_url.clone()
        } else {
            format!("{}/{path}", self.v1_base_url)
        };
        if query.is_empty() {
            return Ok(joined);
        }

        let mut url = reqwest::Url::parse(&joined).map_err(|e| e.to_string())?;
        url.query_pairs_mut().extend_pairs(query);
        Ok(url.into())
    }
}

/// Normalizes the configured base URL, falling back to `<origin>/manager` when it is empty.
fn resolve_base_url(configured: &str, page_origin: Option<&str>) -> Result<String, ConfigError> {
    let configured = configured.trim();
    let base = if configured.is_empty() {
        let origin = page_origin
            .map(str::to_string)
            .or_else(current_page_origin)
            .ok_or(ConfigError::MissingPageOrigin)?;
        format!("{}{MANAGER_PATH_SEGMENT}", origin.trim().trim_end_matches('/'))
    } else {
        configured.to_string()
    };
    let base = base.trim_end_matches('/').to_string();

    let parsed = reqwest::Url::parse(&base).map_err(|e| ConfigError::InvalidBaseUrl {
        url: base.clone(),
        reason: e.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidBaseUrl {
            url: base,
            reason: format!("unsupported scheme `{}`", parsed.scheme()),
        });
    }
    Ok(base)
}

#[cfg(target_arch = "wasm32")]
fn current_page_origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}

#[cfg(not(target_arch = "wasm32"))]
fn current_page_origin() -> Option<String> {
    None
}
