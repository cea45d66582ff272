//! HTTP transport seam between [`crate::ApiClient`] and the network.

use std::{fmt, future::Future, pin::Pin, time::Duration};

use thiserror::Error;

/// Object-safe boxed future used by [`HttpTransport`].
pub type TransportFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// HTTP verbs used by the manager API.
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl HttpMethod {
    /// Upper-case method token.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Fully resolved outbound request.
pub struct HttpRequest {
    /// Verb.
    pub method: HttpMethod,
    /// Absolute URL including any query string.
    pub url: String,
    /// Header name/value pairs.
    pub headers: Vec<(String, String)>,
    /// Encoded body, if the verb carries one.
    pub body: Option<String>,
    /// Deadline for the whole exchange.
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Response status and raw body text.
pub struct HttpResponse {
    /// Status code.
    pub status: u16,
    /// Undecoded body.
    pub body: String,
}

#[derive(Debug, Error)]
/// The exchange produced no response.
pub enum TransportError {
    /// The deadline passed first.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    /// Connection or protocol failure.
    #[error("network failure: {0}")]
    Network(String),
    /// The request could not be built.
    #[error("invalid request: {0}")]
    Request(String),
}

/// Sends one request and yields the response, or why none arrived.
pub trait HttpTransport {
    /// Performs the exchange, honoring `request.timeout`.
    fn send<'a>(
        &'a self,
        request: HttpRequest,
    ) -> TransportFuture<'a, Result<HttpResponse, TransportError>>;
}

#[derive(Debug, Clone, Default)]
/// [`HttpTransport`] backed by `reqwest` (fetch on `wasm32`, hyper elsewhere).
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with a default client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport around an existing client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl HttpTransport for ReqwestTransport {
    fn send<'a>(
        &'a self,
        request: HttpRequest,
    ) -> TransportFuture<'a, Result<HttpResponse, TransportError>> {
        Box::pin(async move {
            let method = match request.method {
                HttpMethod::Get => reqwest::Method::GET,
                HttpMethod::Post => reqwest::Method::POST,
                HttpMethod::Put => reqwest::Method::PUT,
                HttpMethod::Delete => reqwest::Method::DELETE,
            };
            let timeout = request.timeout;
            let mut builder = self
                .client
                .request(method, request.url.as_str())
                .timeout(timeout);
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder
                .send()
                .await
                .map_err(|err| map_reqwest_error(err, timeout))?;
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|err| map_reqwest_error(err, timeout))?;
            Ok(HttpResponse { status, body })
        })
    }
}

fn map_reqwest_error(err: reqwest::Error, timeout: Duration) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(timeout)
    } else if err.is_builder() {
        TransportError::Request(err.to_string())
    } else {
        TransportError::Network(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_tokens_are_upper_case() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Delete.as_str(), "DELETE");
    }

    #[test]
    fn timeout_error_mentions_duration() {
        let err = TransportError::Timeout(Duration::from_millis(1500));
        assert_eq!(err.to_string(), "request timed out after 1.5s");
    }
}
