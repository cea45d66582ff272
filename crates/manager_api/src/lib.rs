//! Typed client for the node manager's versioned HTTP API.
//!
//! Request and response bodies go through a numeric-safe JSON [`codec`], so balances and counters
//! larger than 2^53 survive unchanged. Every failed call is reduced to one [`ApiError`] by the
//! [`ErrorClassifier`], which also notifies the optional [`ErrorHooks`]. The network sits behind
//! the [`HttpTransport`] seam; [`ReqwestTransport`] is the production implementation.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod classify;
pub mod client;
pub mod codec;
pub mod config;
pub mod error;
pub mod transport;
pub mod v1;

pub use classify::{ErrorClassifier, ErrorHooks, OutcomeHook, ServerErrorHook};
pub use client::{
    ApiClient, ApiClientConfig, RequestOptions, API_VERSION_SEGMENT, MANAGER_PATH_SEGMENT,
};
pub use codec::{CodecError, JSON_CONTENT_TYPE};
pub use config::{ConfigError, ManagerConfig, DEFAULT_REQUEST_TIMEOUT_MS};
pub use error::{ApiError, ApiErrorKind};
pub use transport::{
    HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportError,
    TransportFuture,
};
pub use v1::{
    AccountApi, AccountInfo, AccountKeyInput, CommonResponse, NodeAction, NodeApi, NodeState,
    NodeStatus, SystemApi, SystemInfo, TaskApi, TaskRunningStatus, TaskStats, TxStatus,
};
