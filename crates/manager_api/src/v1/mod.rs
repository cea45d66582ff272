//! Typed resources of the manager's `/v1` API.
//!
//! Each resource borrows an [`ApiClient`] and maps one backend router onto typed calls. Errors
//! pass through unchanged from the client, so callers still match on [`crate::ApiErrorKind`].

use serde::{Deserialize, Serialize};

use crate::{client::ApiClient, transport::HttpTransport};

pub mod account;
pub mod node;
pub mod system;
pub mod task;

pub use account::{AccountApi, AccountInfo, AccountKeyInput};
pub use node::{NodeAction, NodeApi, NodeState, NodeStatus, TxStatus};
pub use system::{SystemApi, SystemInfo};
pub use task::{TaskApi, TaskRunningStatus, TaskStats};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Acknowledgement returned by mutating endpoints.
pub struct CommonResponse {
    /// Whether the backend accepted the command.
    #[serde(default = "accepted")]
    pub success: bool,
    /// Optional human-readable note.
    #[serde(default)]
    pub message: Option<String>,
}

fn accepted() -> bool {
    true
}

impl<T: HttpTransport> ApiClient<T> {
    /// Wallet account resource (`/account`).
    pub fn account(&self) -> AccountApi<'_, T> {
        AccountApi::new(self)
    }

    /// Node lifecycle resource (`/node`).
    pub fn node(&self) -> NodeApi<'_, T> {
        NodeApi::new(self)
    }

    /// Host hardware resource (`/system`).
    pub fn system(&self) -> SystemApi<'_, T> {
        SystemApi::new(self)
    }

    /// Task statistics resource (`/tasks`).
    pub fn tasks(&self) -> TaskApi<'_, T> {
        TaskApi::new(self)
    }
}
