//! `/node`: lifecycle status and control actions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    client::{ApiClient, RequestOptions},
    error::ApiError,
    transport::HttpTransport,
    v1::CommonResponse,
};

const NODE_PATH: &str = "/node";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Lifecycle stage reported by the node.
pub enum NodeStatus {
    /// Downloading models and joining the network.
    Initializing,
    /// Accepting tasks.
    Running,
    /// Joined but not accepting tasks.
    Paused,
    /// Not joined.
    Stopped,
    /// Halted by a failure; see the status message.
    Error,
    /// Pause requested, waiting for the current task to finish.
    PendingPause,
    /// Stop requested, waiting for the current task to finish.
    PendingStop,
}

impl NodeStatus {
    /// Whether the node is working or about to stop working.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Running | Self::PendingPause | Self::PendingStop)
    }

    /// Whether a state change is in flight.
    pub fn is_pending(self) -> bool {
        matches!(self, Self::PendingPause | Self::PendingStop)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Status of the node's last chain transaction.
pub enum TxStatus {
    /// The transaction failed; see `tx_error`.
    Error,
    /// The transaction is awaiting confirmation.
    Pending,
    /// No transaction in flight.
    #[default]
    #[serde(rename = "")]
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// Node status snapshot.
pub struct NodeState {
    /// Lifecycle stage.
    pub status: NodeStatus,
    /// Status message, set on error.
    pub message: String,
    /// Last transaction status.
    pub tx_status: TxStatus,
    /// Last transaction failure text.
    pub tx_error: String,
    /// Progress text while initializing.
    #[serde(default)]
    pub init_message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Control command accepted by `POST /node`.
pub enum NodeAction {
    /// Join the network.
    Start,
    /// Leave the network.
    Stop,
    /// Stop accepting tasks.
    Pause,
    /// Accept tasks again.
    Resume,
}

impl NodeAction {
    /// Wire token.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Pause => "pause",
            Self::Resume => "resume",
        }
    }
}

impl fmt::Display for NodeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize)]
struct NodeActionInput {
    action: NodeAction,
}

/// Typed calls against `/node`.
#[derive(Debug, Clone, Copy)]
pub struct NodeApi<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: HttpTransport> NodeApi<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// Reads the node status.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`].
    pub async fn get_node_status(&self) -> Result<NodeState, ApiError> {
        self.client.get_as(NODE_PATH, &RequestOptions::default()).await
    }

    /// Sends a control action.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`]; an action the node cannot take now is `Validation`.
    pub async fn send_node_action(&self, action: NodeAction) -> Result<CommonResponse, ApiError> {
        self.client
            .post_as(NODE_PATH, &NodeActionInput { action }, &RequestOptions::default())
            .await
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;
    use crate::{error::ApiErrorKind, transport::HttpMethod, v1::test_support::canned_client};

    #[test]
    fn status_snapshot_decodes_empty_tx_status() {
        let client = canned_client(&[(
            200,
            r#"{"status":"pending_pause","message":"","tx_status":"","tx_error":""}"#,
        )]);
        let state = block_on(client.node().get_node_status()).expect("state");
        assert_eq!(state.status, NodeStatus::PendingPause);
        assert!(state.status.is_active());
        assert!(state.status.is_pending());
        assert_eq!(state.tx_status, TxStatus::None);
        assert!(state.init_message.is_empty());
    }

    #[test]
    fn unknown_status_is_an_unknown_error() {
        let client = canned_client(&[(
            200,
            r#"{"status":"sleeping","message":"","tx_status":"","tx_error":""}"#,
        )]);
        let err = block_on(client.node().get_node_status()).expect_err("bad status");
        assert_eq!(err.kind(), ApiErrorKind::Unknown);
    }

    #[test]
    fn action_is_posted_as_token() {
        let client = canned_client(&[(200, r#"{"success":true}"#)]);
        let resp = block_on(client.node().send_node_action(NodeAction::Resume)).expect("sent");
        assert!(resp.success);

        let sent = client.transport().sent.borrow();
        assert_eq!(sent[0].method, HttpMethod::Post);
        assert_eq!(sent[0].url, "http://node.local/manager/v1/node");
        assert_eq!(sent[0].body.as_deref(), Some(r#"{"action":"resume"}"#));
    }

    #[test]
    fn rejected_action_surfaces_detail() {
        let client = canned_client(&[(400, r#"{"detail":"Private key has not been set."}"#)]);
        let err = block_on(client.node().send_node_action(NodeAction::Start)).expect_err("400");
        assert_eq!(err.kind(), ApiErrorKind::Validation);
        assert_eq!(err.detail_text(), Some("Private key has not been set."));
        assert_eq!(NodeAction::Stop.to_string(), "stop");
    }
}
