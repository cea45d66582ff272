//! `/tasks`: task execution statistics.

use serde::Deserialize;

use crate::{
    client::{ApiClient, RequestOptions},
    error::ApiError,
    transport::HttpTransport,
};

const TASKS_PATH: &str = "/tasks";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Whether the node is executing a task.
pub enum TaskRunningStatus {
    /// A task is executing.
    Running,
    /// The node is active but has no task.
    Idle,
    /// The node is not active.
    Stopped,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// Task counters.
pub struct TaskStats {
    /// Current execution status.
    pub status: TaskRunningStatus,
    /// Tasks finished since local midnight.
    pub num_today: u64,
    /// Tasks finished overall.
    pub num_total: u64,
}

/// Typed calls against `/tasks`.
#[derive(Debug, Clone, Copy)]
pub struct TaskApi<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: HttpTransport> TaskApi<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// Reads the task counters.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`].
    pub async fn get_task_running_status(&self) -> Result<TaskStats, ApiError> {
        self.client.get_as(TASKS_PATH, &RequestOptions::default()).await
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;
    use crate::v1::test_support::canned_client;

    #[test]
    fn task_stats_decode() {
        let client = canned_client(&[(200, r#"{"status":"idle","num_today":3,"num_total":1204}"#)]);
        let stats = block_on(client.tasks().get_task_running_status()).expect("stats");
        assert_eq!(
            stats,
            TaskStats {
                status: TaskRunningStatus::Idle,
                num_today: 3,
                num_total: 1204,
            }
        );
        assert_eq!(
            client.transport().sent.borrow()[0].url,
            "http://node.local/manager/v1/tasks"
        );
    }
}
