//! Fixed-interval task polling.
//!
//! # Responsibilities
//! - Refresh a project's task list on a fixed interval
//! - Publish snapshots to watchers over a watch channel
//! - Keep polling through upstream errors; stop only on shutdown

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tokio::time;

use crate::api::client::DashboardClient;
use crate::api::types::Task;
use crate::observability::metrics;

/// Latest task list; None until the first successful refresh.
pub type TaskSnapshot = Option<Vec<Task>>;

/// Polls the tasks feed for one project and publishes snapshots.
pub struct TaskMonitor {
    client: Arc<DashboardClient>,
    project_name: String,
    interval: Duration,
    tx: watch::Sender<TaskSnapshot>,
}

impl TaskMonitor {
    /// Create a monitor and the receiver side of its snapshot channel.
    pub fn new(
        client: Arc<DashboardClient>,
        project_name: impl Into<String>,
        interval: Duration,
    ) -> (Self, watch::Receiver<TaskSnapshot>) {
        let (tx, rx) = watch::channel(None);
        let monitor = Self {
            client,
            project_name: project_name.into(),
            interval,
            tx,
        };
        (monitor, rx)
    }

    /// Poll until shutdown. The first refresh happens immediately.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            project = %self.project_name,
            interval = ?self.interval,
            "Task monitor starting"
        );

        let mut ticker = time::interval(self.interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.refresh().await;
                }
                _ = shutdown.recv() => {
                    tracing::info!(
                        project = %self.project_name,
                        "Task monitor received shutdown signal, exiting loop"
                    );
                    break;
                }
            }
        }
    }

    async fn refresh(&self) {
        match self.client.tasks(&self.project_name).await {
            Ok(tasks) => {
                metrics::record_poll_cycle(true);
                self.tx.send_if_modified(|current| {
                    if current.as_ref() == Some(&tasks) {
                        return false;
                    }
                    *current = Some(tasks);
                    true
                });
            }
            Err(e) => {
                metrics::record_poll_cycle(false);
                tracing::warn!(
                    project = %self.project_name,
                    error = %e,
                    "Task refresh failed, keeping last snapshot"
                );
            }
        }
    }
}
