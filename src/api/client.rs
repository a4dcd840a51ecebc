//! High-level client for the dashboard's webhook operations.
//!
//! # Responsibilities
//! - Own the paths and payload shapes of every dashboard operation
//! - Turn non-2xx responses into typed errors
//! - Memoize the member roster behind a single-slot cache

use std::sync::Arc;

use reqwest::Method;
use url::form_urlencoded;

use crate::api::types::{
    parse_members, ApiError, ApiResult, Decision, EvaluationReport, Member, ProjectSubmission,
    ReportEnvelope, SelectionPayload, Task,
};
use crate::cache::ResourceCache;
use crate::config::schema::ClientConfig;
use crate::transport::failover::WebhookTransport;
use crate::transport::types::{RequestOptions, TransportResult};

/// Typed operations against the project dashboard's webhook upstream.
pub struct DashboardClient {
    transport: WebhookTransport,
    members: ResourceCache<Vec<Member>>,
}

impl DashboardClient {
    /// Build a client from a validated config.
    pub fn new(config: &ClientConfig) -> TransportResult<Self> {
        Ok(Self {
            transport: WebhookTransport::new(config)?,
            members: ResourceCache::new("members"),
        })
    }

    /// Submit a project for AI evaluation and return the structured report.
    pub async fn submit_project(
        &self,
        submission: &ProjectSubmission,
    ) -> ApiResult<EvaluationReport> {
        let options = RequestOptions::json(Method::POST, submission)?;
        let response = self.transport.send("create", options).await?;
        let response = require_success("submit project", response)?;

        let envelopes: Vec<ReportEnvelope> =
            response.json().await.map_err(|source| ApiError::Decode {
                operation: "submit project",
                source,
            })?;

        envelopes
            .into_iter()
            .next()
            .and_then(|envelope| envelope.output)
            .ok_or(ApiError::MissingReport)
    }

    /// Send the reviewer's decision for an evaluated project.
    pub async fn confirm_selection(
        &self,
        project_name: &str,
        decision: Decision,
    ) -> ApiResult<()> {
        let payload = SelectionPayload {
            project_name: project_name.to_string(),
            decision,
        };
        let options = RequestOptions::json(Method::POST, &payload)?;
        let response = self.transport.send("create/selection", options).await?;
        require_success("confirm selection", response)?;
        Ok(())
    }

    /// Fetch the current task list for a project.
    pub async fn tasks(&self, project_name: &str) -> ApiResult<Vec<Task>> {
        let path = format!("tasks?{}", query("projectName", project_name));
        let response = self
            .transport
            .send(&path, RequestOptions::default())
            .await?;
        let response = require_success("fetch tasks", response)?;

        response.json().await.map_err(|source| ApiError::Decode {
            operation: "fetch tasks",
            source,
        })
    }

    /// Fetch the member roster, memoized for the life of this client.
    pub async fn members(&self) -> ApiResult<Arc<Vec<Member>>> {
        self.members
            .get_or_fetch(|| async {
                let response = self
                    .transport
                    .send("members", RequestOptions::default())
                    .await?;
                let response = require_success("fetch members", response)?;

                let raw: serde_json::Value =
                    response.json().await.map_err(|source| ApiError::Decode {
                        operation: "fetch members",
                        source,
                    })?;
                Ok(parse_members(raw))
            })
            .await
    }

    /// Drop the memoized roster; the next call fetches fresh.
    pub fn invalidate_members(&self) {
        self.members.invalidate();
    }

    /// Create a task.
    pub async fn create_task(&self, task: &Task) -> ApiResult<()> {
        let options = RequestOptions::json(Method::POST, task)?;
        let response = self.transport.send("task", options).await?;
        require_success("create task", response)?;
        Ok(())
    }

    /// Update a task. The task must carry its id.
    pub async fn update_task(&self, task: &Task) -> ApiResult<()> {
        if task.id.is_none() {
            return Err(ApiError::MissingTaskId {
                operation: "update a task",
            });
        }
        let options = RequestOptions::json(Method::PUT, task)?;
        let response = self.transport.send("task", options).await?;
        require_success("update task", response)?;
        Ok(())
    }

    /// Delete a task by id.
    pub async fn delete_task(&self, task_id: &str) -> ApiResult<()> {
        let path = format!("task?{}", query("id", task_id));
        let response = self
            .transport
            .send(&path, RequestOptions::new(Method::DELETE))
            .await?;
        require_success("delete task", response)?;
        Ok(())
    }

    /// Mark a task finished.
    pub async fn finalize_task(&self, task_id: &str) -> ApiResult<()> {
        let payload = serde_json::json!({ "id": task_id });
        let options = RequestOptions::json(Method::POST, &payload)?;
        let response = self.transport.send("task/finale", options).await?;
        require_success("finalize task", response)?;
        Ok(())
    }

    /// The underlying transport.
    pub fn transport(&self) -> &WebhookTransport {
        &self.transport
    }
}

impl std::fmt::Debug for DashboardClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardClient")
            .field("transport", &self.transport)
            .field("members", &self.members)
            .finish()
    }
}

fn require_success(
    operation: &'static str,
    response: reqwest::Response,
) -> ApiResult<reqwest::Response> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status {
            operation,
            status: response.status(),
        })
    }
}

fn query(key: &str, value: &str) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair(key, value)
        .finish()
}
