//! Payload and response types for the dashboard operations.
//!
//! Field spellings follow the upstream workflows exactly: submissions and
//! tasks use camelCase, member rows use PascalCase.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::transport::types::TransportError;

/// Project submission sent for AI evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSubmission {
    pub project_name: String,
    pub problem_statement: String,
    pub purpose: String,
    pub expected_output: String,
    pub target_audience: String,
    #[serde(default)]
    pub extra_add_ons: String,
}

/// Wire shape of the create response: an array whose first element carries
/// the report under `output`.
#[derive(Debug, Deserialize)]
pub(crate) struct ReportEnvelope {
    #[serde(default)]
    pub output: Option<EvaluationReport>,
}

/// Structured AI evaluation, one section per key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    #[serde(flatten)]
    pub sections: BTreeMap<String, ReportSection>,
}

/// One evaluation section: prose, a group of named entries, or whatever
/// else the workflow decided to emit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReportSection {
    Text(String),
    Group(BTreeMap<String, String>),
    Other(serde_json::Value),
}

/// Reviewer decision on an evaluated project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Proceed,
    Reject,
}

/// Body of the selection confirmation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionPayload {
    pub project_name: String,
    pub decision: Decision,
}

/// A pipeline task as reported by the tasks feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
}

/// Task lifecycle state. Statuses this client does not know yet are
/// carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Queued,
    Running,
    Completed,
    Failed,
    #[serde(untagged)]
    Other(String),
}

/// A project member row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Member {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub description: String,
    /// Years of experience.
    #[serde(default)]
    pub experience: u32,
}

/// Accept whatever the members feed returns: from an array, keep rows that
/// deserialize cleanly and carry a name; anything else is an empty roster.
pub fn parse_members(raw: serde_json::Value) -> Vec<Member> {
    let rows = match raw {
        serde_json::Value::Array(rows) => rows,
        _ => return Vec::new(),
    };

    rows.into_iter()
        .filter_map(|row| serde_json::from_value::<Member>(row).ok())
        .filter(|member| !member.name.trim().is_empty())
        .collect()
}

/// Errors from the typed dashboard operations.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("failed to encode request payload: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("{operation} returned {status}")]
    Status {
        operation: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("failed to decode {operation} response: {source}")]
    Decode {
        operation: &'static str,
        source: reqwest::Error,
    },

    #[error("evaluation response carried no output section")]
    MissingReport,

    #[error("a task id is required to {operation}")]
    MissingTaskId { operation: &'static str },
}

/// Result alias for dashboard operations.
pub type ApiResult<T> = Result<T, ApiError>;
