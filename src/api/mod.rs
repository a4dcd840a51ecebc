//! Typed dashboard operations.
//!
//! # Data Flow
//! ```text
//! caller → DashboardClient op
//!     → types.rs (serialize payload)
//!     → transport::send(path, options)
//!     → require 2xx, decode JSON into typed responses
//!     → members flow additionally memoized in cache::ResourceCache
//! ```
//!
//! # Design Decisions
//! - Operations own their paths and payload shapes; the transport stays
//!   byte-oriented and policy-only
//! - Non-2xx responses become typed errors here, not in the transport
//! - Response parsing is tolerant where the upstream is loosest
//!   (member rows, unknown task statuses)

pub mod client;
pub mod types;

pub use client::DashboardClient;
pub use types::{
    ApiError, ApiResult, Decision, EvaluationReport, Member, ProjectSubmission, ReportSection,
    Task, TaskStatus,
};
