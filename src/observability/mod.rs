//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Structured logging via tracing; request IDs appear as event fields
//! - Metrics are cheap (atomic increments) and safe to record before init
//! - The Prometheus exporter is opt-in; a one-shot CLI run usually skips it

pub mod logging;
pub mod metrics;
