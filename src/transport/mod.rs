//! Upstream webhook transport.
//!
//! # Data Flow
//! ```text
//! caller (path + RequestOptions)
//!     → routes.rs: is the path pinned to a namespace?
//!         pinned to fallback → one attempt against fallback, returned as-is
//!         otherwise          → failover.rs two-tier policy:
//!             primary 2xx                        → return response
//!             primary non-2xx or transport error → warn, one fallback attempt
//!                 fallback response  → returned regardless of status
//!                 fallback transport → error propagates to caller
//! ```
//!
//! # Design Decisions
//! - The same method, headers, and body bytes go to both attempts
//! - At most two upstream attempts per call; no backoff, no retry budget
//! - A non-2xx primary falls back regardless of status class (4xx included)
//! - Paths are opaque; the transport never parses or validates them

pub mod failover;
pub mod routes;
pub mod types;

pub use failover::WebhookTransport;
pub use routes::RouteTable;
pub use types::{RequestOptions, TransportError, TransportResult};
