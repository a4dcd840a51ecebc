//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Shutdown (shutdown.rs):
//!     Ctrl+C / caller signal → broadcast to subscribers
//!     → monitors finish their current cycle and exit
//! ```
//!
//! # Design Decisions
//! - One broadcast channel fans out to every long-running task
//! - Triggering is idempotent; triggering with no subscribers is fine
//! - Subscribers decide their own drain behavior (finish tick, then stop)

pub mod shutdown;

pub use shutdown::Shutdown;
