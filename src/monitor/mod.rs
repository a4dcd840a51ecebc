//! Task polling subsystem.
//!
//! # Data Flow
//! ```text
//! TaskMonitor::run(shutdown)
//!     tick → DashboardClient::tasks(project)
//!         Ok(tasks) → watch channel (publish only when changed)
//!         Err       → warn, last published snapshot stands
//!     shutdown signal → loop exits
//! ```
//!
//! # Design Decisions
//! - A refresh failure never kills the loop; only shutdown does
//! - Watchers see None until the first successful refresh
//! - Snapshots are compared before publishing so watchers only wake on change

pub mod tasks;

pub use tasks::{TaskMonitor, TaskSnapshot};
