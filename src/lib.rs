//! Resilient client library for the ProMag webhook upstream.

pub mod api;
pub mod cache;
pub mod config;
pub mod lifecycle;
pub mod monitor;
pub mod observability;
pub mod transport;

pub use api::client::DashboardClient;
pub use config::schema::ClientConfig;
pub use lifecycle::Shutdown;
pub use monitor::tasks::TaskMonitor;
pub use transport::failover::WebhookTransport;
