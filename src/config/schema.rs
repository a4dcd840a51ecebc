//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the client.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the webhook client.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Upstream origin and namespace layout.
    pub upstream: UpstreamConfig,

    /// Route registrations pinning path prefixes to a namespace.
    pub routes: Vec<RouteConfig>,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Task polling settings.
    pub polling: PollingConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            upstream: UpstreamConfig::default(),
            routes: default_route_pins(),
            timeouts: TimeoutConfig::default(),
            polling: PollingConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Upstream webhook host configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Origin the webhook namespaces live under (scheme + host).
    pub origin: String,

    /// Namespace serving activated production workflows.
    pub primary_namespace: String,

    /// Namespace serving test-mode workflows.
    pub fallback_namespace: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            origin: "https://ieee.anjoostech.cfd".to_string(),
            primary_namespace: "webhook".to_string(),
            fallback_namespace: "webhook-test".to_string(),
        }
    }
}

/// Which namespace a registered route is served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    Primary,
    Fallback,
}

impl Namespace {
    /// Stable label for logging and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Namespace::Primary => "primary",
            Namespace::Fallback => "fallback",
        }
    }
}

/// Route registration pinning a path prefix to its home namespace.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Path prefix to match, relative to the namespace (no leading slash).
    pub path_prefix: String,

    /// Namespace requests under this prefix are sent to.
    pub namespace: Namespace,
}

/// Routes the upstream currently only serves from the test namespace.
/// Dropping a pin here moves the route onto the two-tier fallback policy.
pub(crate) fn default_route_pins() -> Vec<RouteConfig> {
    ["create", "create/selection", "tasks", "members"]
        .iter()
        .map(|prefix| RouteConfig {
            path_prefix: (*prefix).to_string(),
            namespace: Namespace::Fallback,
        })
        .collect()
}

/// Timeout configuration for upstream requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            request_secs: 30,
        }
    }
}

/// Task polling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Seconds between task refreshes.
    pub interval_secs: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self { interval_secs: 4 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9091".to_string(),
        }
    }
}
