//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate the upstream origin URL and namespace names
//! - Validate value ranges (timeouts > 0, poll interval > 0)
//! - Detect unusable route pins
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ClientConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use url::Url;

use crate::config::schema::ClientConfig;

/// A single semantic problem found in a config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    InvalidOrigin { origin: String, reason: String },
    InvalidNamespace { field: &'static str, reason: String },
    IdenticalNamespaces(String),
    InvalidRoutePrefix { index: usize, reason: String },
    ZeroTimeout { field: &'static str },
    ZeroPollInterval,
    InvalidMetricsAddress(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidOrigin { origin, reason } => {
                write!(f, "upstream origin {:?} is invalid: {}", origin, reason)
            }
            ValidationError::InvalidNamespace { field, reason } => {
                write!(f, "{} is invalid: {}", field, reason)
            }
            ValidationError::IdenticalNamespaces(ns) => {
                write!(f, "primary and fallback namespaces are both {:?}", ns)
            }
            ValidationError::InvalidRoutePrefix { index, reason } => {
                write!(f, "routes[{}] path_prefix is invalid: {}", index, reason)
            }
            ValidationError::ZeroTimeout { field } => {
                write!(f, "timeouts.{} must be greater than zero", field)
            }
            ValidationError::ZeroPollInterval => {
                write!(f, "polling.interval_secs must be greater than zero")
            }
            ValidationError::InvalidMetricsAddress(addr) => {
                write!(f, "metrics address {:?} is not a valid socket address", addr)
            }
        }
    }
}

/// Check a parsed config for semantic problems, collecting every error.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match Url::parse(&config.upstream.origin) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                errors.push(ValidationError::InvalidOrigin {
                    origin: config.upstream.origin.clone(),
                    reason: format!("unsupported scheme {:?}", url.scheme()),
                });
            }
        }
        Err(e) => errors.push(ValidationError::InvalidOrigin {
            origin: config.upstream.origin.clone(),
            reason: e.to_string(),
        }),
    }

    check_namespace(
        "upstream.primary_namespace",
        &config.upstream.primary_namespace,
        &mut errors,
    );
    check_namespace(
        "upstream.fallback_namespace",
        &config.upstream.fallback_namespace,
        &mut errors,
    );
    if config.upstream.primary_namespace == config.upstream.fallback_namespace {
        errors.push(ValidationError::IdenticalNamespaces(
            config.upstream.primary_namespace.clone(),
        ));
    }

    for (index, route) in config.routes.iter().enumerate() {
        if route.path_prefix.is_empty() {
            errors.push(ValidationError::InvalidRoutePrefix {
                index,
                reason: "empty prefix".to_string(),
            });
        } else if route.path_prefix.starts_with('/') {
            errors.push(ValidationError::InvalidRoutePrefix {
                index,
                reason: "prefixes are relative, drop the leading slash".to_string(),
            });
        }
    }

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::ZeroTimeout {
            field: "connect_secs",
        });
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout {
            field: "request_secs",
        });
    }
    if config.polling.interval_secs == 0 {
        errors.push(ValidationError::ZeroPollInterval);
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_namespace(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    if value.is_empty() {
        errors.push(ValidationError::InvalidNamespace {
            field,
            reason: "empty namespace".to_string(),
        });
    } else if value.contains('/') {
        errors.push(ValidationError::InvalidNamespace {
            field,
            reason: "namespaces are single path segments".to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{Namespace, RouteConfig};

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&ClientConfig::default()).is_ok());
    }

    #[test]
    fn collects_every_error() {
        let mut config = ClientConfig::default();
        config.upstream.origin = "not a url".to_string();
        config.upstream.primary_namespace = "webhook-test".to_string();
        config.timeouts.request_secs = 0;
        config.polling.interval_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn rejects_absolute_route_prefixes() {
        let mut config = ClientConfig::default();
        config.routes.push(RouteConfig {
            path_prefix: "/task".to_string(),
            namespace: Namespace::Primary,
        });

        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(
            errors[0],
            ValidationError::InvalidRoutePrefix { index: 4, .. }
        ));
    }

    #[test]
    fn rejects_non_http_origin() {
        let mut config = ClientConfig::default();
        config.upstream.origin = "ftp://files.example.com".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::InvalidOrigin { .. }));
    }

    #[test]
    fn rejects_metrics_address_only_when_enabled() {
        let mut config = ClientConfig::default();
        config.observability.metrics_address = "nowhere".to_string();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors[0],
            ValidationError::InvalidMetricsAddress("nowhere".to_string())
        );
    }
}
