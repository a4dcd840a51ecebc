//! Two-tier webhook dispatch with fallback.
//!
//! # Responsibilities
//! - Build namespace URLs from the configured origin
//! - Try the primary namespace first for unpinned paths
//! - On any primary failure, issue exactly one fallback attempt
//! - Send pinned paths straight to their registered namespace
//!
//! # Design Decisions
//! - A 2xx primary response short-circuits; the fallback is never contacted
//! - The fallback response is returned whatever its status; only a
//!   transport-level fallback failure becomes an `Err`
//! - Every dispatch carries a request ID that appears in all its log events

use std::time::{Duration, Instant};

use url::Url;
use uuid::Uuid;

use crate::config::schema::{ClientConfig, Namespace};
use crate::observability::metrics;
use crate::transport::routes::RouteTable;
use crate::transport::types::{RequestOptions, TransportError, TransportResult};

/// Client for one upstream origin hosting a primary and a fallback
/// webhook namespace.
pub struct WebhookTransport {
    /// Shared HTTP client with configured timeouts.
    http: reqwest::Client,
    /// Origin with any trailing slash removed.
    origin: String,
    /// Primary namespace segment (activated workflows).
    primary: String,
    /// Fallback namespace segment (test-mode workflows).
    fallback: String,
    /// Registered path pins.
    routes: RouteTable,
}

impl WebhookTransport {
    /// Build a transport from a validated config.
    pub fn new(config: &ClientConfig) -> TransportResult<Self> {
        let origin_url =
            Url::parse(&config.upstream.origin).map_err(|source| TransportError::InvalidOrigin {
                origin: config.upstream.origin.clone(),
                source,
            })?;
        let origin = origin_url.as_str().trim_end_matches('/').to_string();

        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .build()
            .map_err(TransportError::Client)?;

        Ok(Self {
            http,
            origin,
            primary: config.upstream.primary_namespace.clone(),
            fallback: config.upstream.fallback_namespace.clone(),
            routes: RouteTable::from_config(&config.routes),
        })
    }

    /// Dispatch a request for `path`, applying the namespace policy.
    ///
    /// `path` is relative to the namespace and may carry a query string; it
    /// is forwarded verbatim. The returned response may be non-2xx: callers
    /// that care about status inspect it themselves.
    pub async fn send(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> TransportResult<reqwest::Response> {
        let request_id = Uuid::new_v4();

        if self.routes.resolve(path) == Some(Namespace::Fallback) {
            return self.send_pinned(request_id, path, &options).await;
        }

        let primary_url = self.url_for(&self.primary, path);
        let start = Instant::now();
        let reason = match self.attempt(&primary_url, &options).await {
            Ok(response) if response.status().is_success() => {
                metrics::record_attempt("primary", Some(response.status().as_u16()), start);
                return Ok(response);
            }
            Ok(response) => {
                metrics::record_attempt("primary", Some(response.status().as_u16()), start);
                response.status().to_string()
            }
            Err(e) => {
                metrics::record_attempt("primary", None, start);
                format!("transport error: {}", e)
            }
        };

        tracing::warn!(
            request_id = %request_id,
            path = %path,
            reason = %reason,
            "Primary namespace failed, attempting fallback"
        );

        let fallback_url = self.url_for(&self.fallback, path);
        let start = Instant::now();
        let response = match self.attempt(&fallback_url, &options).await {
            Ok(response) => response,
            Err(source) => {
                metrics::record_attempt("fallback", None, start);
                metrics::record_fallback("error");
                return Err(TransportError::Send {
                    url: fallback_url,
                    source,
                });
            }
        };
        metrics::record_attempt("fallback", Some(response.status().as_u16()), start);

        if response.status().is_success() {
            metrics::record_fallback("rescued");
            tracing::debug!(
                request_id = %request_id,
                path = %path,
                "Fallback namespace rescued the request"
            );
        } else {
            metrics::record_fallback("failed");
            tracing::error!(
                request_id = %request_id,
                path = %path,
                status = %response.status(),
                "Fallback namespace also failed"
            );
        }

        Ok(response)
    }

    /// Single-attempt dispatch for a path pinned to the fallback namespace.
    async fn send_pinned(
        &self,
        request_id: Uuid,
        path: &str,
        options: &RequestOptions,
    ) -> TransportResult<reqwest::Response> {
        let url = self.url_for(&self.fallback, path);
        tracing::debug!(
            request_id = %request_id,
            path = %path,
            "Route pinned to fallback namespace"
        );

        let start = Instant::now();
        match self.attempt(&url, options).await {
            Ok(response) => {
                metrics::record_attempt("fallback", Some(response.status().as_u16()), start);
                if !response.status().is_success() {
                    tracing::warn!(
                        request_id = %request_id,
                        path = %path,
                        status = %response.status(),
                        "Pinned route returned an error status"
                    );
                }
                Ok(response)
            }
            Err(source) => {
                metrics::record_attempt("fallback", None, start);
                Err(TransportError::Send { url, source })
            }
        }
    }

    /// One raw attempt: descriptor in, response or transport error out.
    async fn attempt(
        &self,
        url: &str,
        options: &RequestOptions,
    ) -> Result<reqwest::Response, reqwest::Error> {
        let mut request = self
            .http
            .request(options.method.clone(), url)
            .headers(options.headers.clone());
        if let Some(body) = &options.body {
            request = request.body(body.clone());
        }
        request.send().await
    }

    fn url_for(&self, namespace: &str, path: &str) -> String {
        format!("{}/{}/{}", self.origin, namespace, path)
    }

    /// Origin this transport talks to.
    pub fn origin(&self) -> &str {
        &self.origin
    }
}

impl std::fmt::Debug for WebhookTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookTransport")
            .field("origin", &self.origin)
            .field("primary", &self.primary)
            .field("fallback", &self.fallback)
            .field("routes", &self.routes.len())
            .finish()
    }
}
