//! Transport request descriptors and error types.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::Serialize;
use thiserror::Error;

pub use crate::config::schema::Namespace;

/// Everything that defines an upstream request except which namespace
/// serves it. The transport forwards these bytes unchanged to every
/// attempt it makes.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// HTTP method (GET when omitted).
    pub method: Method,

    /// Headers to send verbatim.
    pub headers: HeaderMap,

    /// Raw body bytes, if any.
    pub body: Option<Vec<u8>>,
}

impl RequestOptions {
    /// A bodyless request with the given method.
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// A JSON request: serializes the payload and sets the content type.
    pub fn json<T: Serialize>(method: Method, payload: &T) -> Result<Self, serde_json::Error> {
        let body = serde_json::to_vec(payload)?;
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(Self {
            method,
            headers,
            body: Some(body),
        })
    }

    /// Add a header, replacing any previous value for the same name.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Set the raw body bytes.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Errors surfaced by the webhook transport.
///
/// A failed primary attempt is not an error here: the transport swallows it
/// and engages the fallback. Only a transport-level failure on the final
/// attempt reaches the caller.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid upstream origin {origin:?}: {source}")]
    InvalidOrigin {
        origin: String,
        source: url::ParseError,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Send {
        url: String,
        source: reqwest::Error,
    },
}

/// Result alias for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_are_a_bare_get() {
        let options = RequestOptions::default();
        assert_eq!(options.method, Method::GET);
        assert!(options.headers.is_empty());
        assert!(options.body.is_none());
    }

    #[test]
    fn json_options_set_content_type_and_body() {
        #[derive(Serialize)]
        struct Payload {
            id: &'static str,
        }

        let options =
            RequestOptions::json(Method::POST, &Payload { id: "t-1" }).expect("serializable");
        assert_eq!(options.method, Method::POST);
        assert_eq!(
            options.headers.get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(options.body.as_deref(), Some(br#"{"id":"t-1"}"#.as_slice()));
    }

    #[test]
    fn header_builder_replaces_existing_value() {
        let options = RequestOptions::new(Method::GET)
            .header(HeaderName::from_static("x-caller"), HeaderValue::from_static("a"))
            .header(HeaderName::from_static("x-caller"), HeaderValue::from_static("b"));
        assert_eq!(options.headers.get("x-caller").unwrap(), "b");
    }
}
