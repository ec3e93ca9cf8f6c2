// src/error.rs
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

use crate::validation::ValidationError;

/// Error payload PowerDNS attaches to failed API calls.
#[derive(Debug, Deserialize)]
pub struct ErrorResponseBody {
    pub error: Option<String>,
    pub errors: Option<Vec<String>>,
}

#[derive(Debug, Error)]
pub enum PdnsError {
    /// 4xx: the request itself was rejected.
    #[error("code={status} {url}: {message}")]
    Client {
        status: u16,
        url: String,
        message: String,
    },

    /// 5xx, transport failure, timeout or unparsable response.
    #[error("service unavailable ({}) {url}: {message}", status_label(.status))]
    Service {
        url: String,
        status: Option<u16>,
        message: String,
    },

    #[error("zone {zone} was deleted through this handle")]
    StaleReference { zone: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("invalid record data: {0}")]
    InvalidRecord(String),

    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PdnsError {
    pub fn client(status: u16, url: impl Into<String>, message: impl Into<String>) -> Self {
        PdnsError::Client {
            status,
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn service(url: impl Into<String>, status: Option<u16>, message: impl Into<String>) -> Self {
        PdnsError::Service {
            url: url.into(),
            status,
            message: message.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PdnsError::Io {
            path: path.into(),
            source,
        }
    }

    /// HTTP status carried by the error, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            PdnsError::Client { status, .. } => Some(*status),
            PdnsError::Service { status, .. } => *status,
            _ => None,
        }
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self, PdnsError::Client { .. })
    }

    pub fn is_service_error(&self) -> bool {
        matches!(self, PdnsError::Service { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PdnsError::Client { status: 404, .. })
    }
}

fn status_label(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!("code={code}"),
        None => "no response".into(),
    }
}

/// Pull the human readable message out of a PowerDNS error body.
///
/// Falls back to the raw text, and to `Not found` for an empty 404.
pub fn error_message(status: u16, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorResponseBody>(body) {
        if let Some(err) = parsed.error {
            return err;
        }
        if let Some(errs) = parsed.errors {
            return errs.join("; ");
        }
    }
    let text = body.trim();
    if text.is_empty() {
        if status == 404 {
            return "Not found".into();
        }
        return "No error message found".into();
    }
    text.to_string()
}

pub type PdnsResult<T> = Result<T, PdnsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_prefers_error_field() {
        let body = r#"{"error": "Domain 'example.org.' already exists"}"#;
        assert_eq!(error_message(409, body), "Domain 'example.org.' already exists");
    }

    #[test]
    fn message_joins_errors_list() {
        let body = r#"{"errors": ["first", "second"]}"#;
        assert_eq!(error_message(422, body), "first; second");
    }

    #[test]
    fn message_falls_back_to_text() {
        assert_eq!(error_message(400, "bad things\n"), "bad things");
        assert_eq!(error_message(404, ""), "Not found");
        assert_eq!(error_message(400, ""), "No error message found");
    }

    #[test]
    fn classification_helpers() {
        let nf = PdnsError::client(404, "http://pdns/zones/x.", "Not found");
        assert!(nf.is_client_error());
        assert!(nf.is_not_found());
        assert!(!nf.is_service_error());
        assert_eq!(nf.status(), Some(404));
        assert_eq!(nf.to_string(), "code=404 http://pdns/zones/x.: Not found");

        let down = PdnsError::service("http://pdns/servers", None, "connection refused");
        assert!(down.is_service_error());
        assert!(!down.is_not_found());
        assert_eq!(down.status(), None);
        assert!(down.to_string().contains("no response"));

        let stale = PdnsError::StaleReference {
            zone: "example.org.".into(),
        };
        assert_eq!(stale.status(), None);
        assert!(!stale.is_client_error());
    }
}
