use std::time::Duration;

/// Connection settings for one PowerDNS API.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub api_url: String, // e.g. "http://127.0.0.1:8081/api/v1"
    pub api_key: String,
    pub timeout: Option<Duration>,
    pub verify_tls: bool,
}

impl ApiConfig {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
            timeout: None,
            verify_tls: true,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_verify_tls(mut self, verify: bool) -> Self {
        self.verify_tls = verify;
        self
    }

    /// API base URL without trailing slash.
    pub fn api_root(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }

    /// Full URL for an API path. Absolute URLs pass through untouched.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}/{}", self.api_root(), path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_and_path() {
        let cfg = ApiConfig::new("http://127.0.0.1:8081/api/v1/", "secret");
        assert_eq!(cfg.api_root(), "http://127.0.0.1:8081/api/v1");
        assert_eq!(cfg.url("/servers"), "http://127.0.0.1:8081/api/v1/servers");
        assert_eq!(
            cfg.url("servers/localhost/zones"),
            "http://127.0.0.1:8081/api/v1/servers/localhost/zones"
        );
    }

    #[test]
    fn absolute_url_is_used_verbatim() {
        let cfg = ApiConfig::new("http://127.0.0.1:8081/api/v1", "secret");
        assert_eq!(
            cfg.url("https://other.example/api/v1/servers"),
            "https://other.example/api/v1/servers"
        );
    }

    #[test]
    fn defaults_verify_tls_without_timeout() {
        let cfg = ApiConfig::new("http://pdns", "k");
        assert!(cfg.verify_tls);
        assert!(cfg.timeout.is_none());

        let cfg = cfg
            .with_timeout(Duration::from_secs(5))
            .with_verify_tls(false);
        assert_eq!(cfg.timeout, Some(Duration::from_secs(5)));
        assert!(!cfg.verify_tls);
    }
}
