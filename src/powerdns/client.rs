use reqwest::{Client, Method, header};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::config::ApiConfig;
use crate::error::{PdnsError, PdnsResult, error_message};

/// Authenticated HTTP transport for one PowerDNS API.
///
/// Every call is a single request: failures are returned as-is and
/// never retried.
#[derive(Clone, Debug)]
pub struct PowerDnsClient {
    http: Client,
    config: ApiConfig,
}

impl PowerDnsClient {
    pub fn new(config: ApiConfig) -> PdnsResult<Self> {
        let mut builder = Client::builder().danger_accept_invalid_certs(!config.verify_tls);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if !config.verify_tls {
            debug!("TLS certificate verification disabled");
        }
        let http = builder
            .build()
            .map_err(|e| PdnsError::service(config.api_root(), None, e.to_string()))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn auth_header(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("X-API-Key", &self.config.api_key)
            .header(header::ACCEPT, "application/json")
    }

    /// Issue one request and return the parsed JSON body.
    ///
    /// `Ok(None)` means a 2xx with no body (e.g. 204). 4xx maps to
    /// [`PdnsError::Client`]; everything else that fails maps to
    /// [`PdnsError::Service`].
    pub async fn request<B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> PdnsResult<Option<Value>>
    where
        B: Serialize + ?Sized,
    {
        let url = self.config.url(path);
        info!(%method, %url, "request");

        let mut req = self.auth_header(self.http.request(method.clone(), &url));
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(body) = body {
            if tracing::enabled!(tracing::Level::DEBUG) {
                debug!(data = %serde_json::to_string(body).unwrap_or_default(), "request body");
            }
            req = req.json(body);
        }

        let res = req.send().await.map_err(|e| {
            let message = describe_send_error(&e);
            error!(%method, %url, %message, "request failed");
            PdnsError::service(&url, None, message)
        })?;

        let status = res.status();
        let code = status.as_u16();
        info!(status = code, %url, "response");

        let text = res
            .text()
            .await
            .map_err(|e| PdnsError::service(&url, Some(code), e.to_string()))?;
        debug!(body = %text, "response body");

        if status.is_success() {
            if text.trim().is_empty() {
                return Ok(None);
            }
            return serde_json::from_str(&text).map(Some).map_err(|e| {
                error!(status = code, %url, "malformed JSON response");
                PdnsError::service(&url, Some(code), format!("malformed JSON response: {e}"))
            });
        }

        let message = error_message(code, &text);
        if status.is_client_error() {
            warn!(status = code, %url, %message, "request rejected");
            Err(PdnsError::client(code, url, message))
        } else {
            error!(status = code, %url, %message, "server error");
            Err(PdnsError::service(url, Some(code), message))
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> PdnsResult<T> {
        self.get_with_query(path, &[]).await
    }

    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> PdnsResult<T> {
        let body = self
            .request(Method::GET, path, query, None::<&()>)
            .await?;
        self.decode(path, body)
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> PdnsResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let res = self.request(Method::POST, path, &[], Some(body)).await?;
        self.decode(path, res)
    }

    pub async fn put<B>(&self, path: &str, body: Option<&B>) -> PdnsResult<Option<Value>>
    where
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, path, &[], body).await
    }

    pub async fn patch<B>(&self, path: &str, body: &B) -> PdnsResult<Option<Value>>
    where
        B: Serialize + ?Sized,
    {
        self.request(Method::PATCH, path, &[], Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> PdnsResult<Option<Value>> {
        self.request(Method::DELETE, path, &[], None::<&()>).await
    }

    fn decode<T: DeserializeOwned>(&self, path: &str, body: Option<Value>) -> PdnsResult<T> {
        let url = self.config.url(path);
        let Some(value) = body else {
            return Err(PdnsError::service(url, None, "expected a JSON body, got none"));
        };
        serde_json::from_value(value)
            .map_err(|e| PdnsError::service(url, None, format!("unexpected response shape: {e}")))
    }
}

fn describe_send_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        format!("request timed out: {e}")
    } else if e.is_connect() {
        format!("connection failed: {e}")
    } else {
        e.to_string()
    }
}
