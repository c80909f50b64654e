//! HTTP transport bound to a fixed base URL.
//!
//! # Design
//! `send` performs exactly one round trip and reports status codes as data;
//! only connection failures and elapsed timeouts surface as errors. Status
//! interpretation belongs to the client layer. Configuration is immutable
//! after construction, so one `Transport` is safely shared by arbitrarily
//! many concurrent calls.

use std::time::Duration;

use tracing::debug;

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Default connect, read, and write timeout, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 3000;

/// Connection settings, fixed at client construction.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    pub write_timeout: Duration,
}

impl ClientConfig {
    /// Configuration for `base_url` with all timeouts at their 3000 ms
    /// default.
    pub fn new(base_url: &str) -> Self {
        let timeout = Duration::from_millis(DEFAULT_TIMEOUT_MS);
        Self {
            base_url: base_url.to_string(),
            connect_timeout: timeout,
            read_timeout: timeout,
            write_timeout: timeout,
        }
    }
}

/// Executes `HttpRequest` values against the configured base URL.
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct Transport {
    http: reqwest::Client,
    base_url: String,
}

impl Transport {
    /// Build a transport from `config`.
    ///
    /// The per-request wall-clock budget is the sum of the three configured
    /// timeouts; the connect and read phases are additionally bounded
    /// individually. Exceeding any of them aborts exactly that one in-flight
    /// request.
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let total = config.connect_timeout + config.read_timeout + config.write_timeout;
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .timeout(total)
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Execute one request and return the raw status and body.
    ///
    /// 4xx/5xx responses come back as `Ok`; this layer performs no status
    /// interpretation.
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = format!("{}{}", self.base_url, request.path);
        debug!(method = %request.method, %url, "sending request");

        let mut builder = match request.method {
            HttpMethod::Get => self.http.get(&url),
            HttpMethod::Post => self.http.post(&url),
            HttpMethod::Put => self.http.put(&url),
            HttpMethod::Delete => self.http.delete(&url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(status, bytes = body.len(), "received response");

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_3000ms_everywhere() {
        let config = ClientConfig::new("http://localhost:8080/api/v1/tasks");
        assert_eq!(config.connect_timeout, Duration::from_millis(3000));
        assert_eq!(config.read_timeout, Duration::from_millis(3000));
        assert_eq!(config.write_timeout, Duration::from_millis(3000));
    }

    #[test]
    fn trailing_slash_is_stripped_from_base_url() {
        let transport = Transport::new(&ClientConfig::new("http://localhost:8080/")).unwrap();
        assert_eq!(transport.base_url(), "http://localhost:8080");
    }
}
