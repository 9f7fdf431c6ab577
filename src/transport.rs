//! HTTP transport: request construction, headers, status mapping.
//!
//! One [`Transport`] per client instance, owning the `reqwest::Client`
//! (and with it the connection pool). Every request carries a User-Agent
//! drawn from an injected [`UserAgentProvider`] plus the fixed browser-ish
//! headers the upstream expects. Non-2xx responses surface as
//! [`FutmarketError::Status`]; network failures map onto the transient
//! error kinds the retry policy understands.

use std::sync::Arc;

use rand::Rng;
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::telemetry;
use crate::{FutmarketError, Result};

/// Default base URL of the JSON API.
pub const DEFAULT_API_BASE: &str = "https://www.futbin.org/futbin/api";

const ACCEPT: &str = "application/json, text/plain, */*";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
const REFERER: &str = "https://www.futbin.com/";
const ORIGIN: &str = "https://www.futbin.com";

/// Fallback UA if a provider returns a string that is not a valid header
/// value.
const FALLBACK_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/124.0.0.0 Safari/537.36";

/// Source of User-Agent strings, one per request.
///
/// Injected rather than global so tests can pin a deterministic value.
pub trait UserAgentProvider: Send + Sync {
    fn next_user_agent(&self) -> String;
}

/// Default provider: picks pseudo-randomly from a pool of current desktop
/// browser strings on every call.
pub struct RotatingUserAgents {
    agents: Vec<String>,
}

impl RotatingUserAgents {
    pub fn new() -> Self {
        Self {
            agents: BUILTIN_USER_AGENTS.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// Rotate over a caller-supplied pool instead of the built-in one.
    ///
    /// Falls back to the built-in pool when `agents` is empty.
    pub fn from_pool(agents: Vec<String>) -> Self {
        if agents.is_empty() {
            Self::new()
        } else {
            Self { agents }
        }
    }
}

impl Default for RotatingUserAgents {
    fn default() -> Self {
        Self::new()
    }
}

impl UserAgentProvider for RotatingUserAgents {
    fn next_user_agent(&self) -> String {
        let idx = rand::rng().random_range(0..self.agents.len());
        self.agents[idx].clone()
    }
}

/// Provider that always returns the same string. Useful for tests and for
/// callers that must identify themselves consistently.
pub struct FixedUserAgent(pub String);

impl UserAgentProvider for FixedUserAgent {
    fn next_user_agent(&self) -> String {
        self.0.clone()
    }
}

const BUILTIN_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36 Edg/123.0.2420.81",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0",
];

/// HTTP transport for the JSON API.
pub(crate) struct Transport {
    http: Client,
    base: String,
    user_agents: Arc<dyn UserAgentProvider>,
    extra_headers: Vec<(HeaderName, HeaderValue)>,
}

impl Transport {
    pub(crate) fn new(
        http: Client,
        base: String,
        user_agents: Arc<dyn UserAgentProvider>,
        extra_headers: Vec<(HeaderName, HeaderValue)>,
    ) -> Self {
        Self {
            http,
            base: base.trim_end_matches('/').to_string(),
            user_agents,
            extra_headers,
        }
    }

    /// Per-request headers: rotating User-Agent, fixed Accept/Referer/
    /// Origin, then caller extras (extras win on collision).
    fn request_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let ua = self.user_agents.next_user_agent();
        headers.insert(
            reqwest::header::USER_AGENT,
            HeaderValue::from_str(&ua)
                .unwrap_or_else(|_| HeaderValue::from_static(FALLBACK_USER_AGENT)),
        );
        headers.insert(reqwest::header::ACCEPT, HeaderValue::from_static(ACCEPT));
        headers.insert(
            reqwest::header::ACCEPT_LANGUAGE,
            HeaderValue::from_static(ACCEPT_LANGUAGE),
        );
        headers.insert(reqwest::header::REFERER, HeaderValue::from_static(REFERER));
        headers.insert(reqwest::header::ORIGIN, HeaderValue::from_static(ORIGIN));
        for (name, value) in &self.extra_headers {
            headers.insert(name.clone(), value.clone());
        }
        headers
    }

    /// GET `base/path?params`, decoding the JSON body into `T`.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}/{}", self.base, path);
        debug!(operation, %url, "upstream request");

        let send_result = self
            .http
            .get(&url)
            .headers(self.request_headers())
            .query(params)
            .send()
            .await;

        let response = match send_result {
            Ok(response) => response,
            Err(e) => {
                metrics::counter!(telemetry::REQUESTS_TOTAL,
                    "operation" => operation, "status" => "error")
                .increment(1);
                return Err(e.into());
            }
        };

        let status = response.status();
        trace!(operation, %status, "upstream response");
        if !status.is_success() {
            metrics::counter!(telemetry::REQUESTS_TOTAL,
                "operation" => operation, "status" => "error")
            .increment(1);
            return Err(FutmarketError::Status {
                status: status.as_u16(),
            });
        }

        metrics::counter!(telemetry::REQUESTS_TOTAL,
            "operation" => operation, "status" => "ok")
        .increment(1);

        response
            .json::<T>()
            .await
            .map_err(|e| FutmarketError::InvalidResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotating_pool_yields_known_agents() {
        let pool = RotatingUserAgents::new();
        for _ in 0..20 {
            let ua = pool.next_user_agent();
            assert!(BUILTIN_USER_AGENTS.contains(&ua.as_str()));
        }
    }

    #[test]
    fn empty_custom_pool_falls_back_to_builtin() {
        let pool = RotatingUserAgents::from_pool(Vec::new());
        assert!(BUILTIN_USER_AGENTS.contains(&pool.next_user_agent().as_str()));
    }

    #[test]
    fn fixed_agent_is_stable() {
        let fixed = FixedUserAgent("test-agent/1.0".into());
        assert_eq!(fixed.next_user_agent(), "test-agent/1.0");
        assert_eq!(fixed.next_user_agent(), "test-agent/1.0");
    }
}
