//! Ordered CORS-proxy fallback for reaching the upstream API.
//!
//! The chain is a flat ordered candidate list: first successful response
//! wins and the remaining candidates are abandoned. There are no retries,
//! no backoff and no health scoring; exhausting the list is the only
//! failure mode.

use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::envelope::EnvelopeError;
use crate::http::{HttpClient, HttpRequest};
use crate::ValidationError;

/// Canonical proxy identifiers in fallback order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProxyId {
    #[serde(rename = "local")]
    Local,
    #[serde(rename = "corsproxy")]
    CorsProxy,
    #[serde(rename = "allorigins-get")]
    AlloriginsGet,
    #[serde(rename = "allorigins-raw")]
    AlloriginsRaw,
}

impl ProxyId {
    pub const ALL: [Self; 4] = [
        Self::Local,
        Self::CorsProxy,
        Self::AlloriginsGet,
        Self::AlloriginsRaw,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::CorsProxy => "corsproxy",
            Self::AlloriginsGet => "allorigins-get",
            Self::AlloriginsRaw => "allorigins-raw",
        }
    }

    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Local => "http://localhost:3001",
            Self::CorsProxy => "https://corsproxy.io",
            Self::AlloriginsGet => "https://api.allorigins.win/get",
            Self::AlloriginsRaw => "https://api.allorigins.win/raw",
        }
    }

    /// Builds the proxied form of an upstream URL.
    pub fn proxied_url(self, upstream: &str) -> String {
        let encoded = urlencoding::encode(upstream);
        match self {
            Self::Local => format!("http://localhost:3001?url={encoded}"),
            Self::CorsProxy => format!("https://corsproxy.io/?{encoded}"),
            Self::AlloriginsGet => format!("https://api.allorigins.win/get?url={encoded}"),
            Self::AlloriginsRaw => format!("https://api.allorigins.win/raw?url={encoded}"),
        }
    }
}

impl Display for ProxyId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProxyId {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "corsproxy" => Ok(Self::CorsProxy),
            "allorigins-get" => Ok(Self::AlloriginsGet),
            "allorigins-raw" => Ok(Self::AlloriginsRaw),
            other => Err(ValidationError::InvalidProxy {
                value: other.to_owned(),
            }),
        }
    }
}

/// Successful fetch through the chain.
#[derive(Debug, Clone)]
pub struct FetchSuccess {
    pub payload: Value,
    pub selected_proxy: ProxyId,
    pub proxy_chain: Vec<ProxyId>,
    pub warnings: Vec<String>,
    pub errors: Vec<EnvelopeError>,
    pub latency_ms: u64,
}

/// Failed fetch after exhausting every candidate.
#[derive(Debug, Clone)]
pub struct FetchFailure {
    pub proxy_chain: Vec<ProxyId>,
    pub warnings: Vec<String>,
    pub errors: Vec<EnvelopeError>,
    pub latency_ms: u64,
}

pub type FetchResult = Result<FetchSuccess, FetchFailure>;

/// Ordered proxy walk over a shared transport.
pub struct ProxyChain {
    proxies: Vec<ProxyId>,
    client: Arc<dyn HttpClient>,
}

impl ProxyChain {
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self::with_proxies(client, ProxyId::ALL.to_vec())
    }

    pub fn with_proxies(client: Arc<dyn HttpClient>, proxies: Vec<ProxyId>) -> Self {
        Self { proxies, client }
    }

    pub fn proxies(&self) -> &[ProxyId] {
        &self.proxies
    }

    pub fn is_mock(&self) -> bool {
        self.client.is_mock()
    }

    /// Fetches the upstream URL through the candidates in order, returning
    /// the first successfully decoded JSON payload. Transport failures,
    /// non-2xx statuses, malformed JSON and upstream API error payloads all
    /// advance to the next candidate.
    pub async fn fetch_json(&self, upstream_url: &str) -> FetchResult {
        let started = Instant::now();
        let mut proxy_chain = Vec::with_capacity(self.proxies.len());
        let mut errors = Vec::new();

        for &proxy in &self.proxies {
            proxy_chain.push(proxy);
            let request = HttpRequest::get(proxy.proxied_url(upstream_url));

            let response = match self.client.execute(request).await {
                Ok(response) => response,
                Err(error) => {
                    errors.push(attempt_error(proxy, "proxy.transport", error.message()));
                    continue;
                }
            };

            if !response.is_success() {
                errors.push(attempt_error(
                    proxy,
                    "proxy.status",
                    format!("proxy returned status {}", response.status),
                ));
                continue;
            }

            match decode_payload(&response.body) {
                Ok(payload) => {
                    let mut warnings = Vec::new();
                    if !errors.is_empty() {
                        warnings.push(format!(
                            "proxy fallback succeeded with '{}' after {} failed attempt(s)",
                            proxy.as_str(),
                            errors.len()
                        ));
                    }

                    return Ok(FetchSuccess {
                        payload,
                        selected_proxy: proxy,
                        proxy_chain,
                        warnings,
                        errors,
                        latency_ms: elapsed_ms(started),
                    });
                }
                Err((code, message)) => {
                    errors.push(attempt_error(proxy, code, message));
                }
            }
        }

        if errors.is_empty() {
            errors.push(
                EnvelopeError::new("proxy.no_candidate", "proxy chain is empty")
                    .expect("code/message are non-empty"),
            );
        }

        Err(FetchFailure {
            proxy_chain,
            warnings: vec![format!("all proxies failed for '{upstream_url}'")],
            errors,
            latency_ms: elapsed_ms(started),
        })
    }
}

/// Decodes a proxy response body: JSON parse, upstream API error detection,
/// and allorigins `contents` unwrapping (the wrapped payload arrives as a
/// JSON string nested in the wrapper object).
fn decode_payload(body: &str) -> Result<Value, (&'static str, String)> {
    let value: Value = serde_json::from_str(body)
        .map_err(|error| ("proxy.malformed_json", format!("malformed JSON: {error}")))?;

    if let Some(message) = upstream_error_message(&value) {
        return Err(("upstream.api_error", message));
    }

    if let Some(contents) = value.get("contents").and_then(Value::as_str) {
        return serde_json::from_str(contents).map_err(|error| {
            (
                "proxy.malformed_json",
                format!("malformed wrapped JSON: {error}"),
            )
        });
    }

    Ok(value)
}

fn upstream_error_message(value: &Value) -> Option<String> {
    if value.get("error_code").is_some() {
        let message = value
            .get("error_message")
            .and_then(Value::as_str)
            .unwrap_or("upstream reported an error code");
        return Some(message.to_owned());
    }

    let http_code = value
        .get("status")
        .and_then(|status| status.get("http_code"))
        .and_then(Value::as_u64)?;
    if http_code >= 400 {
        return Some(format!("upstream reported HTTP {http_code}"));
    }

    None
}

fn attempt_error(proxy: ProxyId, code: &str, message: impl Into<String>) -> EnvelopeError {
    EnvelopeError::new(code, message)
        .expect("code/message are non-empty")
        .with_proxy(proxy)
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis().min(u128::from(u64::MAX)) as u64
}
