//! Sensors API HTTP client.
//!
//! Blocking reqwest client (no Tokio runtime required).
//! One operation: list every software agent, following the offset token.

use std::collections::HashSet;
use std::time::Duration;

use hone_config::ApiSettings;
use hone_recon::HostMap;

use crate::agent::{collect_actual, AgentRecord};
use crate::auth::{sign_now, CONTENT_TYPE};

/// Agent inventory endpoint, relative to the configured base URL.
pub const SENSORS_PATH: &str = "/openapi/v1/sensors";

/// Error type for inventory collection.
#[derive(Debug)]
pub enum CollectionError {
    /// Credentials rejected (401/403)
    Auth(u16, String),
    /// Any other non-success HTTP status
    Http(u16, String),
    /// Connection, TLS or timeout failure
    Network(String),
    /// Response body is not what the API documents
    Parse(String),
    /// Client could not be set up
    Client(String),
}

impl std::fmt::Display for CollectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectionError::Auth(code, msg) => write!(f, "authentication failed (HTTP {}): {}", code, msg),
            CollectionError::Http(code, msg) => write!(f, "HTTP {}: {}", code, msg),
            CollectionError::Network(msg) => write!(f, "Network error: {}", msg),
            CollectionError::Parse(msg) => write!(f, "Parse error: {}", msg),
            CollectionError::Client(msg) => write!(f, "Client error: {}", msg),
        }
    }
}

impl std::error::Error for CollectionError {}

/// One page of `GET /openapi/v1/sensors`.
#[derive(Debug, serde::Deserialize)]
struct SensorsPage {
    #[serde(default)]
    results: Vec<AgentRecord>,
    /// Continuation token; absent, null or empty on the last page.
    #[serde(default)]
    offset: Option<serde_json::Value>,
}

impl SensorsPage {
    fn next_offset(&self) -> Option<String> {
        match self.offset.as_ref()? {
            serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Monitoring OpenAPI client (blocking).
pub struct SensorClient {
    http: reqwest::blocking::Client,
    api_base: String,
    key: String,
    secret: String,
    page_size: u32,
}

impl SensorClient {
    /// Create a client from validated settings.
    pub fn new(settings: &ApiSettings) -> Result<Self, CollectionError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(format!("hone/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(settings.timeout_secs))
            .danger_accept_invalid_certs(!settings.verify)
            .build()
            .map_err(|e| CollectionError::Client(e.to_string()))?;

        Ok(Self {
            http,
            api_base: settings.endpoint.trim_end_matches('/').to_string(),
            key: settings.key.clone(),
            secret: settings.secret.clone(),
            page_size: settings.page_size,
        })
    }

    /// List every software agent, across all pages.
    pub fn list_agents(&self) -> Result<Vec<AgentRecord>, CollectionError> {
        let mut agents = Vec::new();
        let mut offset: Option<String> = None;
        let mut seen: HashSet<String> = HashSet::new();

        loop {
            let path = self.page_path(offset.as_deref());
            let page: SensorsPage = self.get_json(&path)?;
            log::debug!("fetched {} agent(s) (offset {:?})", page.results.len(), offset);

            let next = page.next_offset();
            let count = page.results.len();
            agents.extend(page.results);

            match next {
                Some(token) if count > 0 => {
                    if !seen.insert(token.clone()) {
                        return Err(CollectionError::Parse(format!(
                            "pagination repeated offset {token}"
                        )));
                    }
                    offset = Some(token);
                }
                _ => break,
            }
        }

        log::info!("collected {} agent(s) from {}", agents.len(), self.api_base);
        Ok(agents)
    }

    fn page_path(&self, offset: Option<&str>) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        query.append_pair("limit", &self.page_size.to_string());
        if let Some(token) = offset {
            query.append_pair("offset", token);
        }
        format!("{}?{}", SENSORS_PATH, query.finish())
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, path_and_query: &str) -> Result<T, CollectionError> {
        let signed = sign_now(&self.key, &self.secret, "GET", path_and_query)?;
        let url = format!("{}{}", self.api_base, path_and_query);

        let resp = self
            .http
            .get(&url)
            .header("Id", &signed.id)
            .header("Timestamp", &signed.timestamp)
            .header("Authorization", &signed.authorization)
            .header("Content-Type", CONTENT_TYPE)
            .header("Accept", CONTENT_TYPE)
            .send()
            .map_err(|e| CollectionError::Network(e.to_string()))?;

        let status = resp.status().as_u16();
        let text = resp
            .text()
            .map_err(|e| CollectionError::Network(format!("failed to read response body: {e}")))?;

        if status == 401 || status == 403 {
            return Err(CollectionError::Auth(status, extract_error(&text, status)));
        }
        if !(200..300).contains(&status) {
            return Err(CollectionError::Http(status, extract_error(&text, status)));
        }

        serde_json::from_str(text.trim_start_matches('\u{feff}')).map_err(|e| {
            CollectionError::Parse(format!(
                "{} (body: {})",
                e,
                &text[..floor_char_boundary(&text, 200)],
            ))
        })
    }
}

/// Best-effort error message from an error response body.
fn extract_error(body: &str, status: u16) -> String {
    let json: serde_json::Value = serde_json::from_str(body).unwrap_or(serde_json::Value::Null);
    json["error"]
        .as_str()
        .or_else(|| json["message"].as_str())
        .map(String::from)
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                format!("HTTP {}", status)
            } else {
                trimmed[..floor_char_boundary(trimmed, 200)].to_string()
            }
        })
}

fn floor_char_boundary(s: &str, max: usize) -> usize {
    if s.len() <= max {
        return s.len();
    }
    (0..=max).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0)
}

/// List agents and flatten them for one routing domain.
pub fn fetch_actual(settings: &ApiSettings, vrf_id: i64) -> Result<HostMap, CollectionError> {
    let client = SensorClient::new(settings)?;
    let agents = client.list_agents()?;
    Ok(collect_actual(&agents, vrf_id))
}
