//! ERP HTTP client.
//!
//! Blocking reqwest client (no Tokio runtime required). The palette runs
//! account lookups through this client from a worker thread; the short
//! timeout keeps a dead server from pinning the search indicator.

use std::time::Duration;

use ledgerdesk_search::{AccountLookup, RawAccount};

use crate::auth::{AuthCredentials, AuthStore};

/// ERP API client (blocking).
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::blocking::Client,
    api_base: String,
    token: String,
}

/// Error type for API operations.
#[derive(Debug)]
pub enum ApiError {
    /// No auth credentials configured
    NotAuthenticated,
    /// Network error
    Network(String),
    /// HTTP error with status code
    Http(u16, String),
    /// JSON parsing error
    Parse(String),
    /// Server returned a validation error (4xx with message)
    Validation(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NotAuthenticated => write!(f, "Not authenticated - sign in first"),
            ApiError::Network(msg) => write!(f, "Network error: {}", msg),
            ApiError::Http(code, msg) => write!(f, "HTTP {}: {}", code, msg),
            ApiError::Parse(msg) => write!(f, "Parse error: {}", msg),
            ApiError::Validation(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiClient {
    /// Create a new client from the credentials saved at the default
    /// location.
    pub fn from_saved_auth() -> Result<Self, ApiError> {
        let creds = AuthStore::default()
            .load()
            .ok_or(ApiError::NotAuthenticated)?;
        Ok(Self::new(creds))
    }

    /// Create a new client with explicit credentials.
    pub fn new(creds: AuthCredentials) -> Self {
        let http = reqwest::blocking::Client::builder()
            .user_agent(format!("ledgerdesk/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            api_base: creds.api_base,
            token: creds.token,
        }
    }

    /// Search accounts by name or number.
    pub fn lookup_accounts(&self, query: &str) -> Result<Vec<RawAccount>, ApiError> {
        let url = format!("{}/api/accounts/search", self.api_base);
        let resp = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .query(&[("q", query), ("limit", "5")])
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = resp.status().as_u16();
        if !resp.status().is_success() {
            let body = resp.text().unwrap_or_default();
            if status == 422 || status == 400 {
                return Err(ApiError::Validation(body));
            }
            return Err(ApiError::Http(status, body));
        }

        let json: serde_json::Value = resp.json().map_err(|e| ApiError::Parse(e.to_string()))?;
        Ok(parse_accounts(&json))
    }
}

/// Extract account rows from a search response. Accepts either a bare
/// array or `{"accounts": [..]}`; malformed entries are skipped rather
/// than failing the whole response.
pub fn parse_accounts(json: &serde_json::Value) -> Vec<RawAccount> {
    let rows = json
        .as_array()
        .or_else(|| json["accounts"].as_array())
        .cloned()
        .unwrap_or_default();

    rows.iter()
        .filter_map(|row| {
            let id = row["id"]
                .as_i64()
                .map(|n| n.to_string())
                .or_else(|| row["id"].as_str().map(String::from))?;
            Some(RawAccount {
                id,
                name: row["name"].as_str()?.to_string(),
                number: row["number"].as_str().map(String::from),
                group: row["group"].as_str().map(String::from),
                balance: row["balance"].as_f64(),
            })
        })
        .collect()
}

/// The palette's remote account port. Errors flatten to strings; the
/// adapter on the other side only needs to know the bucket is empty.
impl AccountLookup for ApiClient {
    fn lookup(&self, query: &str) -> Result<Vec<RawAccount>, String> {
        self.lookup_accounts(query).map_err(|e| e.to_string())
    }
}
