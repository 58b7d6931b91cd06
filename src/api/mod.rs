// API client module: a small blocking HTTP client that talks to the
// Kero-Kero gateway. Every domain method maps to exactly one request;
// nothing is retried or cached.
//
// Calls return `ApiResult`. Transport failures are `ApiError::Transport`,
// never panics, so the interactive loop can print them and carry on.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::config::API_KEY_HEADER;

mod automation;
mod contacts;
mod groups;
mod instances;
mod messages;
pub mod models;
mod settings;

pub use models::*;

pub type ApiResult = Result<ApiResponse, ApiError>;

/// Base URL and API key for one session. Built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
    api_key: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

/// Decoded response body. Non-JSON payloads stay a separate case so they
/// are never mistaken for a JSON object that happens to carry `status`
/// and `text` keys.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: ResponseBody,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection refused, timeout, DNS failure, broken body stream.
    #[error("request failed: {0}")]
    Transport(String),
    /// The server answered with a non-2xx status where a payload was needed.
    #[error("server returned HTTP {status}")]
    Status { status: u16, body: ResponseBody },
    /// The JSON did not have the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiResponse {
    /// JSON if the text parses, raw text otherwise.
    pub fn from_parts(status: u16, text: String) -> Self {
        let body = match serde_json::from_str::<Value>(&text) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(text),
        };
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-2xx reply into `ApiError::Status`.
    pub fn ensure_success(self) -> Result<Self, ApiError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ApiError::Status {
                status: self.status,
                body: self.body,
            })
        }
    }

    pub fn json(&self) -> Option<&Value> {
        match &self.body {
            ResponseBody::Json(value) => Some(value),
            ResponseBody::Text(_) => None,
        }
    }

    /// Top-level field of a JSON object body.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.json().and_then(|value| value.get(key))
    }

    /// Top-level string field of a JSON object body.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.field(key).and_then(Value::as_str)
    }

    /// Deserialize the gateway's `data` envelope field. A missing or
    /// `null` field yields `T::default()`.
    pub fn data<T>(&self) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Default,
    {
        let Some(value) = self.json() else {
            return Err(ApiError::Decode("response body is not JSON".into()));
        };
        match value.get("data") {
            None | Some(Value::Null) => Ok(T::default()),
            Some(data) => {
                serde_json::from_value(data.clone()).map_err(|e| ApiError::Decode(e.to_string()))
            }
        }
    }

    /// Flat JSON for printing: JSON bodies as-is, text bodies as
    /// `{"status": <code>, "text": <raw>}`.
    pub fn to_display_json(&self) -> Value {
        match &self.body {
            ResponseBody::Json(value) => value.clone(),
            ResponseBody::Text(text) => json!({ "status": self.status, "text": text }),
        }
    }
}

impl ApiError {
    /// `{"error": "<description>"}`, with the server's body for status
    /// errors.
    pub fn to_display_json(&self) -> Value {
        match self {
            ApiError::Status { status, body } => {
                let detail = ApiResponse {
                    status: *status,
                    body: body.clone(),
                };
                json!({ "error": self.to_string(), "response": detail.to_display_json() })
            }
            _ => json!({ "error": self.to_string() }),
        }
    }
}

/// Render any call outcome for display. Errors become values here.
pub fn display_json(result: &ApiResult) -> Value {
    match result {
        Ok(resp) => resp.to_display_json(),
        Err(err) => err.to_display_json(),
    }
}

/// Blocking client bound to one base URL and API key.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
}

impl ApiClient {
    /// Build a client whose every request carries `Content-Type:
    /// application/json` and the `X-API-Key` header.
    pub fn new(config: ApiConfig) -> anyhow::Result<Self> {
        use anyhow::Context;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let key = HeaderValue::from_str(config.api_key())
            .context("API key contains characters not allowed in a header")?;
        headers.insert(API_KEY_HEADER, key);

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient { client, config })
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    /// Issue one request. GET and DELETE never carry a body.
    pub fn request<B>(&self, method: Method, path: &str, body: Option<&B>) -> ApiResult
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.config.base_url(), path);
        let mut req = self.client.request(method.clone(), &url);
        if let Some(body) = body {
            if method != Method::GET && method != Method::DELETE {
                req = req.json(body);
            }
        }

        let res = req.send().map_err(|e| {
            tracing::debug!(%method, path, error = %e, "Request failed");
            ApiError::Transport(e.to_string())
        })?;
        let status = res.status().as_u16();
        let text = res
            .text()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        tracing::debug!(%method, path, status, "Request completed");
        Ok(ApiResponse::from_parts(status, text))
    }

    pub(crate) fn get(&self, path: &str) -> ApiResult {
        self.request::<()>(Method::GET, path, None)
    }

    pub(crate) fn delete(&self, path: &str) -> ApiResult {
        self.request::<()>(Method::DELETE, path, None)
    }

    pub(crate) fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult {
        self.request(Method::POST, path, Some(body))
    }

    /// POST without a body (connect, disconnect, leave, ...).
    pub(crate) fn post_empty(&self, path: &str) -> ApiResult {
        self.request::<()>(Method::POST, path, None)
    }

    pub(crate) fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult {
        self.request(Method::PUT, path, Some(body))
    }

    /// `GET /health`.
    pub fn health(&self) -> ApiResult {
        self.get("/health")
    }
}

// Bytes that would end or split a path segment. `@` and `:` stay as-is;
// the gateway matches JIDs against the raw path.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Percent-encode user input for use as a single path segment.
pub(crate) fn segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

/// `/instances/{id}{suffix}`. Only the ID is encoded; `suffix` is a
/// fixed route tail.
pub(crate) fn instance_path(instance_id: &str, suffix: &str) -> String {
    format!("/instances/{}{}", segment(instance_id), suffix)
}
