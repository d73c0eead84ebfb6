//! HTTP client for the mercado API
//!
//! `MercadoClient` sends exactly one attempt per request. Status codes are
//! returned as data rather than turned into errors, because the scenarios
//! assert on 4xx responses as often as on 2xx ones. Only transport failures
//! (DNS, TCP, TLS, timeout) come back as `Err`.

use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::common::config::ApiConfig;
use crate::common::{Error, Result};

/// Collection endpoint that lists every market
pub const MERCADO_PATH: &str = "/mercado";

/// A request relative to the configured base URL
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    /// Path starting with `/`
    pub path: String,
    /// JSON body, omitted when `None`
    pub body: Option<Value>,
}

impl Request {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            body: Some(body),
        }
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::PUT,
            path: path.into(),
            body: Some(body),
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::DELETE,
            path: path.into(),
            body: None,
        }
    }
}

/// Status and body of a completed exchange
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    /// Raw body text, used for substring expectations
    pub text: String,
    /// Body parsed as JSON, `None` when it is not valid JSON
    pub json: Option<Value>,
}

/// Client for the remote mercado API
pub struct MercadoClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl MercadoClient {
    /// Build a client with the request and connect timeouts from `config`
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request once and collect its status and body
    pub async fn send(&self, request: &Request) -> Result<ApiResponse> {
        let url = self.url(&request.path);
        let started = Instant::now();

        let mut builder = self.client.request(request.method.clone(), &url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| self.transport_error(e, &url))?;
        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| self.transport_error(e, &url))?;
        let json = serde_json::from_str(&text).ok();

        debug!(
            method = %request.method,
            url = %url,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "response received"
        );

        Ok(ApiResponse { status, text, json })
    }

    fn transport_error(&self, err: reqwest::Error, url: &str) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                url: url.to_string(),
                timeout: self.timeout,
            }
        } else {
            Error::Transport(err)
        }
    }

    /// Fetch the `id` of the first market listed by `GET /mercado`
    ///
    /// Fails unless the response is 200 with a non-empty array whose first
    /// element carries an integer `id`.
    pub async fn first_mercado_id(&self) -> Result<i64> {
        let resp = self.send(&Request::get(MERCADO_PATH)).await?;

        if resp.status != StatusCode::OK {
            return Err(Error::setup(format!(
                "GET {} returned {}, expected 200",
                MERCADO_PATH, resp.status
            )));
        }

        let items = resp
            .json
            .as_ref()
            .and_then(Value::as_array)
            .ok_or_else(|| Error::setup(format!("GET {} did not return an array", MERCADO_PATH)))?;

        let first = items
            .first()
            .ok_or_else(|| Error::setup(format!("GET {} returned an empty array", MERCADO_PATH)))?;

        let id = first
            .get("id")
            .ok_or_else(|| Error::setup("first mercado has no 'id' field"))?;

        id.as_i64()
            .ok_or_else(|| Error::setup(format!("first mercado id is not an integer: {}", id)))
    }
}
