//! # HTTP client for the admin backend
//!
//! [`ApiClient`] is the only place in the workspace that builds HTTP
//! requests. Every endpoint goes through [`ApiClient::build`], which
//!
//! - joins the configured base URL with the endpoint path,
//! - appends query pairs,
//! - attaches `Authorization: Bearer <token>` for authenticated calls,
//! - serialises the JSON body,
//!
//! and through [`ApiClient::send`], which normalises responses into
//! [`ApiError`]: `401` becomes [`ApiError::Unauthorized`], other non-2xx
//! statuses become [`ApiError::Status`] carrying the FastAPI `detail` string
//! when present.
//!
//! The client works unchanged on native targets and on `wasm32`, where
//! `reqwest` dispatches through the browser's `fetch`.

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;

/// One backend call, before it is turned into a `reqwest::Request`.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: Method,
    pub path: String,
    pub query: Vec<(&'static str, String)>,
    pub body: Option<Value>,
    pub authenticated: bool,
}

impl Call {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            authenticated: true,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, pairs: Vec<(&'static str, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    pub fn json<B: Serialize>(mut self, body: &B) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }

    /// Mark the call as not needing a bearer token (login).
    pub fn anonymous(mut self) -> Self {
        self.authenticated = false;
        self
    }
}

/// Typed client for `/api/admin/*`.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        self.base_url == other.base_url && self.token == other.token
    }
}

impl ApiClient {
    /// Create an anonymous client for `base_url` (e.g. `https://api.example.com`).
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ApiError::Config("backend base URL is empty".to_string()));
        }
        reqwest::Url::parse(&base_url).map_err(|e| ApiError::Config(format!("{base_url}: {e}")))?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            token: None,
        })
    }

    /// Same backend, authenticated with `token`.
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            token: Some(token.into()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Build the `reqwest::Request` for `call` without sending it.
    pub fn build(&self, call: &Call) -> Result<reqwest::Request, ApiError> {
        let url = format!("{}{}", self.base_url, call.path);
        let mut builder = self.http.request(call.method.clone(), url);
        if !call.query.is_empty() {
            builder = builder.query(&call.query);
        }
        if call.authenticated {
            match &self.token {
                Some(token) => builder = builder.bearer_auth(token),
                None => return Err(ApiError::Unauthorized),
            }
        }
        if let Some(body) = &call.body {
            builder = builder.json(body);
        }
        Ok(builder.build()?)
    }

    /// Send `call` and decode a JSON response body.
    pub async fn send<T: DeserializeOwned>(&self, call: Call) -> Result<T, ApiError> {
        let request = self.build(&call)?;
        tracing::debug!(method = %call.method, path = %call.path, "admin api request");

        let response = self.http.execute(request).await.map_err(|e| {
            tracing::warn!(path = %call.path, "admin api request failed: {e}");
            ApiError::from(e)
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(path = %call.path, "admin api rejected token");
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let detail = response
                .json::<Value>()
                .await
                .ok()
                .as_ref()
                .and_then(extract_detail);
            tracing::warn!(path = %call.path, status = status.as_u16(), ?detail, "admin api error");
            return Err(ApiError::Status {
                status: status.as_u16(),
                detail,
            });
        }

        response.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Pull a readable message out of a FastAPI error body.
///
/// `detail` is a string for `HTTPException`s and a list of
/// `{loc, msg, type}` objects for validation errors.
pub fn extract_detail(body: &Value) -> Option<String> {
    match body.get("detail")? {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if msgs.is_empty() {
                None
            } else {
                Some(msgs.join("; "))
            }
        }
        _ => None,
    }
}
