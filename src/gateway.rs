// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Client for the spreadsheet-backed tracker API.
//!
//! Every call is a GET (or, for writes, a JSON POST) against one endpoint,
//! selected by an `action` parameter and authorised by `key`. Replies are
//! `{ "success": bool, "data": ..., "message": ... }`.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::TransportError;
use crate::models::{NewTransaction, Scope, Summary, Transaction, TransactionFilter, category_names};
use crate::utils::http_client;

pub const INVALID_JSON: &str = "Invalid JSON response";
pub const UNKNOWN_FAILURE: &str = "Unknown";

/// Outcome of a request that reached the server.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse<T> {
    Success(T),
    Failure { message: String, raw: Option<String> },
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ApiResponse::Success(_))
    }

    pub fn ok(self) -> Option<T> {
        match self {
            ApiResponse::Success(v) => Some(v),
            ApiResponse::Failure { .. } => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        match self {
            ApiResponse::Success(v) => ApiResponse::Success(f(v)),
            ApiResponse::Failure { message, raw } => ApiResponse::Failure { message, raw },
        }
    }

    pub fn failure_message(&self) -> Option<&str> {
        match self {
            ApiResponse::Success(_) => None,
            ApiResponse::Failure { message, .. } => Some(message),
        }
    }
}

/// Raw HTTP access. Implementations return the response body as text
/// whatever the status code; only connection-level faults are errors.
pub trait Transport: Send + Sync {
    fn get(&self, url: &str, query: &[(&str, String)]) -> Result<String, TransportError>;
    fn post_json(&self, url: &str, body: &Value) -> Result<String, TransportError>;
}

pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            client: http_client()?,
        })
    }
}

fn send_error(url: &str, err: reqwest::Error) -> TransportError {
    if err.is_connect() || err.is_timeout() {
        TransportError::Unreachable(format!("{}: {}", url, err))
    } else {
        TransportError::Http(err)
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, query: &[(&str, String)]) -> Result<String, TransportError> {
        let resp = self
            .client
            .get(url)
            .query(query)
            .send()
            .map_err(|e| send_error(url, e))?;
        Ok(resp.text()?)
    }

    fn post_json(&self, url: &str, body: &Value) -> Result<String, TransportError> {
        let resp = self
            .client
            .post(url)
            .json(body)
            .send()
            .map_err(|e| send_error(url, e))?;
        Ok(resp.text()?)
    }
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Value,
    #[serde(default)]
    message: Option<Value>,
}

/// Turn a response body into an [`ApiResponse`]. Never fails: a body that
/// is not JSON is reported as a failure carrying the original text.
pub fn decode<T: DeserializeOwned>(text: &str) -> ApiResponse<T> {
    let env: Envelope = match serde_json::from_str(text) {
        Ok(env) => env,
        Err(err) => {
            debug!(error = %err, "response body is not JSON");
            return ApiResponse::Failure {
                message: INVALID_JSON.to_string(),
                raw: Some(text.to_string()),
            };
        }
    };
    if !env.success {
        let message = match env.message {
            Some(Value::String(s)) if !s.is_empty() => s,
            Some(Value::Null) | None => UNKNOWN_FAILURE.to_string(),
            Some(Value::String(_)) => UNKNOWN_FAILURE.to_string(),
            Some(other) => other.to_string(),
        };
        return ApiResponse::Failure { message, raw: None };
    }
    match serde_json::from_value::<T>(env.data) {
        Ok(data) => ApiResponse::Success(data),
        Err(err) => ApiResponse::Failure {
            message: format!("Unexpected response payload: {}", err),
            raw: Some(text.to_string()),
        },
    }
}

pub struct Gateway {
    transport: Box<dyn Transport>,
    api_url: String,
    api_key: String,
}

impl Gateway {
    pub fn new(transport: Box<dyn Transport>, api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            transport,
            api_url: api_url.into(),
            api_key: api_key.into(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn get<T: DeserializeOwned>(
        &self,
        action: &str,
        params: Vec<(&'static str, String)>,
    ) -> Result<ApiResponse<T>, TransportError> {
        let mut query: Vec<(&str, String)> = Vec::with_capacity(params.len() + 2);
        query.push(("action", action.to_string()));
        query.push(("key", self.api_key.clone()));
        query.extend(params);
        debug!(action, params = query.len() - 2, "GET");
        let body = self.transport.get(&self.api_url, &query).inspect_err(|err| {
            warn!(action, error = %err, "request failed");
        })?;
        let decoded = decode(&body);
        if let ApiResponse::Failure { message, .. } = &decoded {
            warn!(action, %message, "remote reported failure");
        }
        Ok(decoded)
    }

    /// Balances for one scope, or for everything when `scope` is `None`.
    pub fn fetch_summary(&self, scope: Option<Scope>) -> Result<ApiResponse<Summary>, TransportError> {
        let mut params = Vec::new();
        if let Some(s) = scope {
            params.push(("type", s.to_string()));
        }
        self.get("getSummary", params)
    }

    pub fn fetch_transactions(
        &self,
        filter: &TransactionFilter,
    ) -> Result<ApiResponse<Vec<Transaction>>, TransportError> {
        let mut params = Vec::new();
        if let Some(s) = filter.scope {
            params.push(("type", s.to_string()));
        }
        if let Some(d) = filter.date {
            params.push(("date", d.to_string()));
        }
        if let Some(d) = filter.from {
            params.push(("from", d.to_string()));
        }
        if let Some(d) = filter.to {
            params.push(("to", d.to_string()));
        }
        let resp: ApiResponse<Option<Vec<Transaction>>> = self.get("getTransactions", params)?;
        Ok(resp.map(Option::unwrap_or_default))
    }

    pub fn fetch_categories(&self) -> Result<ApiResponse<Vec<String>>, TransportError> {
        let resp: ApiResponse<Option<Vec<Value>>> = self.get("getCategories", Vec::new())?;
        Ok(resp.map(|rows| category_names(rows.unwrap_or_default())))
    }

    /// POST a new row. Whatever `data` the server echoes back is returned
    /// untouched.
    pub fn append_transaction(&self, tx: &NewTransaction) -> Result<ApiResponse<Value>, TransportError> {
        let mut body: Map<String, Value> = match serde_json::to_value(tx)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        body.insert("action".into(), Value::String("addTransaction".into()));
        body.insert("key".into(), Value::String(self.api_key.clone()));
        debug!(action = "addTransaction", "POST");
        let text = self
            .transport
            .post_json(&self.api_url, &Value::Object(body))
            .inspect_err(|err| warn!(action = "addTransaction", error = %err, "request failed"))?;
        let decoded = decode(&text);
        if let ApiResponse::Failure { message, .. } = &decoded {
            warn!(action = "addTransaction", %message, "remote reported failure");
        }
        Ok(decoded)
    }
}
