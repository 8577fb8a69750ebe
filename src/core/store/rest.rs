//! HTTP document store.
//!
//! Speaks the Realtime-Database REST dialect: every path maps to
//! `<database_url>/<path>.json`, and the verb selects the operation
//! (`GET` read, `PUT` set, `POST` append, `PATCH` merge, `DELETE` remove).
//! Queries use `orderBy`/`equalTo`/`limitToFirst` with JSON-encoded values.
//!
//! Transient failures (connection errors, timeouts, 429, 5xx) are retried
//! with exponential backoff. `POST` is only retried when the connection was
//! never established, since a lost response may hide a completed append.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::{Method, StatusCode, Url};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::paths::check_path;
use super::DocumentStore;
use crate::error::{Result, StoreError};

/// Bounded exponential backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first.
    pub retries: u32,
    /// Delay before the first retry; doubles each time.
    pub backoff: Duration,
}

impl RetryPolicy {
    const MAX_DELAY: Duration = Duration::from_secs(10);

    pub fn none() -> Self {
        Self {
            retries: 0,
            backoff: Duration::ZERO,
        }
    }

    /// Delay before retry number `attempt` (0-based).
    pub fn delay(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.min(16));
        self.backoff.saturating_mul(factor).min(Self::MAX_DELAY)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 3,
            backoff: Duration::from_millis(200),
        }
    }
}

/// [`DocumentStore`] over HTTP.
#[derive(Debug, Clone)]
pub struct RestStore {
    client: Client,
    base: Url,
    token: Option<String>,
    retry: RetryPolicy,
}

impl RestStore {
    /// Build a client for `database_url`. Query parameters on the URL (such
    /// as an emulator's `?ns=`) are carried on every request.
    pub fn new(database_url: &str, timeout: Duration, retry: RetryPolicy) -> Result<Self> {
        let base = Url::parse(database_url)
            .map_err(|e| StoreError::InvalidPath(format!("{}: {}", database_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(StoreError::InvalidPath(database_url.to_string()).into());
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Network(e.to_string()))?;
        Ok(Self {
            client,
            base,
            token: None,
            retry,
        })
    }

    /// Attach the signed-in user's id token to every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Full request URL for `path`.
    pub fn url(&self, path: &str, query: &[(&str, String)]) -> Result<Url> {
        check_path(path)?;
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| StoreError::InvalidPath(self.base.to_string()))?;
            segments.pop_if_empty();
            let parts: Vec<&str> = path.split('/').collect();
            let last = parts.len() - 1;
            for (i, part) in parts.iter().enumerate() {
                if i == last {
                    segments.push(&format!("{}.json", part));
                } else {
                    segments.push(part);
                }
            }
        }

        if self.token.is_some() || !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            if let Some(token) = &self.token {
                pairs.append_pair("auth", token);
            }
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        query: &[(&str, String)],
    ) -> Result<Value> {
        let url = self.url(path, query)?;
        let idempotent = method != Method::POST;
        let mut attempt = 0;

        loop {
            debug!(%method, path, attempt, "store request");
            let mut request = self.client.request(method.clone(), url.clone());
            if let Some(body) = body {
                request = request.json(body);
            }

            let (error, retryable) = match request.send() {
                Ok(response) => {
                    let status = response.status();
                    let text = response
                        .text()
                        .map_err(|e| StoreError::Network(e.to_string()))?;
                    if status.is_success() {
                        return parse_body(path, &text);
                    }
                    let error = status_error(status, &text);
                    let retryable = idempotent && error.is_transient();
                    (error, retryable)
                }
                Err(e) => {
                    let retryable = idempotent || e.is_connect();
                    (StoreError::Network(e.to_string()), retryable)
                }
            };

            if !retryable || attempt >= self.retry.retries {
                return Err(error.into());
            }
            let delay = self.retry.delay(attempt);
            warn!(path, attempt, error = %error, delay_ms = delay.as_millis() as u64, "store request failed, retrying");
            std::thread::sleep(delay);
            attempt += 1;
        }
    }
}

fn parse_body(path: &str, text: &str) -> Result<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| super::malformed(path, e))
}

fn status_error(status: StatusCode, body: &str) -> StoreError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => StoreError::PermissionDenied(message),
        _ => StoreError::Rejected {
            status: status.as_u16(),
            message,
        },
    }
}

impl DocumentStore for RestStore {
    fn get(&self, path: &str) -> Result<Option<Value>> {
        match self.send(Method::GET, path, None, &[])? {
            Value::Null => Ok(None),
            value => Ok(Some(value)),
        }
    }

    fn set(&self, path: &str, value: &Value) -> Result<()> {
        self.send(Method::PUT, path, Some(value), &[])?;
        Ok(())
    }

    fn append(&self, path: &str, value: &Value) -> Result<String> {
        let reply = self.send(Method::POST, path, Some(value), &[])?;
        reply
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                StoreError::Malformed {
                    path: path.to_string(),
                    reason: "append reply has no name".to_string(),
                }
                .into()
            })
    }

    fn update(&self, path: &str, fields: &Map<String, Value>) -> Result<()> {
        self.send(
            Method::PATCH,
            path,
            Some(&Value::Object(fields.clone())),
            &[],
        )?;
        Ok(())
    }

    fn remove(&self, path: &str) -> Result<()> {
        self.send(Method::DELETE, path, None, &[])?;
        Ok(())
    }

    fn query(
        &self,
        path: &str,
        order_by: &str,
        equal_to: &str,
        limit: usize,
    ) -> Result<Vec<(String, Value)>> {
        let query = [
            ("orderBy", Value::from(order_by).to_string()),
            ("equalTo", Value::from(equal_to).to_string()),
            ("limitToFirst", limit.to_string()),
        ];
        let reply = self.send(Method::GET, path, None, &query)?;

        let mut hits: Vec<(String, Value)> = match reply {
            Value::Object(map) => map.into_iter().collect(),
            Value::Null => Vec::new(),
            _ => {
                return Err(StoreError::Malformed {
                    path: path.to_string(),
                    reason: "query reply is not an object".to_string(),
                }
                .into())
            }
        };
        // The reply is an unordered object; restore key order for the tie-break.
        hits.sort_by(|a, b| a.0.cmp(&b.0));
        hits.truncate(limit);
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(url: &str) -> RestStore {
        RestStore::new(url, Duration::from_secs(1), RetryPolicy::none()).unwrap()
    }

    #[test]
    fn test_url_plain() {
        let s = store("https://demo-default-rtdb.firebaseio.com");
        let url = s.url("users/a@b_com/public", &[]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://demo-default-rtdb.firebaseio.com/users/a@b_com/public.json"
        );
    }

    #[test]
    fn test_url_keeps_namespace_and_adds_token() {
        let s = store("http://127.0.0.1:9000/?ns=demo-pnut").with_token("tok");
        let url = s.url("users/x", &[]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:9000/users/x.json?ns=demo-pnut&auth=tok"
        );
    }

    #[test]
    fn test_url_query_is_json_encoded() {
        let s = store("https://db.example.com");
        let query = [
            ("orderBy", Value::from("name").to_string()),
            ("equalTo", Value::from("deploy").to_string()),
            ("limitToFirst", "1".to_string()),
        ];
        let url = s.url("users/x/private/aliases", &query).unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs[0], ("orderBy".into(), "\"name\"".into()));
        assert_eq!(pairs[1], ("equalTo".into(), "\"deploy\"".into()));
        assert_eq!(pairs[2], ("limitToFirst".into(), "1".into()));
    }

    #[test]
    fn test_url_rejects_bad_path() {
        let s = store("https://db.example.com");
        assert!(s.url("users/a.b", &[]).is_err());
    }

    #[test]
    fn test_status_error_mapping() {
        let e = status_error(StatusCode::FORBIDDEN, r#"{"error":"Permission denied"}"#);
        assert!(matches!(e, StoreError::PermissionDenied(ref m) if m == "Permission denied"));

        let e = status_error(StatusCode::SERVICE_UNAVAILABLE, "busy");
        assert!(e.is_transient());
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let policy = RetryPolicy {
            retries: 5,
            backoff: Duration::from_millis(100),
        };
        assert_eq!(policy.delay(0), Duration::from_millis(100));
        assert_eq!(policy.delay(1), Duration::from_millis(200));
        assert_eq!(policy.delay(3), Duration::from_millis(800));
        assert_eq!(policy.delay(30), Duration::from_secs(10));
    }

    #[test]
    fn test_unreachable_store_is_network_error() {
        // Port 9 (discard) on localhost is closed in test environments.
        let s = store("http://127.0.0.1:9");
        let err = s.get("users").unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Store(StoreError::Network(_))
        ));
    }
}
