//! Remote prompt-interpretation client.
//!
//! The core treats the interpretation backend as a black box: POST a prompt,
//! get back something JSON-ish. This crate holds the one async seam of the
//! system, a single attempt per prompt with a hard wall-clock timeout and no
//! retries. Every failure is a distinguishable [`InterpError`]; the caller
//! falls back to local generation rather than surfacing any of them.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use thiserror::Error;

/// Backend endpoint configuration with env overrides.
#[derive(Debug, Clone)]
pub struct InterpCfg {
    pub endpoint: String,
    pub model: Option<String>,
    pub timeout_ms: u64,
}

impl Default for InterpCfg {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8787/interpret".to_string(),
            model: None,
            timeout_ms: 8_000,
        }
    }
}

impl InterpCfg {
    /// Defaults overridden by `MIRAGE_INTERP_URL`, `MIRAGE_INTERP_MODEL`
    /// and `MIRAGE_INTERP_TIMEOUT_MS`.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(url) = std::env::var("MIRAGE_INTERP_URL") {
            cfg.endpoint = url;
        }
        if let Ok(model) = std::env::var("MIRAGE_INTERP_MODEL") {
            cfg.model = Some(model);
        }
        if let Some(ms) = std::env::var("MIRAGE_INTERP_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            cfg.timeout_ms = ms;
        }
        cfg
    }
}

/// Distinguishable interpretation failures. None of these panic and none
/// bypass the fallback path.
#[derive(Debug, Error)]
pub enum InterpError {
    #[error("interpretation request timed out")]
    Timeout,
    #[error("http transport error: {0}")]
    Http(reqwest::Error),
    #[error("backend returned status {0}")]
    Status(u16),
    #[error("could not read response body: {0}")]
    Decode(String),
}

/// The async boundary the prompt-handling flow depends on. Implementations
/// other than HTTP (test stubs, a local model) plug in here.
#[async_trait]
pub trait Interpreter: Send + Sync {
    async fn interpret(&self, prompt: &str) -> Result<Value, InterpError>;
}

/// Single-endpoint HTTP interpreter.
pub struct HttpInterpreter {
    client: Client,
    cfg: InterpCfg,
}

impl HttpInterpreter {
    /// The timeout is installed on the client, so every request carries it.
    pub fn new(cfg: InterpCfg) -> Result<Self, InterpError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .build()
            .map_err(InterpError::Http)?;
        Ok(Self { client, cfg })
    }

    pub fn from_env() -> Result<Self, InterpError> {
        Self::new(InterpCfg::from_env())
    }

    pub fn cfg(&self) -> &InterpCfg {
        &self.cfg
    }
}

#[async_trait]
impl Interpreter for HttpInterpreter {
    async fn interpret(&self, prompt: &str) -> Result<Value, InterpError> {
        let mut body = json!({ "prompt": prompt });
        if let Some(model) = &self.cfg.model {
            body["model"] = json!(model);
        }
        log::debug!("posting prompt to {}", self.cfg.endpoint);
        let resp = self
            .client
            .post(&self.cfg.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(classify_send)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(InterpError::Status(status.as_u16()));
        }
        let text = resp.text().await.map_err(classify_read)?;
        Ok(body_to_value(&text))
    }
}

fn classify_send(e: reqwest::Error) -> InterpError {
    if e.is_timeout() {
        InterpError::Timeout
    } else {
        InterpError::Http(e)
    }
}

fn classify_read(e: reqwest::Error) -> InterpError {
    if e.is_timeout() {
        InterpError::Timeout
    } else {
        InterpError::Decode(e.to_string())
    }
}

/// Decode a response body: JSON stays structured, anything else is handed
/// to the plan parser as raw text.
pub fn body_to_value(body: &str) -> Value {
    match serde_json::from_str::<Value>(body.trim()) {
        Ok(v) => v,
        Err(_) => Value::String(body.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_json_stays_structured() {
        let v = body_to_value(r#"{"tags":["oasis"]}"#);
        assert_eq!(v["tags"][0], "oasis");
    }

    #[test]
    fn body_text_becomes_a_string_value() {
        let v = body_to_value("```json\n{\"tags\":[]}\n```");
        assert!(matches!(v, Value::String(_)));
    }

    #[test]
    fn defaults_are_sane() {
        let cfg = InterpCfg::default();
        assert!(cfg.endpoint.starts_with("http://"));
        assert_eq!(cfg.model, None);
        assert_eq!(cfg.timeout_ms, 8_000);
    }

    #[test]
    fn client_builds_from_defaults() {
        assert!(HttpInterpreter::new(InterpCfg::default()).is_ok());
    }
}
