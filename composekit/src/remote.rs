//! Remote correction/translation client.
//!
//! Blocking `reqwest` client for simplicity - no async runtime needed.
//! The session never calls this during keystroke handling; the host
//! invokes it after the debounce protocol and hands results back through
//! `apply_remote_results`.
//!
//! Every failure path resolves to an empty vector: a missing credential,
//! a network error, a non-success status or an unparseable body. The
//! suggestion bar simply stays empty.

use composekit_core::{Config, Mode, Suggestion};
use std::time::Duration;
use tracing::debug;

/// Client for the configured correction/translation endpoint.
pub struct RemoteService {
    endpoint: String,
    api_key: String,
    timeout: Duration,
}

impl RemoteService {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            timeout: Duration::from_millis(15_000),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            endpoint: config.remote_endpoint.clone(),
            api_key: config.api_key.clone(),
            timeout: Duration::from_millis(config.remote_timeout_ms),
        }
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Sentence rewrite candidates for the current mode's language.
    pub fn correct(&self, text: &str, mode: Mode) -> Vec<Suggestion> {
        self.request("correct", text, mode)
            .into_iter()
            .map(|t| Suggestion::conversion(t, text))
            .collect()
    }

    /// Translations of already-confirmed Japanese text.
    pub fn translate_only(&self, text: &str, mode: Mode) -> Vec<Suggestion> {
        if !mode.is_japanese_input() {
            return vec![];
        }
        self.request("translate", text, mode)
            .into_iter()
            .map(|t| Suggestion::translation(t, text))
            .collect()
    }

    fn request(&self, task: &str, text: &str, mode: Mode) -> Vec<String> {
        if self.api_key.is_empty() || self.endpoint.is_empty() || text.is_empty() {
            return vec![];
        }
        match self.request_blocking(task, text, mode) {
            Ok(results) => results,
            Err(err) => {
                debug!(%task, error = %err, "remote request failed");
                vec![]
            }
        }
    }

    fn request_blocking(
        &self,
        task: &str,
        text: &str,
        mode: Mode,
    ) -> Result<Vec<String>, Box<dyn std::error::Error>> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()?;

        let body = serde_json::json!({
            "text": text,
            "task": task,
            "mode": mode,
        });

        let response = client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .json(&body)
            .send()?;
        if !response.status().is_success() {
            return Err(format!("status {}", response.status()).into());
        }

        let raw = response.text()?;
        Ok(parse_string_array(&raw))
    }
}

/// Parse a JSON string array, tolerating a markdown code fence around it.
/// A body that is neither becomes a single candidate if non-empty.
fn parse_string_array(raw: &str) -> Vec<String> {
    let cleaned = strip_code_fence(raw);
    if let Ok(array) = serde_json::from_str::<Vec<String>>(cleaned) {
        return array;
    }
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        vec![]
    } else {
        vec![trimmed.to_string()]
    }
}

fn strip_code_fence(raw: &str) -> &str {
    let mut s = raw.trim();
    if s.starts_with("```") {
        if let Some(newline) = s.find('\n') {
            s = &s[newline + 1..];
        }
        s = s.strip_suffix("```").unwrap_or(s);
        s = s.trim();
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credential_short_circuits() {
        let service = RemoteService::new("https://example.invalid/v1", "");
        assert!(service.correct("helo world", Mode::EnglishCorrection).is_empty());
    }

    #[test]
    fn missing_endpoint_short_circuits() {
        let service = RemoteService::new("", "key");
        assert!(service.correct("helo world", Mode::EnglishCorrection).is_empty());
    }

    #[test]
    fn translate_only_is_japanese_only() {
        let service = RemoteService::new("https://example.invalid/v1", "key");
        assert!(service
            .translate_only("hello", Mode::EnglishCorrection)
            .is_empty());
    }

    #[test]
    fn parses_bare_array() {
        assert_eq!(
            parse_string_array(r#"["How are you?", "How's it going?"]"#),
            vec!["How are you?", "How's it going?"]
        );
    }

    #[test]
    fn parses_fenced_array() {
        let raw = "```json\n[\"元気？\"]\n```";
        assert_eq!(parse_string_array(raw), vec!["元気？"]);
    }

    #[test]
    fn plain_text_becomes_single_candidate() {
        assert_eq!(parse_string_array("How are you?"), vec!["How are you?"]);
        assert!(parse_string_array("   ").is_empty());
    }
}
