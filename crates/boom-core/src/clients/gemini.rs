//! Gemini client for report text generation

use crate::backoff::{retry_with_backoff, BackoffPolicy};
use crate::clients::transport::{HttpTransport, OutboundRequest};
use crate::config::GeminiConfig;
use crate::error::Result;
use serde_json::{json, Value};
use std::sync::Arc;

const SERVICE: &str = "Gemini";
const API_KEY_HEADER: &str = "x-goog-api-key";

pub struct GeminiClient {
    config: GeminiConfig,
    transport: Arc<dyn HttpTransport>,
    policy: BackoffPolicy,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig, transport: Arc<dyn HttpTransport>, policy: BackoffPolicy) -> Self {
        Self {
            config,
            transport,
            policy,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn request_body(&self, prompt: &str, system_instruction: &str) -> Value {
        let mut body = json!({
            "contents": [
                {
                    "role": "user",
                    "parts": [{ "text": prompt }]
                }
            ],
            "systemInstruction": {
                "parts": [{ "text": system_instruction }]
            }
        });
        if self.config.search_grounding {
            body["tools"] = json!([{ "google_search": {} }]);
        }
        body
    }

    /// Generate text for a prompt. `None` means the service answered but
    /// produced no usable text.
    pub async fn generate(&self, prompt: &str, system_instruction: &str) -> Result<Option<String>> {
        let body = self.request_body(prompt, system_instruction);

        let response = retry_with_backoff(&self.policy, "Gemini generateContent", || {
            let request = OutboundRequest {
                url: self.endpoint(),
                bearer_token: None,
                headers: vec![(API_KEY_HEADER, self.config.api_key.clone())],
                body: body.clone(),
            };
            async move {
                self.transport
                    .post_json(request)
                    .await?
                    .error_for_status(SERVICE)
            }
        })
        .await?;

        let result: Value = response.json()?;
        Ok(first_candidate_text(&result))
    }
}

/// Concatenated text parts of the first candidate, if any are non-blank
pub fn first_candidate_text(result: &Value) -> Option<String> {
    let parts = result["candidates"][0]["content"]["parts"].as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|part| part["text"].as_str())
        .collect();

    if text.trim().is_empty() {
        None
    } else {
        Some(text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_candidate_text() {
        let result = json!({
            "candidates": [
                { "content": { "parts": [{ "text": "Deploy " }, { "text": "boom." }] } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        });
        assert_eq!(first_candidate_text(&result).as_deref(), Some("Deploy boom."));
    }

    #[test]
    fn test_missing_or_blank_candidate() {
        assert!(first_candidate_text(&json!({})).is_none());
        assert!(first_candidate_text(&json!({ "candidates": [] })).is_none());
        assert!(first_candidate_text(&json!({
            "candidates": [{ "content": { "parts": [{ "text": "  " }] } }]
        }))
        .is_none());
        assert!(first_candidate_text(&json!({
            "candidates": [{ "finishReason": "SAFETY" }]
        }))
        .is_none());
    }
}
