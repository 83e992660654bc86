//! Gemini `streamGenerateContent` client

use reqwest::blocking::Client;
use serde_json::json;
use std::io::BufReader;
use std::time::Duration;
use tracing::debug;

use super::{ChunkStream, CompletionRequest, CompletionStreamer, LlmError, SseChunks};
use crate::config::ServiceConfig;

/// Blocking streaming client for the Gemini API.
///
/// No request timeout is set; the stream may block for as long as the
/// server keeps it open.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(config: &ServiceConfig) -> Result<Self, LlmError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or(LlmError::MissingApiKey)?;

        let client = Client::builder().timeout(None::<Duration>).build()?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        let model = model.strip_prefix("models/").unwrap_or(model);
        format!("{}/models/{}:streamGenerateContent?alt=sse", self.base_url, model)
    }
}

pub(crate) fn request_body(request: &CompletionRequest) -> serde_json::Value {
    let mut body = json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": request.user_text }]
        }]
    });
    if let Some(system) = &request.system_prompt {
        body["systemInstruction"] = json!({ "parts": [{ "text": system }] });
    }
    body
}

impl CompletionStreamer for GeminiClient {
    fn stream_completion(&self, request: &CompletionRequest) -> Result<ChunkStream<'_>, LlmError> {
        let url = self.endpoint(&request.model);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request_body(request))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(LlmError::Status { status: status.as_u16(), body });
        }

        Ok(Box::new(SseChunks::new(BufReader::new(response))))
    }
}
