use super::InferenceService;
use crate::models::ImageRecord;
use crate::{parser, prompts, Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, warn};

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Total call attempts per file (first try plus three retries).
const MAX_ATTEMPTS: u32 = 4;

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
    system: String,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: Vec<ContentBlock>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ContentBlock {
    Text { text: String },
    Image { source: ImageSource },
}

#[derive(Debug, Serialize)]
struct ImageSource {
    #[serde(rename = "type")]
    source_type: String,
    media_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ResponseBlock>,
}

#[derive(Debug, Deserialize)]
struct ResponseBlock {
    text: Option<String>,
}

/// Anthropic Messages API client for receipt filename suggestions.
pub struct ClaudeClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl ClaudeClient {
    pub fn new(api_key: String, model: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("Failed to build HTTP client");

        Self::new_with_client(api_key, model, client)
    }

    pub fn new_with_client(api_key: String, model: String, client: Client) -> Self {
        Self {
            client,
            api_key,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    fn build_request(&self, image: &ImageRecord) -> MessagesRequest {
        use base64::Engine as _;
        let data = base64::engine::general_purpose::STANDARD.encode(&image.bytes);

        MessagesRequest {
            model: self.model.clone(),
            max_tokens: 1024,
            temperature: 0.0,
            system: prompts::NAMING_SYSTEM.to_string(),
            messages: vec![Message {
                role: "user".to_string(),
                content: vec![
                    ContentBlock::Text {
                        text: prompts::NAMING_USER.to_string(),
                    },
                    ContentBlock::Image {
                        source: ImageSource {
                            source_type: "base64".to_string(),
                            media_type: image.format.media_type().to_string(),
                            data,
                        },
                    },
                ],
            }],
        }
    }

    /// One call attempt. Any transport failure, non-success status, malformed
    /// body, or empty text payload is an error the caller may retry.
    async fn request_suggestion(&self, request: &MessagesRequest) -> Result<String> {
        tracing::debug!("Sending filename suggestion request to Anthropic");

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to Anthropic: {}", e);
                e
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            tracing::error!("Anthropic API error (status {}): {}", status, error_text);
            return Err(Error::AiProvider(format!(
                "API error (status {}): {}",
                status, error_text
            )));
        }

        let body = response.text().await?;
        let parsed: MessagesResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse Anthropic response: {}\nBody: {}", e, body);
            Error::AiProvider(format!("Failed to parse Anthropic response: {}", e))
        })?;

        let text = parsed
            .content
            .first()
            .and_then(|block| block.text.clone())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(Error::AiProvider(
                "Empty text payload in model response".to_string(),
            ));
        }

        Ok(text)
    }
}

#[async_trait]
impl InferenceService for ClaudeClient {
    async fn suggest_filename(&self, image: &ImageRecord) -> Result<String> {
        // The same request is reused verbatim across attempts.
        let request = self.build_request(image);

        let mut attempt = 0;
        let text = loop {
            attempt += 1;
            match self.request_suggestion(&request).await {
                Ok(text) => break text,
                Err(e) if attempt < MAX_ATTEMPTS => {
                    warn!(
                        "[{}] Inference attempt {}/{} failed: {}. Retrying...",
                        image.file_name, attempt, MAX_ATTEMPTS, e
                    );
                }
                Err(e) => {
                    error!(
                        "[{}] Inference failed after {} attempts: {}",
                        image.file_name, MAX_ATTEMPTS, e
                    );
                    return Err(e);
                }
            }
        };

        // Extraction failures are terminal, never retried.
        parser::extract_filename(&text)
    }
}
