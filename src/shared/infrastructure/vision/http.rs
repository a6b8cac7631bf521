use crate::shared::infrastructure::vision::prompt::RECEIPT_PROMPT;
use crate::shared::infrastructure::vision::{ReceiptImage, VisionEngine, VisionError};
use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct VisionConfig {
    pub api_key: String,
    pub endpoint: String,
    pub model: String,
    /// Per attempt.
    pub timeout: Duration,
    pub max_retries: usize,
    /// First backoff delay, doubled after every retry.
    pub retry_delay: Duration,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: "https://openrouter.ai/api/v1/chat/completions".into(),
            model: "google/gemini-pro-1.5".into(),
            timeout: Duration::from_secs(30),
            max_retries: 2,
            retry_delay: Duration::from_millis(1000),
        }
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ChatMessage>,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<ErrorDetail>,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

/// Chat-completion vision engine (OpenRouter compatible).
pub struct HttpVisionEngine {
    client: Client,
    config: VisionConfig,
}

impl HttpVisionEngine {
    pub fn new(config: VisionConfig) -> Result<Self, VisionError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| VisionError::Transport(err.to_string()))?;
        Ok(Self { client, config })
    }

    fn backoff(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(self.config.retry_delay)
            .with_max_delay(self.config.retry_delay * 8)
            .with_max_times(self.config.max_retries)
    }

    fn request_body(&self, image: &ReceiptImage) -> Value {
        json!({
            "model": self.config.model,
            "temperature": 0.1,
            "max_tokens": 4000,
            "messages": [{
                "role": "user",
                "content": [
                    {"type": "text", "text": RECEIPT_PROMPT},
                    {"type": "image_url", "image_url": {"url": image.data_url()}}
                ]
            }]
        })
    }

    async fn post_once(&self, image: &ReceiptImage) -> Result<String, VisionError> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .header("X-Title", "Shift receipts")
            .json(&self.request_body(image))
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        match status {
            StatusCode::FORBIDDEN => return Err(VisionError::AccessDenied),
            StatusCode::TOO_MANY_REQUESTS => return Err(VisionError::RateLimited),
            status if !status.is_success() => {
                let message = response
                    .json::<ErrorBody>()
                    .await
                    .ok()
                    .and_then(|body| body.error)
                    .and_then(|detail| detail.message)
                    .unwrap_or_default();
                return Err(VisionError::Upstream {
                    status: status.as_u16(),
                    message,
                });
            }
            _ => {}
        }

        let body: ChatResponse = response.json().await.map_err(classify_transport)?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content);
        if content.is_none() {
            warn!("vision engine answered without content");
        }
        Ok(content.unwrap_or_default())
    }
}

fn classify_transport(err: reqwest::Error) -> VisionError {
    if err.is_timeout() {
        VisionError::Timeout
    } else {
        VisionError::Transport(err.to_string())
    }
}

#[async_trait]
impl VisionEngine for HttpVisionEngine {
    async fn read_receipt(&self, image: &ReceiptImage) -> Result<String, VisionError> {
        let text = (|| async { self.post_once(image).await })
            .retry(self.backoff())
            .when(VisionError::is_retryable)
            .notify(|err, delay| {
                warn!(error = %err, ?delay, "vision request failed, retrying");
            })
            .await?;
        debug!(chars = text.len(), "vision engine answered");
        Ok(text)
    }
}
