use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Collaborator-boundary failure: the model could not be reached or did
/// not produce a completion. Distinct from malformed output, which is a
/// data-quality problem the pipeline salvages.
#[derive(Debug, Clone, Error)]
pub enum ModelError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("model endpoint returned status {0}")]
    Status(u16),
    #[error("model response body was not the expected envelope: {0}")]
    Envelope(String),
}

/// The generative-model collaborator: prompt string in, raw completion
/// out. May be slow, may fail transiently, may return nonsense; callers
/// own retry policy and salvage.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ModelError>;
}

#[derive(Clone)]
pub struct OllamaClient {
    base_url: String,
    model: String,
    timeout: Duration,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    stream: bool,
}

#[derive(Deserialize)]
struct OllamaResponse {
    response: String,
}

impl OllamaClient {
    pub fn new(base_url: String, model: String, timeout: Duration) -> Self {
        Self {
            base_url,
            model,
            timeout,
            client: reqwest::Client::new(),
        }
    }

    pub fn localhost() -> Self {
        Self::new(
            "http://localhost:11434".to_string(),
            "llama3".to_string(),
            Duration::from_secs(60),
        )
    }
}

#[async_trait]
impl ModelClient for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String, ModelError> {
        let url = format!("{}/api/generate", self.base_url);

        let request = OllamaRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| ModelError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ModelError::Status(response.status().as_u16()));
        }

        let envelope: OllamaResponse = response
            .json()
            .await
            .map_err(|e| ModelError::Envelope(e.to_string()))?;

        Ok(envelope.response)
    }
}
