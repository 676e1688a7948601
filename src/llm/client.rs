use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::errors::{ConfigurationError, GenerationError};

const GROQ_CHAT_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";

/// Seam between the command generator and the model transport, so tests
/// can substitute a canned client.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError>;
}

#[derive(Debug)]
enum Provider {
    /// OpenAI-style chat completions endpoint (groq, openai)
    OpenAiCompatible { url: String, api_key: String },
    /// Local Ollama generate endpoint
    Ollama { base_url: String },
}

/// Handle to one remote model endpoint, built once per run and passed
/// by reference to the generator.
#[derive(Debug)]
pub struct LmClient {
    http: Client,
    provider: Provider,
    model: String,
}

impl LmClient {
    /// Resolve a "provider/model" identifier into a ready client.
    pub fn configure(model_id: &str) -> Result<Self, ConfigurationError> {
        let (provider_name, model) = model_id
            .split_once('/')
            .ok_or_else(|| ConfigurationError::BadModelId(model_id.to_string()))?;
        if provider_name.is_empty() || model.is_empty() {
            return Err(ConfigurationError::BadModelId(model_id.to_string()));
        }

        let provider = match provider_name {
            "groq" => Provider::OpenAiCompatible {
                url: GROQ_CHAT_URL.to_string(),
                api_key: require_env("groq", "GROQ_API_KEY")?,
            },
            "openai" => Provider::OpenAiCompatible {
                url: OPENAI_CHAT_URL.to_string(),
                api_key: require_env("openai", "OPENAI_API_KEY")?,
            },
            "ollama" => Provider::Ollama {
                base_url: std::env::var("OLLAMA_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_OLLAMA_BASE_URL.to_string()),
            },
            other => return Err(ConfigurationError::UnknownProvider(other.to_string())),
        };

        log::debug!("configured model '{}' via {}", model, provider_name);
        Ok(Self {
            http: Client::new(),
            provider,
            model: model.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn complete_chat(
        &self,
        url: &str,
        api_key: &str,
        prompt: &str,
    ) -> Result<String, GenerationError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let response = self
            .http
            .post(url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Provider { status, body });
        }

        let reply: ChatResponse = response.json().await?;
        reply
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(GenerationError::EmptyReply)
    }

    async fn complete_ollama(
        &self,
        base_url: &str,
        prompt: &str,
    ) -> Result<String, GenerationError> {
        let request = OllamaRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
        };

        let response = self
            .http
            .post(format!("{}/api/generate", base_url))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Provider { status, body });
        }

        let reply: OllamaResponse = response.json().await?;
        Ok(reply.response)
    }
}

#[async_trait]
impl CompletionClient for LmClient {
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        match &self.provider {
            Provider::OpenAiCompatible { url, api_key } => {
                self.complete_chat(url, api_key, prompt).await
            }
            Provider::Ollama { base_url } => self.complete_ollama(base_url, prompt).await,
        }
    }
}

fn require_env(provider: &str, var: &str) -> Result<String, ConfigurationError> {
    std::env::var(var).map_err(|_| ConfigurationError::MissingApiKey {
        provider: provider.to_string(),
        var: var.to_string(),
    })
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReplyMessage,
}

#[derive(Deserialize)]
struct ChatReplyMessage {
    content: String,
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
