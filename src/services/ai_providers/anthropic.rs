use async_trait::async_trait;
use reqwest::Client;
use crate::config::constants::{ANTHROPIC_BASE_URL, ANTHROPIC_VERSION};
use crate::enums::ai_provider_error::AiProviderError;
use crate::structs::ai::anthropic::anthropic_message::AnthropicMessage;
use crate::structs::ai::anthropic::anthropic_message_request::AnthropicMessageRequest;
use crate::structs::ai::anthropic::anthropic_message_response::AnthropicMessageResponse;
use crate::structs::ai::api_error::ApiErrorResponse;
use crate::structs::config::ai_config::AiConfig;
use crate::traits::ai_provider::AiProvider;

#[derive(Clone)]
pub struct AnthropicProvider {
    api_key: String,
    base_url: String,
    client: Client,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl AnthropicProvider {

    pub fn new(api_key: String, config: &AiConfig) -> Self {
        Self {
            api_key,
            base_url: ANTHROPIC_BASE_URL.to_string(),
            client: Client::new(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }

    /// Reads the key from the environment variable named in the config.
    pub fn from_env(config: &AiConfig) -> Result<Self, AiProviderError> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            AiProviderError::AuthenticationError(format!("environment variable {} is not set", config.api_key_env))
        })?;
        Ok(Self::new(api_key, config))
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn get_anthropic_messages(&self, user_prompts: Vec<String>) -> Vec<AnthropicMessage> {
        user_prompts
            .into_iter()
            .map(|content| AnthropicMessage {
                role: String::from("user"),
                content,
            })
            .collect()
    }

    fn get_request(&self, system_prompt: String, messages: Vec<AnthropicMessage>) -> AnthropicMessageRequest {
        AnthropicMessageRequest {
            model: self.model.clone(),
            system: system_prompt,
            max_tokens: self.max_tokens,
            temperature: Some(self.temperature),
            messages,
        }
    }

    async fn make_request(&self, url: String, request_body: AnthropicMessageRequest) -> Result<reqwest::Response, AiProviderError> {
        log::debug!("📦 Request model: {}", request_body.model);

        self.client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AiProviderError::NetworkError(e.to_string()))
    }

    fn error_from_body(status: reqwest::StatusCode, body: String) -> AiProviderError {
        let detail = serde_json::from_str::<ApiErrorResponse>(&body)
            .map(|parsed| format!("{}: {}", parsed.error.error_type, parsed.error.message))
            .unwrap_or(body);

        match status.as_u16() {
            401 | 403 => AiProviderError::AuthenticationError(detail),
            _ => AiProviderError::ApiError(format!("HTTP {}: {}", status, detail)),
        }
    }
}

#[async_trait]
impl AiProvider for AnthropicProvider {

    async fn chat(&self, system_prompt: String, user_prompts: Vec<String>) -> Result<String, AiProviderError> {
        let url = format!("{}/messages", self.base_url);
        let messages = self.get_anthropic_messages(user_prompts);
        let request_body = self.get_request(system_prompt, messages);

        let response = self.make_request(url, request_body).await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            log::error!("❌ API Error Response: {}", error_text);
            return Err(Self::error_from_body(status, error_text));
        }

        let body: AnthropicMessageResponse = response
            .json()
            .await
            .map_err(|e| AiProviderError::SerializationError(e.to_string()))?;

        if body.stop_reason.as_deref() == Some("max_tokens") {
            log::warn!("⚠️ Reply hit the max_tokens limit and may be truncated");
        }

        Ok(body.text())
    }
}
