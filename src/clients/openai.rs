use anyhow::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::AssistantConfig;

/// A scaffolded command returned by the model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratedCommand {
    pub command: String,
    pub response: String,
    pub description: String,
}

/// Critique of an existing command returned by the model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandReview {
    pub suggestions: Vec<String>,
    pub improvements: Vec<String>,
    pub rating: i32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    #[must_use]
    pub fn new(config: &AssistantConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(
                config.request_timeout_seconds.into(),
            ))
            .build()
            .unwrap_or_default();

        Self::with_shared_client(client, config)
    }

    #[must_use]
    pub fn with_shared_client(client: Client, config: &AssistantConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    pub async fn generate_command(&self, prompt: &str) -> Result<GeneratedCommand> {
        let value = self
            .chat_json(
                "You are an expert at creating chat bot commands. Generate a command with its \
                 response and description based on the user's prompt. Response should be in JSON \
                 format with keys: command, response, description.",
                prompt,
            )
            .await?;

        Ok(serde_json::from_value(value)?)
    }

    pub async fn analyze_command(&self, command: &str) -> Result<CommandReview> {
        let value = self
            .chat_json(
                "Analyze the given chat bot command and provide suggestions for improvements, \
                 potential issues, and a rating from 1-10. Response should be in JSON format \
                 with keys: suggestions, improvements, rating.",
                command,
            )
            .await?;

        Ok(serde_json::from_value(value)?)
    }

    /// One chat-completions round trip with a forced JSON object response.
    async fn chat_json(&self, system_prompt: &str, user_prompt: &str) -> Result<serde_json::Value> {
        let url = format!("{}/chat/completions", self.base_url);

        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": user_prompt },
            ],
            "response_format": { "type": "json_object" },
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("OpenAI API error: {} - {}", status, body));
        }

        let completion: ChatCompletionResponse = response.json().await?;

        let content = completion
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .unwrap_or("{}");

        Ok(serde_json::from_str(content)?)
    }
}
