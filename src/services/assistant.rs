//! Domain service for the AI command assistant.
//!
//! Wraps the provider client with input validation and the enabled/configured
//! gate, so handlers only deal in domain results.

use std::sync::Arc;
use thiserror::Error;

use crate::clients::openai::{CommandReview, GeneratedCommand, OpenAiClient};

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("Assistant is disabled")]
    Disabled,

    #[error("Assistant API key is not configured")]
    MissingApiKey,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Provider error: {0}")]
    Provider(String),
}

pub struct AssistantService {
    client: Arc<OpenAiClient>,
    enabled: bool,
    has_api_key: bool,
}

impl AssistantService {
    #[must_use]
    pub fn new(client: Arc<OpenAiClient>, enabled: bool, has_api_key: bool) -> Self {
        Self {
            client,
            enabled,
            has_api_key,
        }
    }

    fn check_available(&self) -> Result<(), AssistantError> {
        if !self.enabled {
            return Err(AssistantError::Disabled);
        }
        if !self.has_api_key {
            return Err(AssistantError::MissingApiKey);
        }
        Ok(())
    }

    /// Scaffold a new command from a free-text prompt.
    pub async fn generate(&self, prompt: &str) -> Result<GeneratedCommand, AssistantError> {
        self.check_available()?;

        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(AssistantError::Validation(
                "Prompt cannot be empty".to_string(),
            ));
        }

        self.client
            .generate_command(prompt)
            .await
            .map_err(|e| AssistantError::Provider(e.to_string()))
    }

    /// Critique an existing command definition.
    pub async fn analyze(&self, command: &str) -> Result<CommandReview, AssistantError> {
        self.check_available()?;

        let command = command.trim();
        if command.is_empty() {
            return Err(AssistantError::Validation(
                "Command cannot be empty".to_string(),
            ));
        }

        self.client
            .analyze_command(command)
            .await
            .map_err(|e| AssistantError::Provider(e.to_string()))
    }
}
