use axum::{Json, extract::State};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::validate_prompt;
use super::{ApiError, ApiResponse, AppState};
use crate::clients::openai::{CommandReview, GeneratedCommand};

#[derive(Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
}

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub command: String,
}

/// POST /assistant/generate
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<GenerateRequest>,
) -> Result<Json<ApiResponse<GeneratedCommand>>, ApiError> {
    let prompt = validate_prompt(&payload.prompt)?;

    let generated = state.shared.assistant.generate(prompt).await?;

    Ok(Json(ApiResponse::success(generated)))
}

/// POST /assistant/analyze
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AnalyzeRequest>,
) -> Result<Json<ApiResponse<CommandReview>>, ApiError> {
    let command = validate_prompt(&payload.command)?;

    let review = state.shared.assistant.analyze(command).await?;

    Ok(Json(ApiResponse::success(review)))
}
