use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, SystemStatus};

/// GET /system/status
pub async fn get_status(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<SystemStatus>>, ApiError> {
    let bots = state
        .store()
        .count_bots()
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;

    let commands = state
        .store()
        .count_commands()
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;

    let tracked_commands = state.store().count_command_stats().await?;

    Ok(Json(ApiResponse::success(SystemStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime: state.start_time.elapsed().as_secs(),
        bots,
        commands,
        tracked_commands,
    })))
}
