use axum::{
    Extension, Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::auth::CurrentUser;
use super::bots::find_owned_bot;
use super::validation::{validate_command_name, validate_response_time};
use super::{ApiError, ApiResponse, AppState, NotificationEvent};
use super::{CommandStatDto, RecordInvocationRequest};

/// POST /bots/{id}/analytics
///
/// Integration point for the bot runtime: reports one command firing with
/// its measured response time. The store performs the atomic upsert and
/// rejects unknown bots without writing anything.
pub async fn record_invocation(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(bot_id): Path<i32>,
    Json(payload): Json<RecordInvocationRequest>,
) -> Result<Json<ApiResponse<CommandStatDto>>, ApiError> {
    let bot = find_owned_bot(&state, bot_id, &user).await?;
    let command_name = validate_command_name(&payload.command_name)?;
    let response_time_ms = validate_response_time(payload.response_time_ms)?;

    let stat = state
        .store()
        .record_invocation(bot.id, command_name, response_time_ms)
        .await?;

    let _ = state
        .event_bus()
        .send(NotificationEvent::InvocationRecorded {
            bot_id: stat.bot_id,
            command_name: stat.command_name.clone(),
            usage_count: stat.usage_count,
        });

    Ok(Json(ApiResponse::success(CommandStatDto::from(stat))))
}

/// GET /bots/{id}/analytics
pub async fn list_stats(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(bot_id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<CommandStatDto>>>, ApiError> {
    let bot = find_owned_bot(&state, bot_id, &user).await?;

    let stats = state.store().list_command_stats(bot.id).await?;

    Ok(Json(ApiResponse::success(
        stats.into_iter().map(CommandStatDto::from).collect(),
    )))
}
