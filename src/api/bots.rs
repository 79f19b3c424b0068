use axum::{
    Extension, Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::auth::CurrentUser;
use super::validation::validate_bot_id;
use super::{ApiError, ApiResponse, AppState, NotificationEvent};
use super::{BotDto, CreateBotRequest, UpdateBotRequest};
use crate::db::{Bot, NewBot, UpdateBot};

/// Load a bot scoped to the caller. Bots owned by other users come back as
/// 404, never 403, so ids cannot be probed across accounts.
pub async fn find_owned_bot(
    state: &AppState,
    id: i32,
    user: &CurrentUser,
) -> Result<Bot, ApiError> {
    validate_bot_id(id)?;

    state
        .store()
        .get_bot_owned(id, user.id)
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?
        .ok_or_else(|| ApiError::bot_not_found(id))
}

pub async fn list_bots(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<ApiResponse<Vec<BotDto>>>, ApiError> {
    let bots = state
        .store()
        .list_bots_for_user(user.id)
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        bots.into_iter().map(BotDto::from).collect(),
    )))
}

pub async fn create_bot(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateBotRequest>,
) -> Result<Json<ApiResponse<BotDto>>, ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::validation("Bot name cannot be empty"));
    }
    if payload.prefix.is_empty() {
        return Err(ApiError::validation("Command prefix cannot be empty"));
    }

    let bot = state
        .store()
        .create_bot(
            user.id,
            NewBot {
                token: payload.token,
                prefix: payload.prefix,
                name: payload.name.trim().to_string(),
                status: payload.status,
            },
        )
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;

    let _ = state.event_bus().send(NotificationEvent::BotCreated {
        bot_id: bot.id,
        name: bot.name.clone(),
    });

    Ok(Json(ApiResponse::success(BotDto::from(bot))))
}

pub async fn get_bot(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<BotDto>>, ApiError> {
    let bot = find_owned_bot(&state, id, &user).await?;
    Ok(Json(ApiResponse::success(BotDto::from(bot))))
}

pub async fn update_bot(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateBotRequest>,
) -> Result<Json<ApiResponse<BotDto>>, ApiError> {
    let bot = find_owned_bot(&state, id, &user).await?;

    if let Some(name) = &payload.name
        && name.trim().is_empty()
    {
        return Err(ApiError::validation("Bot name cannot be empty"));
    }

    let updated = state
        .store()
        .update_bot(
            bot,
            UpdateBot {
                token: payload.token,
                prefix: payload.prefix,
                name: payload.name.map(|n| n.trim().to_string()),
                status: payload.status,
            },
        )
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;

    let _ = state
        .event_bus()
        .send(NotificationEvent::BotUpdated { bot_id: updated.id });

    Ok(Json(ApiResponse::success(BotDto::from(updated))))
}

pub async fn delete_bot(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let bot = find_owned_bot(&state, id, &user).await?;

    state
        .store()
        .remove_bot(bot.id)
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;

    let _ = state
        .event_bus()
        .send(NotificationEvent::BotDeleted { bot_id: bot.id });

    Ok(Json(ApiResponse::success(())))
}
