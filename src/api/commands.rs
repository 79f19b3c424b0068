use axum::{
    Extension, Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::auth::CurrentUser;
use super::bots::find_owned_bot;
use super::validation::validate_command_name;
use super::{ApiError, ApiResponse, AppState, NotificationEvent};
use super::{CommandDto, CreateCommandRequest, UpdateCommandRequest};
use crate::db::{Command, NewCommand, UpdateCommand};

/// Load a command and verify its bot belongs to the caller.
async fn find_owned_command(
    state: &AppState,
    id: i32,
    user: &CurrentUser,
) -> Result<Command, ApiError> {
    let command = state
        .store()
        .get_command(id)
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?
        .ok_or_else(|| ApiError::command_not_found(id))?;

    // Ownership goes through the bot; a command under someone else's bot is
    // reported as missing.
    find_owned_bot(state, command.bot_id, user)
        .await
        .map_err(|_| ApiError::command_not_found(id))?;

    Ok(command)
}

pub async fn list_commands(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(bot_id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<CommandDto>>>, ApiError> {
    let bot = find_owned_bot(&state, bot_id, &user).await?;

    let commands = state
        .store()
        .list_commands(bot.id)
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        commands.into_iter().map(CommandDto::from).collect(),
    )))
}

pub async fn create_command(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(bot_id): Path<i32>,
    Json(payload): Json<CreateCommandRequest>,
) -> Result<Json<ApiResponse<CommandDto>>, ApiError> {
    let bot = find_owned_bot(&state, bot_id, &user).await?;
    let name = validate_command_name(&payload.name)?.to_string();

    let command = state
        .store()
        .create_command(
            bot.id,
            NewCommand {
                name,
                description: payload.description,
                enabled: payload.enabled,
                response: payload.response,
            },
        )
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;

    let _ = state.event_bus().send(NotificationEvent::CommandCreated {
        bot_id: bot.id,
        name: command.name.clone(),
    });

    Ok(Json(ApiResponse::success(CommandDto::from(command))))
}

pub async fn update_command(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateCommandRequest>,
) -> Result<Json<ApiResponse<CommandDto>>, ApiError> {
    let command = find_owned_command(&state, id, &user).await?;

    let name = match payload.name {
        Some(name) => Some(validate_command_name(&name)?.to_string()),
        None => None,
    };

    let updated = state
        .store()
        .update_command(
            command,
            UpdateCommand {
                name,
                description: payload.description,
                enabled: payload.enabled,
                response: payload.response,
            },
        )
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;

    let _ = state.event_bus().send(NotificationEvent::CommandUpdated {
        command_id: updated.id,
    });

    Ok(Json(ApiResponse::success(CommandDto::from(updated))))
}

pub async fn delete_command(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let command = find_owned_command(&state, id, &user).await?;

    state
        .store()
        .remove_command(command.id)
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;

    let _ = state.event_bus().send(NotificationEvent::CommandDeleted {
        command_id: command.id,
    });

    Ok(Json(ApiResponse::success(())))
}
