use serde::{Deserialize, Serialize};

use crate::db::{Bot, Command, CommandStat};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BotDto {
    pub id: i32,
    pub token: String,
    pub prefix: String,
    pub name: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Bot> for BotDto {
    fn from(bot: Bot) -> Self {
        Self {
            id: bot.id,
            token: bot.token,
            prefix: bot.prefix,
            name: bot.name,
            status: bot.status,
            created_at: bot.created_at,
            updated_at: bot.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CommandDto {
    pub id: i32,
    pub bot_id: i32,
    pub name: String,
    pub description: String,
    pub enabled: bool,
    pub response: String,
}

impl From<Command> for CommandDto {
    fn from(command: Command) -> Self {
        Self {
            id: command.id,
            bot_id: command.bot_id,
            name: command.name,
            description: command.description,
            enabled: command.enabled,
            response: command.response,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CommandStatDto {
    pub id: i32,
    pub bot_id: i32,
    pub command_name: String,
    pub usage_count: i32,
    pub avg_response_time: i32,
}

impl From<CommandStat> for CommandStatDto {
    fn from(stat: CommandStat) -> Self {
        Self {
            id: stat.id,
            bot_id: stat.bot_id,
            command_name: stat.command_name,
            usage_count: stat.usage_count,
            avg_response_time: stat.avg_response_time,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateBotRequest {
    pub token: String,
    pub prefix: String,
    pub name: String,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    "offline".to_string()
}

#[derive(Debug, Deserialize)]
pub struct UpdateBotRequest {
    pub token: Option<String>,
    pub prefix: Option<String>,
    pub name: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCommandRequest {
    pub name: String,
    pub description: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub response: String,
}

const fn default_enabled() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct UpdateCommandRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub enabled: Option<bool>,
    pub response: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecordInvocationRequest {
    pub command_name: String,
    pub response_time_ms: i32,
}

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub version: String,
    pub uptime: u64,
    pub bots: u64,
    pub commands: u64,
    pub tracked_commands: u64,
}
