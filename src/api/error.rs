use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ApiResponse;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    DatabaseError(String),

    ExternalApiError { service: String, message: String },

    ValidationError(String),

    InternalError(String),

    Unauthorized(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            ApiError::ExternalApiError { service, message } => {
                write!(f, "{} error: {}", service, message)
            }
            ApiError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            ApiError::ExternalApiError { service, message } => {
                tracing::warn!("{} API error: {}", service, message);
                (
                    StatusCode::BAD_GATEWAY,
                    format!("{} service is unavailable", service),
                )
            }
            ApiError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
        };

        let body = ApiResponse::<()>::error(error_message);
        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

impl From<crate::db::AnalyticsError> for ApiError {
    fn from(err: crate::db::AnalyticsError) -> Self {
        use crate::db::AnalyticsError;

        match err {
            AnalyticsError::BotNotFound(id) => Self::bot_not_found(id),
            AnalyticsError::Invalid(msg) => ApiError::ValidationError(msg),
            AnalyticsError::Database(e) => ApiError::DatabaseError(e.to_string()),
        }
    }
}

impl From<crate::services::AssistantError> for ApiError {
    fn from(err: crate::services::AssistantError) -> Self {
        use crate::services::AssistantError;

        match err {
            AssistantError::Disabled | AssistantError::MissingApiKey => {
                ApiError::ValidationError(err.to_string())
            }
            AssistantError::Validation(msg) => ApiError::ValidationError(msg),
            AssistantError::Provider(msg) => ApiError::openai_error(msg),
        }
    }
}

impl ApiError {
    pub fn bot_not_found(id: i32) -> Self {
        ApiError::NotFound(format!("Bot {} not found", id))
    }

    pub fn command_not_found(id: i32) -> Self {
        ApiError::NotFound(format!("Command {} not found", id))
    }

    pub fn openai_error(msg: impl Into<String>) -> Self {
        ApiError::ExternalApiError {
            service: "OpenAI".to_string(),
            message: msg.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::ValidationError(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        ApiError::InternalError(msg.into())
    }
}
