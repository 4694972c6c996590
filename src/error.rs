use thiserror::Error;

use crate::models::{RegistrationId, RegistrationStatus};

/// Текст по умолчанию, когда сервер не прислал своего сообщения.
pub const GENERIC_UPDATE_FAILURE: &str = "Failed to update registration status";

/// Ошибки обращения к REST API платформы.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server responded with {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Server {
        status: u16,
        message: Option<String>,
    },

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid API base URL '{0}'")]
    InvalidBaseUrl(String),
}

impl ApiError {
    /// Сообщение сервера, если он его прислал.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Server { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// Ошибки смены статуса регистрации. Кеш при любой из них не меняется.
#[derive(Error, Debug)]
pub enum TransitionError {
    #[error("registration {0} is not in the guest list")]
    UnknownRegistration(RegistrationId),

    #[error("transition {from} -> {to} is not offered")]
    NotAllowed {
        from: RegistrationStatus,
        to: RegistrationStatus,
    },

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl TransitionError {
    /// Текст для алерта/тоста организатору.
    pub fn user_message(&self) -> String {
        match self {
            TransitionError::Api(e) => e
                .server_message()
                .map(str::to_string)
                .unwrap_or_else(|| GENERIC_UPDATE_FAILURE.to_string()),
            other => other.to_string(),
        }
    }
}
