use thiserror::Error;

use crate::messages::{Locale, Message};

/// Client-side upload check failure. Blocks the request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("file is {size} bytes, the limit is 10 MB")]
    TooLarge { size: u64 },
    #[error("unsupported file type '{mime}'")]
    UnsupportedType { mime: String },
}

impl ValidationError {
    pub fn message(&self) -> Message {
        match self {
            Self::TooLarge { .. } => Message::FileTooLarge,
            Self::UnsupportedType { .. } => Message::UnsupportedType,
        }
    }
}

/// Failure of a round trip to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("HTTP {status}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Status { status: u16, message: Option<String> },
    /// The request never completed.
    #[error("transport error: {0}")]
    Transport(String),
    /// The server answered with success but the body was not understood.
    #[error("unreadable response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Pick the user-facing text: the server's own message for a rejected
    /// request when it sent one, otherwise the localized fallback.
    pub fn user_message(
        &self,
        rejected: Message,
        unreachable: Message,
        prefer_server_message: bool,
        locale: Locale,
    ) -> String {
        match self {
            Self::Status { message: Some(m), .. } if prefer_server_message && !m.is_empty() => {
                m.clone()
            }
            Self::Status { .. } | Self::Decode(_) => rejected.text(locale).to_string(),
            Self::Transport(_) => unreachable.text(locale).to_string(),
        }
    }
}

/// Why a dashboard operation did not complete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("an upload is already in progress")]
    UploadInProgress,
    #[error("cancelled")]
    Cancelled,
}
