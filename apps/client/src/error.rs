use thiserror::Error;

use crate::domain::selection::SelectionError;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Not connected")]
    NotConnected,
    #[error("Channel closed")]
    ChannelClosed,
    #[error("Connect error: {detail}")]
    Connect { detail: String },
    #[error("Malformed envelope: {detail}")]
    MalformedEnvelope { detail: String },
    #[error("Protocol error: {detail}")]
    Protocol { detail: String },
    #[error("Selection error: {0}")]
    Selection(#[from] SelectionError),
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Stable code for diagnostics and structured logs
    pub fn code(&self) -> &'static str {
        match self {
            ClientError::NotConnected => "NOT_CONNECTED",
            ClientError::ChannelClosed => "CHANNEL_CLOSED",
            ClientError::Connect { .. } => "CONNECT_ERROR",
            ClientError::MalformedEnvelope { .. } => "MALFORMED_ENVELOPE",
            ClientError::Protocol { .. } => "PROTOCOL_ERROR",
            ClientError::Selection(_) => "SELECTION_ERROR",
            ClientError::Config { .. } => "CONFIG_ERROR",
            ClientError::Io(_) => "IO_ERROR",
        }
    }

    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedEnvelope {
            detail: detail.into(),
        }
    }

    pub fn protocol(detail: impl Into<String>) -> Self {
        Self::Protocol {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn connect(detail: impl Into<String>) -> Self {
        Self::Connect {
            detail: detail.into(),
        }
    }

    /// Errors that end the current channel rather than a single message.
    pub fn is_fatal_to_channel(&self) -> bool {
        matches!(
            self,
            ClientError::ChannelClosed | ClientError::Connect { .. } | ClientError::Io(_)
        )
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::malformed(format!("json error: {e}"))
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for ClientError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        use tokio_tungstenite::tungstenite::Error as WsError;
        match e {
            WsError::ConnectionClosed | WsError::AlreadyClosed => ClientError::ChannelClosed,
            other => ClientError::connect(format!("websocket error: {other}")),
        }
    }
}
