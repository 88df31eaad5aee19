use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure tag carried alongside the free-text error in an extraction result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    FileRead,
    Timeout,
    Remote,
    Decode,
    Transport,
}

/// Everything that can go wrong during a single relay call.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// `file` is the basename; directories never reach the result.
    #[error("failed to read {file}: {source}")]
    FileRead {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("request timed out after {after:?}")]
    Timeout { after: std::time::Duration },

    #[error("API error: {status} - {body}")]
    Remote { status: u16, body: String },

    #[error("invalid JSON response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("request failed: {0}")]
    Transport(String),
}

impl ExtractError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::FileRead { .. } => ErrorKind::FileRead,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::Remote { .. } => ErrorKind::Remote,
            Self::Decode(_) => ErrorKind::Decode,
            Self::Transport(_) => ErrorKind::Transport,
        }
    }
}

/// Top-level error type for the plugin host surfaces.
#[derive(Debug, Error)]
pub enum SomarkError {
    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: String, message: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_mentions_status_and_body() {
        let err = ExtractError::Remote {
            status: 500,
            body: "internal error".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("internal error"));
        assert_eq!(err.kind(), ErrorKind::Remote);
    }

    #[test]
    fn decode_error_converts_from_serde() {
        let err: ExtractError = serde_json::from_str::<serde_json::Value>("not json")
            .unwrap_err()
            .into();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }
}
