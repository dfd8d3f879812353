use shared::error::{ApiError, ErrorCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to {route} failed: {source}")]
    Transport {
        route: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{route} responded with status {status}")]
    Status { route: &'static str, status: u16 },
    #[error("failed to decode {route} response: {source}")]
    Decode {
        route: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid backend url: {0}")]
    Url(#[from] url::ParseError),
    #[error("malformed {field}: {value:?}")]
    Malformed { field: &'static str, value: String },
}

impl ClientError {
    pub fn to_api_error(&self) -> ApiError {
        let code = match self {
            ClientError::Transport { .. } => ErrorCode::Transport,
            ClientError::Status { .. } => ErrorCode::Status,
            ClientError::Decode { .. } | ClientError::Malformed { .. } => ErrorCode::Decode,
            ClientError::Url(_) => ErrorCode::Internal,
        };
        ApiError::new(code, self.to_string())
    }
}
