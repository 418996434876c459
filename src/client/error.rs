use crate::core::EntityId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(String),

    /// The API answered with a non-success status.
    #[error("{message} (HTTP {status}, {code})")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("no {0} session is open")]
    NoSession(&'static str),

    #[error("{kind} '{id}' is not in the loaded list")]
    NotLoaded { kind: &'static str, id: EntityId },
}

impl ClientError {
    /// Machine-readable code of an API error, if this is one.
    pub fn api_code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => Some(code),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
