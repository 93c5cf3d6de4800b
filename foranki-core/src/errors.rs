use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("server error {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Server { status: u16, message: Option<String> },
    #[error("invalid response: {0}")]
    Decode(String),
    #[error("invalid input: {0}")]
    Invalid(&'static str),
    #[error("not found: {0}")]
    NotFound(&'static str),
    #[error("unknown error")]
    Unknown,
}

impl CoreError {
    /// Message the server attached to a failed request, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            CoreError::Server { message, .. } => message.as_deref().filter(|m| !m.is_empty()),
            _ => None,
        }
    }

    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }
}
