use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// A chat that prompts and replies are addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub i64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Plain,
    Markdown,
}

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Telegram request failed: {0}")]
    Telegram(#[from] teloxide::RequestError),
}

/// Outbound side of the messaging platform.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send_message(
        &self,
        session: SessionId,
        text: &str,
        mode: RenderMode,
    ) -> Result<(), TransportError>;

    /// Send `text` as a reply to an earlier message in the same chat.
    async fn reply_to(
        &self,
        session: SessionId,
        message_id: i32,
        text: &str,
    ) -> Result<(), TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_id_displays_as_chat_id() {
        assert_eq!(SessionId(-100_123).to_string(), "-100123");
        assert_eq!(format!("{}", SessionId(42)), "42");
    }
}
