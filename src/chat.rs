use crate::error::Result;
use async_trait::async_trait;

/// One inbound chat line as seen by the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub username: String,
    pub user_id: String,
    pub channel: String,
    pub text: String,
}

impl ChatMessage {
    pub fn new(username: &str, user_id: &str, channel: &str, text: &str) -> Self {
        Self {
            username: username.to_string(),
            user_id: user_id.to_string(),
            channel: channel.to_string(),
            text: text.to_string(),
        }
    }
}

/// Outbound side of the chat platform. Implementations may delay sends to
/// respect platform rate limits.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, channel: &str, text: &str) -> Result<()>;
}
