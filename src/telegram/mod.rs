use crate::bot::CallBot;
use crate::chat::{ChatMessage, ChatTransport};
use crate::error::{Error, Result};
use crate::utils::RateLimiter;
use async_trait::async_trait;
use log::{debug, error, info};
use std::sync::Arc;
use std::time::Duration;
use teloxide::prelude::*;

/// Telegram sends share one budget across all chats.
const OUTBOUND_KEY: &str = "telegram";

/// Telegram side of the bot: turns updates into [`ChatMessage`]s and sends
/// replies through a shared rate limiter.
pub struct TelegramTransport {
    bot: Bot,
    limiter: RateLimiter,
}

impl TelegramTransport {
    pub fn new(bot_token: String, messages_per_window: u32, window: Duration) -> Self {
        Self {
            bot: Bot::new(bot_token),
            limiter: RateLimiter::new(messages_per_window, window),
        }
    }

    /// Runs until the process is stopped. Every message is handled on its own
    /// task so a slow lookup never holds up the next update.
    pub async fn run(self: Arc<Self>, router: Arc<CallBot>) -> Result<()> {
        info!("Starting Telegram bot...");
        let bot = self.bot.clone();

        teloxide::repl(bot, move |msg: Message| {
            let router = router.clone();
            async move {
                if let Some(message) = to_chat_message(&msg) {
                    tokio::spawn(async move {
                        router.handle_message(message).await;
                    });
                }
                respond(())
            }
        })
        .await;

        Ok(())
    }
}

fn to_chat_message(msg: &Message) -> Option<ChatMessage> {
    let text = msg.text()?;
    let user = msg.from()?;
    let username = user
        .username
        .clone()
        .unwrap_or_else(|| user.first_name.clone());

    Some(ChatMessage {
        username,
        user_id: user.id.0.to_string(),
        channel: msg.chat.id.0.to_string(),
        text: text.to_string(),
    })
}

#[async_trait]
impl ChatTransport for TelegramTransport {
    async fn send(&self, channel: &str, text: &str) -> Result<()> {
        let chat_id: i64 = channel
            .parse()
            .map_err(|_| Error::Chat(format!("invalid chat id: {}", channel)))?;

        self.limiter.acquire(OUTBOUND_KEY).await;

        if let Err(e) = self.bot.send_message(ChatId(chat_id), text).await {
            error!("Failed to send message to {}: {}", channel, e);
            return Err(e.into());
        }
        debug!("Sent message to {}", channel);
        Ok(())
    }
}
