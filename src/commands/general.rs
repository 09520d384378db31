use crate::chat::ChatMessage;
use crate::commands::{Command, CommandContext};
use crate::error::Result;
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct CommandInfo {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
}

pub struct HelpCommand {
    catalog: Vec<CommandInfo>,
}

impl HelpCommand {
    pub fn new(catalog: Vec<CommandInfo>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl Command for HelpCommand {
    fn name(&self) -> &'static str {
        "help"
    }

    fn description(&self) -> &'static str {
        "Shows a list of commands and their descriptions"
    }

    async fn execute(&self, ctx: &CommandContext, message: &ChatMessage, _args: &[&str]) -> Result<()> {
        let mut text = String::from("Available commands:\n");
        for info in &self.catalog {
            let synopsis = if info.usage.is_empty() {
                format!("{}{}", ctx.prefix, info.name)
            } else {
                format!("{}{} {}", ctx.prefix, info.name, info.usage)
            };
            text.push_str(&format!("{} - {}\n", synopsis, info.description));
        }
        text.push_str(&format!("{}help - {}\n", ctx.prefix, self.description()));
        text.push_str("$<token> - Post a token to record your call");

        ctx.reply(message, &text).await
    }
}

pub struct PingCommand;

#[async_trait]
impl Command for PingCommand {
    fn name(&self) -> &'static str {
        "ping"
    }

    fn description(&self) -> &'static str {
        "Replies with Pong!"
    }

    async fn execute(&self, ctx: &CommandContext, message: &ChatMessage, _args: &[&str]) -> Result<()> {
        ctx.reply(message, "Pong!").await
    }
}

pub struct HelloCommand;

#[async_trait]
impl Command for HelloCommand {
    fn name(&self) -> &'static str {
        "hello"
    }

    fn description(&self) -> &'static str {
        "Says hello to the user"
    }

    async fn execute(&self, ctx: &CommandContext, message: &ChatMessage, _args: &[&str]) -> Result<()> {
        ctx.reply(message, &format!("Hello {}! Welcome to the chat!", message.username))
            .await
    }
}
