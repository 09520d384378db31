//! Prefixed chat commands (`!pnl BONK`, `!help`, ...).

use crate::chat::{ChatMessage, ChatTransport};
use crate::classifier::Classifier;
use crate::error::Result;
use crate::ledger::CallLedger;
use crate::resolver::ChainResolver;
use async_trait::async_trait;
use log::{debug, error, info};
use std::collections::HashMap;
use std::sync::Arc;

pub mod calls;
pub mod general;
pub mod token;

pub use calls::{CallsCommand, MyCallsCommand, PnlCommand};
pub use general::{HelloCommand, HelpCommand, PingCommand};
pub use token::{DexBoostsCommand, DexPaidCommand, InfoCommand, SearchCommand};

/// Collaborators a command may use. Built once and shared by every
/// invocation.
pub struct CommandContext {
    pub transport: Arc<dyn ChatTransport>,
    pub ledger: CallLedger,
    pub resolver: ChainResolver,
    pub classifier: Arc<Classifier>,
    pub prefix: char,
}

impl CommandContext {
    pub async fn reply(&self, message: &ChatMessage, text: &str) -> Result<()> {
        self.transport.send(&message.channel, text).await
    }
}

#[async_trait]
pub trait Command: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Argument synopsis shown after the command name, e.g. `<token>`.
    fn usage(&self) -> &'static str {
        ""
    }

    async fn execute(&self, ctx: &CommandContext, message: &ChatMessage, args: &[&str]) -> Result<()>;
}

/// Reply with the usage line of `command`.
pub async fn reply_usage(ctx: &CommandContext, message: &ChatMessage, command: &dyn Command) -> Result<()> {
    let text = format!(
        "Usage: {}{} {} - {}",
        ctx.prefix,
        command.name(),
        command.usage(),
        command.description()
    );
    ctx.reply(message, &text).await
}

pub struct CommandRegistry {
    commands: HashMap<String, Arc<dyn Command>>,
    order: Vec<String>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self { commands: HashMap::new(), order: Vec::new() }
    }

    /// Every built-in command, with `help` listing all of them.
    pub fn with_default_commands() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(PingCommand));
        registry.register(Arc::new(HelloCommand));
        registry.register(Arc::new(PnlCommand));
        registry.register(Arc::new(CallsCommand));
        registry.register(Arc::new(MyCallsCommand));
        registry.register(Arc::new(InfoCommand));
        registry.register(Arc::new(SearchCommand));
        registry.register(Arc::new(DexPaidCommand));
        registry.register(Arc::new(DexBoostsCommand));

        let help = HelpCommand::new(registry.catalog());
        registry.register(Arc::new(help));
        info!("Loaded {} commands", registry.order.len());
        registry
    }

    pub fn register(&mut self, command: Arc<dyn Command>) {
        let name = command.name().to_lowercase();
        if self.commands.insert(name.clone(), command).is_none() {
            self.order.push(name);
        }
    }

    pub fn names(&self) -> Vec<String> {
        self.order.clone()
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Command>> {
        self.commands.get(&name.to_lowercase()).cloned()
    }

    fn catalog(&self) -> Vec<general::CommandInfo> {
        self.order
            .iter()
            .filter_map(|name| self.commands.get(name))
            .map(|c| general::CommandInfo {
                name: c.name(),
                usage: c.usage(),
                description: c.description(),
            })
            .collect()
    }

    /// Runs the command named by a prefixed message. Returns whether a
    /// handler ran. Handler failures are logged here and go no further.
    pub async fn dispatch(&self, ctx: &CommandContext, message: &ChatMessage) -> bool {
        let rest = match message.text.strip_prefix(ctx.prefix) {
            Some(rest) => rest,
            None => return false,
        };

        let mut parts = rest.split_whitespace();
        let name = match parts.next() {
            Some(name) => name.to_lowercase(),
            None => {
                debug!("Empty command from {}", message.username);
                return false;
            }
        };
        let args: Vec<&str> = parts.collect();

        let command = match self.commands.get(&name) {
            Some(command) => command,
            None => {
                debug!("Ignoring unknown command '{}' from {}", name, message.username);
                return false;
            }
        };

        match command.execute(ctx, message, &args).await {
            Ok(()) => info!("Executed command '{}' for user '{}'", name, message.username),
            Err(e) => error!("Error executing command '{}' for user '{}': {}", name, message.username, e),
        }
        true
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
