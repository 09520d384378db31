use crate::api::PairLookup;
use crate::chat::{ChatMessage, ChatTransport};
use crate::classifier::Classifier;
use crate::commands::{CommandContext, CommandRegistry};
use crate::ledger::{CallLedger, CallStore};
use crate::resolver::{ChainResolver, Resolution};
use crate::utils::format::pair_summary;
use chrono::Utc;
use log::{debug, error, info, warn};
use std::sync::Arc;

/// Routes every inbound message: prefixed commands go to the registry,
/// anything else is scanned for a token call.
pub struct CallBot {
    registry: CommandRegistry,
    ctx: CommandContext,
}

impl CallBot {
    pub fn new(
        transport: Arc<dyn ChatTransport>,
        lookup: Arc<dyn PairLookup>,
        store: Arc<dyn CallStore>,
        prefix: char,
    ) -> Self {
        let registry = CommandRegistry::with_default_commands();
        let classifier = Arc::new(Classifier::new(registry.names()));
        let ctx = CommandContext {
            transport,
            ledger: CallLedger::new(store),
            resolver: ChainResolver::new(lookup),
            classifier,
            prefix,
        };

        Self { registry, ctx }
    }

    pub fn ledger(&self) -> &CallLedger {
        &self.ctx.ledger
    }

    /// Never fails: every problem is logged and stays with this message.
    pub async fn handle_message(&self, message: ChatMessage) {
        debug!("Message from {} in {}: {}", message.username, message.channel, message.text);

        if self.registry.dispatch(&self.ctx, &message).await {
            return;
        }

        let identifier = match self.ctx.classifier.classify(&message.text) {
            Some(identifier) => identifier,
            None => return,
        };

        let pair = match self.ctx.resolver.resolve(&identifier).await {
            Resolution::Found(pair) => pair,
            Resolution::NotFound(reason) => {
                warn!(
                    "No market cap data found for token {} called by {} ({:?})",
                    identifier.raw, message.username, reason
                );
                return;
            }
        };

        let token = identifier.raw.to_uppercase();
        match self
            .ctx
            .ledger
            .record(&message.user_id, &message.username, &token, pair.market_cap)
            .await
        {
            Ok(call) => info!(
                "Token call detected: {} called {} at {}",
                message.username, call.token, call.market_cap_at_call
            ),
            Err(e) => error!("Failed to record call on {} by {}: {}", token, message.username, e),
        }

        let summary = pair_summary(&pair, &identifier.raw, Utc::now());
        if let Err(e) = self.ctx.reply(&message, &summary).await {
            error!("Failed to post summary for {} to {}: {}", token, message.channel, e);
        }
    }
}
