use crate::chat::ChatMessage;
use crate::classifier::{ChainHint, IdentifierKind};
use crate::commands::{reply_usage, Command, CommandContext};
use crate::error::{Error, Result};
use crate::models::market::is_paid;
use crate::models::ChainId;
use crate::resolver::Resolution;
use crate::utils::format::{chain_icon, pair_summary};
use async_trait::async_trait;
use chrono::Utc;
use log::info;

const BOOSTS_SHOWN: usize = 10;

async fn reply_resolution(
    ctx: &CommandContext,
    message: &ChatMessage,
    label: &str,
    resolution: Resolution,
) -> Result<()> {
    match resolution {
        Resolution::Found(pair) => ctx.reply(message, &pair_summary(&pair, label, Utc::now())).await,
        Resolution::NotFound(reason) => {
            info!("No pair for {} ({:?})", label, reason);
            ctx.reply(message, &format!("No trading pair found for {}", label)).await
        }
    }
}

/// Looks a token up without recording a call.
pub struct InfoCommand;

#[async_trait]
impl Command for InfoCommand {
    fn name(&self) -> &'static str {
        "info"
    }

    fn description(&self) -> &'static str {
        "Shows pair info for a token without recording a call"
    }

    fn usage(&self) -> &'static str {
        "<token>"
    }

    async fn execute(&self, ctx: &CommandContext, message: &ChatMessage, args: &[&str]) -> Result<()> {
        let arg = match args.first() {
            Some(arg) => *arg,
            None => return reply_usage(ctx, message, self).await,
        };

        let identifier = match ctx.classifier.classify_argument(arg) {
            Some(identifier) => identifier,
            None => {
                return ctx
                    .reply(message, &format!("Could not recognize a token in {}", arg))
                    .await
            }
        };

        let resolution = ctx.resolver.resolve(&identifier).await;
        reply_resolution(ctx, message, &identifier.raw, resolution).await
    }
}

pub struct SearchCommand;

#[async_trait]
impl Command for SearchCommand {
    fn name(&self) -> &'static str {
        "search"
    }

    fn description(&self) -> &'static str {
        "Searches DexScreener and shows the best matching pair"
    }

    fn usage(&self) -> &'static str {
        "<text>"
    }

    async fn execute(&self, ctx: &CommandContext, message: &ChatMessage, args: &[&str]) -> Result<()> {
        if args.is_empty() {
            return reply_usage(ctx, message, self).await;
        }

        let query = args.join(" ");
        let resolution = ctx.resolver.search(&query).await;
        reply_resolution(ctx, message, &query, resolution).await
    }
}

pub struct DexPaidCommand;

#[async_trait]
impl Command for DexPaidCommand {
    fn name(&self) -> &'static str {
        "dexpaid"
    }

    fn description(&self) -> &'static str {
        "Shows if dex was paid on a token"
    }

    fn usage(&self) -> &'static str {
        "<token_address>"
    }

    async fn execute(&self, ctx: &CommandContext, message: &ChatMessage, args: &[&str]) -> Result<()> {
        let arg = match args.first() {
            Some(arg) => *arg,
            None => return reply_usage(ctx, message, self).await,
        };

        let identifier = ctx.classifier.classify_argument(arg);
        let chain = match identifier.as_ref().map(|id| &id.kind) {
            Some(IdentifierKind::Address(ChainHint::Solana)) => ChainId::Solana,
            Some(IdentifierKind::Address(ChainHint::Evm)) => ChainId::Ethereum,
            _ => {
                return ctx
                    .reply(message, &format!("Unable to determine chain for {}. Use a token address.", arg))
                    .await
            }
        };
        let address = identifier.map(|id| id.raw).unwrap_or_default();

        info!("Checking payment status for {} on {}", address, chain);
        let orders = match ctx.resolver.lookup().orders(chain, &address).await {
            Ok(orders) => orders,
            Err(e) => {
                ctx.reply(message, "❌ Error checking payment status. Please try again.")
                    .await?;
                return Err(Error::CommandFailed(format!("order lookup for {} failed: {}", address, e)));
            }
        };

        let status = if is_paid(&orders) { "✅ PAID" } else { "❌ NOT PAID" };
        ctx.reply(
            message,
            &format!("🔍 DexScreener Payment Status for {}: {}", address, status),
        )
        .await
    }
}

pub struct DexBoostsCommand;

#[async_trait]
impl Command for DexBoostsCommand {
    fn name(&self) -> &'static str {
        "dexboosts"
    }

    fn description(&self) -> &'static str {
        "Shows recently boosted tokens from DexScreener"
    }

    async fn execute(&self, ctx: &CommandContext, message: &ChatMessage, _args: &[&str]) -> Result<()> {
        let boosts = match ctx.resolver.lookup().latest_boosts().await {
            Ok(boosts) => boosts,
            Err(e) => {
                ctx.reply(message, "❌ Error fetching boosted tokens. Please try again.")
                    .await?;
                return Err(Error::CommandFailed(format!("boost lookup failed: {}", e)));
            }
        };

        if boosts.is_empty() {
            return ctx.reply(message, "❌ No boosted tokens found at the moment.").await;
        }

        let mut text = format!("🚀 Top {} Recently Boosted Tokens:\n", BOOSTS_SHOWN);
        for (i, boost) in boosts.iter().take(BOOSTS_SHOWN).enumerate() {
            let marker = if i < 3 { "🥇" } else { "  " };
            text.push_str(&format!(
                "{} {} {} ({} boosts) | {}\n",
                marker,
                chain_icon(boost.chain_id),
                boost.display_name(),
                boost.total_amount,
                boost.chain_id.as_str().to_uppercase()
            ));
        }
        ctx.reply(message, text.trim_end()).await
    }
}
