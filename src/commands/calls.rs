use crate::chat::ChatMessage;
use crate::commands::{reply_usage, Command, CommandContext};
use crate::error::{Error, Result};
use crate::models::{normalize_token, Call};
use crate::utils::format::{money, percentage, signed_money};
use async_trait::async_trait;

const DEFAULT_CALLS_LIMIT: usize = 5;
const MAX_CALLS_LIMIT: usize = 20;

fn call_line(index: usize, call: &Call) -> String {
    format!(
        "{}. {} called {} at {} ({})",
        index + 1,
        call.username,
        call.token,
        money(call.market_cap_at_call),
        call.call_time.format("%m/%d %H:%M")
    )
}

pub struct PnlCommand;

#[async_trait]
impl Command for PnlCommand {
    fn name(&self) -> &'static str {
        "pnl"
    }

    fn description(&self) -> &'static str {
        "Shows PnL for your latest call of a token"
    }

    fn usage(&self) -> &'static str {
        "<token>"
    }

    async fn execute(&self, ctx: &CommandContext, message: &ChatMessage, args: &[&str]) -> Result<()> {
        let token = match args.first() {
            Some(token) => normalize_token(token.trim_start_matches(|c: char| c == '$' || c == '#')),
            None => return reply_usage(ctx, message, self).await,
        };

        let call = match ctx.ledger.latest_by_user_and_token(&message.user_id, &token).await {
            Ok(Some(call)) => call,
            Ok(None) => return ctx.reply(message, &format!("No call found for token {}", token)).await,
            Err(e) => {
                ctx.reply(message, &format!("Error retrieving PnL data for {}", token)).await?;
                return Err(e);
            }
        };

        let pnl = call.pnl();
        let text = format!(
            "{}'s {} call: Called at {} ({}) | Current: {} | PnL: {} ({})",
            message.username,
            token,
            money(call.market_cap_at_call),
            call.call_time.format("%m/%d %H:%M"),
            money(call.current_market_cap),
            signed_money(pnl.pnl),
            percentage(pnl.pnl_percentage)
        );
        ctx.reply(message, &text).await
    }
}

pub struct CallsCommand;

#[async_trait]
impl Command for CallsCommand {
    fn name(&self) -> &'static str {
        "calls"
    }

    fn description(&self) -> &'static str {
        "Shows the most recent calls in the chat"
    }

    fn usage(&self) -> &'static str {
        "[limit]"
    }

    async fn execute(&self, ctx: &CommandContext, message: &ChatMessage, args: &[&str]) -> Result<()> {
        let limit = match args.first() {
            Some(raw) => raw
                .parse::<usize>()
                .map_err(|_| Error::InvalidInput(format!("calls limit must be a number, got {}", raw)))?,
            None => DEFAULT_CALLS_LIMIT,
        }
        .clamp(1, MAX_CALLS_LIMIT);

        let calls = ctx.ledger.recent(limit).await?;
        if calls.is_empty() {
            return ctx.reply(message, "No calls recorded yet.").await;
        }

        let mut text = format!("📋 Last {} calls:\n", calls.len());
        for (i, call) in calls.iter().enumerate() {
            text.push_str(&call_line(i, call));
            text.push('\n');
        }
        ctx.reply(message, text.trim_end()).await
    }
}

pub struct MyCallsCommand;

#[async_trait]
impl Command for MyCallsCommand {
    fn name(&self) -> &'static str {
        "mycalls"
    }

    fn description(&self) -> &'static str {
        "Shows how many calls you made and your latest ones"
    }

    async fn execute(&self, ctx: &CommandContext, message: &ChatMessage, _args: &[&str]) -> Result<()> {
        let total = ctx.ledger.count_by_user(&message.user_id).await?;
        if total == 0 {
            return ctx
                .reply(message, &format!("{} has no calls yet.", message.username))
                .await;
        }

        let calls = ctx.ledger.by_user(&message.user_id).await?;
        let mut text = format!("{} has made {} calls. Latest:\n", message.username, total);
        for (i, call) in calls.iter().take(DEFAULT_CALLS_LIMIT).enumerate() {
            text.push_str(&call_line(i, call));
            text.push('\n');
        }
        ctx.reply(message, text.trim_end()).await
    }
}
