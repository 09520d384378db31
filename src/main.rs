use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::sync::Arc;

use callbot::api::DexScreenerClient;
use callbot::bot::CallBot;
use callbot::cli::Cli;
use callbot::config::Config;
use callbot::ledger::{CallStore, MemoryCallStore, PgCallStore};
use callbot::logging;
use callbot::telegram::TelegramTransport;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // Load configuration
    let config_path = cli.config.unwrap_or_else(|| "config/config.toml".into());
    let mut config = Config::load(&config_path)
        .with_context(|| format!("Failed to load configuration from {:?}", config_path))?;
    config.apply_env_overrides();
    config.validate(cli.in_memory)?;

    logging::init(cli.debug, config.log_file.as_deref())?;
    info!("Starting call bot...");

    let lookup = Arc::new(DexScreenerClient::new(&config.dexscreener.base_url)?);
    info!("DexScreener client initialized for {}", lookup.base_url());

    let store: Arc<dyn CallStore> = if cli.in_memory {
        info!("Using in-memory call store; calls are lost on exit.");
        Arc::new(MemoryCallStore::new())
    } else {
        Arc::new(PgCallStore::connect(&config.database.url, config.database.max_connections).await?)
    };

    let transport = Arc::new(TelegramTransport::new(
        config.chat.bot_token.clone(),
        config.chat.messages_per_window,
        config.chat.window(),
    ));

    let bot = Arc::new(CallBot::new(
        transport.clone(),
        lookup,
        store,
        config.chat.prefix_char(),
    ));
    info!("Call bot initialized with prefix '{}'.", config.chat.prefix_char());

    transport.run(bot).await?;
    Ok(())
}
