use crate::api::dexscreener::DEFAULT_BASE_URL;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const BOT_TOKEN_ENV: &str = "CALLBOT_BOT_TOKEN";
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Log to this file instead of stderr.
    #[serde(default)]
    pub log_file: Option<String>,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub dexscreener: DexScreenerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ChatConfig {
    pub bot_token: String,
    pub command_prefix: String,
    pub messages_per_window: u32,
    pub window_secs: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            command_prefix: "!".to_string(),
            messages_per_window: 750,
            window_secs: 30,
        }
    }
}

impl ChatConfig {
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }

    /// The prefix as a single character. Only meaningful after `validate`.
    pub fn prefix_char(&self) -> char {
        self.command_prefix.chars().next().unwrap_or('!')
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DexScreenerConfig {
    pub base_url: String,
}

impl Default for DexScreenerConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_string() }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { url: String::new(), max_connections: 5 }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path).map_err(|e| {
            Error::ConfigurationMissing(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let config_str = toml::to_string_pretty(self)
            .map_err(|e| Error::Internal(format!("failed to serialize config: {}", e)))?;
        fs::write(path, config_str)?;
        Ok(())
    }

    /// Environment values win over the file. Empty variables are ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Some(token) = non_empty_env(BOT_TOKEN_ENV) {
            self.chat.bot_token = token;
        }
        if let Some(url) = non_empty_env(DATABASE_URL_ENV) {
            self.database.url = url;
        }
    }

    pub fn validate(&self, in_memory: bool) -> Result<()> {
        if self.chat.bot_token.trim().is_empty() {
            return Err(Error::ConfigurationMissing(format!(
                "chat.bot_token is empty (set it in the config file or {})",
                BOT_TOKEN_ENV
            )));
        }

        if !in_memory && self.database.url.trim().is_empty() {
            return Err(Error::ConfigurationMissing(format!(
                "database.url is empty (set it in the config file or {}, or run with --in-memory)",
                DATABASE_URL_ENV
            )));
        }

        if self.chat.command_prefix.chars().count() != 1 {
            return Err(Error::ConfigurationMissing(format!(
                "chat.command_prefix must be exactly one character, got {:?}",
                self.chat.command_prefix
            )));
        }

        if self.chat.messages_per_window == 0 || self.chat.window_secs == 0 {
            return Err(Error::ConfigurationMissing(
                "chat.messages_per_window and chat.window_secs must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
