pub mod api;
pub mod bot;
pub mod chat;
pub mod classifier;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod models;
pub mod pnl;
pub mod resolver;
pub mod telegram;
pub mod utils;

pub use error::{Error, Result};

// Declare tests module only when testing
#[cfg(test)]
pub mod tests;
