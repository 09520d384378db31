use std::result::Result as StdResult;
use thiserror::Error;
use teloxide::RequestError;
use std::io;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Lookup failed: {0}")]
    Lookup(String),
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("Configuration missing: {0}")]
    ConfigurationMissing(String),
    #[error("Command failed: {0}")]
    CommandFailed(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Chat transport error: {0}")]
    Chat(String),
    #[error("Internal error: {0}")]
    Internal(String),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// True for failures of a single external probe, which callers absorb
    /// rather than surface.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::Lookup(_) | Error::Http(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Lookup(format!("unparsable response: {}", err))
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        Error::Persistence(err.to_string())
    }
}

impl From<RequestError> for Error {
    fn from(err: RequestError) -> Self {
        Error::Chat(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::ConfigurationMissing(format!("invalid config file: {}", err))
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Internal(err.to_string())
    }
}

pub type Result<T> = StdResult<T, Error>;
