use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,

    /// Keep calls in memory instead of Postgres
    #[arg(long)]
    pub in_memory: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from(["callbot", "--config", "custom.toml", "-d", "--in-memory"]);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert!(cli.debug);
        assert!(cli.in_memory);
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["callbot"]);
        assert!(cli.config.is_none());
        assert!(!cli.debug);
        assert!(!cli.in_memory);
    }
}
