//! Recognizes token identifiers embedded in chat text.
//!
//! Three formats overlap, so they are tried in a fixed order and the first
//! match anywhere in the text wins:
//!
//! 1. `$` + 32..=44 base58 characters (a Solana mint address)
//! 2. `$0x` + 40 hex characters (an EVM contract address)
//! 3. `$` or `#` + 2..=10 alphanumerics (a ticker symbol)

use regex::Regex;
use std::collections::HashSet;

/// Where an address most likely lives, judged by its shape alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainHint {
    Solana,
    Evm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifierKind {
    Address(ChainHint),
    Symbol,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenIdentifier {
    pub raw: String,
    pub kind: IdentifierKind,
}

#[cfg(test)]
impl TokenIdentifier {
    pub fn is_symbol(&self) -> bool {
        self.kind == IdentifierKind::Symbol
    }
}

pub struct Classifier {
    solana_address: Regex,
    evm_address: Regex,
    symbol: Regex,
    command_names: HashSet<String>,
}

impl Classifier {
    /// `command_names` are the registered command names; a symbol equal to
    /// one of them is a command invocation, not a token mention.
    pub fn new<I, S>(command_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            solana_address: Regex::new(r"\$([1-9A-HJ-NP-Za-km-z]{32,44})\b").expect("valid regex"),
            evm_address: Regex::new(r"\$(0x[0-9a-fA-F]{40})\b").expect("valid regex"),
            symbol: Regex::new(r"[$#]([A-Za-z0-9]{2,10})\b").expect("valid regex"),
            command_names: command_names
                .into_iter()
                .map(|name| name.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Returns at most one identifier. Never fails and performs no I/O.
    pub fn classify(&self, text: &str) -> Option<TokenIdentifier> {
        if let Some(raw) = first_capture(&self.solana_address, text) {
            return Some(TokenIdentifier { raw, kind: IdentifierKind::Address(ChainHint::Solana) });
        }

        if let Some(raw) = first_capture(&self.evm_address, text) {
            return Some(TokenIdentifier { raw, kind: IdentifierKind::Address(ChainHint::Evm) });
        }

        let raw = first_capture(&self.symbol, text)?;
        if self.command_names.contains(&raw.to_lowercase()) {
            return None;
        }
        Some(TokenIdentifier { raw, kind: IdentifierKind::Symbol })
    }

    /// Classifies a bare command argument, e.g. the `<token>` of `info <token>`.
    pub fn classify_argument(&self, arg: &str) -> Option<TokenIdentifier> {
        let arg = arg.trim();
        if arg.starts_with('$') || arg.starts_with('#') {
            self.classify(arg)
        } else {
            self.classify(&format!("${}", arg))
        }
    }
}

fn first_capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOL_MINT: &str = "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263";
    const EVM_ADDR: &str = "0x6982508145454Ce325dDbE47a25d4ec3d2311933";

    fn classifier() -> Classifier {
        Classifier::new(["pnl", "help", "dexpaid"])
    }

    #[test]
    fn test_solana_address() {
        let id = classifier().classify(&format!("aping ${} now", SOL_MINT)).unwrap();
        assert_eq!(id.raw, SOL_MINT);
        assert_eq!(id.kind, IdentifierKind::Address(ChainHint::Solana));
    }

    #[test]
    fn test_36_char_base58_is_address_not_symbol() {
        let addr = "7GCihgDB8fe6KNjn2MYtkzZcRjQy3t9GHdC8";
        assert_eq!(addr.len(), 36);
        let id = classifier().classify(&format!("${}", addr)).unwrap();
        assert_eq!(id.kind, IdentifierKind::Address(ChainHint::Solana));
        assert_eq!(id.raw, addr);
    }

    #[test]
    fn test_evm_address() {
        let id = classifier().classify(&format!("check ${}", EVM_ADDR)).unwrap();
        assert_eq!(id.raw, EVM_ADDR);
        assert_eq!(id.kind, IdentifierKind::Address(ChainHint::Evm));
    }

    #[test]
    fn test_address_beats_earlier_symbol() {
        let text = format!("$BONK is nothing next to ${}", SOL_MINT);
        let id = classifier().classify(&text).unwrap();
        assert_eq!(id.raw, SOL_MINT);
    }

    #[test]
    fn test_symbol_with_either_prefix() {
        let id = classifier().classify("loading up on $wif").unwrap();
        assert_eq!(id.raw, "wif");
        assert!(id.is_symbol());

        let id = classifier().classify("#PEPE2 to the moon").unwrap();
        assert_eq!(id.raw, "PEPE2");
    }

    #[test]
    fn test_only_first_symbol_used() {
        let id = classifier().classify("$BONK and $WIF").unwrap();
        assert_eq!(id.raw, "BONK");
    }

    #[test]
    fn test_symbol_length_bounds() {
        assert_eq!(classifier().classify("$A"), None);
        assert_eq!(classifier().classify("$ABCDEFGHIJK"), None);
        assert!(classifier().classify("$ABCDEFGHIJ").is_some());
    }

    #[test]
    fn test_overlong_address_is_not_truncated() {
        let long = "A".repeat(50);
        assert_eq!(classifier().classify(&format!("${}", long)), None);
    }

    #[test]
    fn test_command_name_symbol_is_discarded() {
        assert_eq!(classifier().classify("$pnl BONK"), None);
        assert_eq!(classifier().classify("$PNL"), None);
        assert_eq!(classifier().classify("#Help"), None);
    }

    #[test]
    fn test_plain_text_has_no_candidate() {
        assert_eq!(classifier().classify("gm everyone"), None);
        assert_eq!(classifier().classify(""), None);
        assert_eq!(classifier().classify("$"), None);
    }

    #[test]
    fn test_classify_argument_accepts_bare_text() {
        let id = classifier().classify_argument(SOL_MINT).unwrap();
        assert_eq!(id.kind, IdentifierKind::Address(ChainHint::Solana));

        let id = classifier().classify_argument("bonk").unwrap();
        assert_eq!(id.raw, "bonk");
        assert!(id.is_symbol());

        let id = classifier().classify_argument(&format!("${}", EVM_ADDR)).unwrap();
        assert_eq!(id.kind, IdentifierKind::Address(ChainHint::Evm));
    }
}
