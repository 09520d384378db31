//! Turns a classified identifier into one canonical trading pair.
//!
//! Addresses are probed chain by chain in [`ChainId::PROBE_ORDER`]; the first
//! chain returning any pairs wins. Symbols go through a single free-text
//! search. A failing probe counts as an empty one and never stops the others.

use crate::api::PairLookup;
use crate::classifier::{IdentifierKind, TokenIdentifier};
use crate::models::{ChainId, PairSnapshot};
use log::{debug, error, info, warn};
use std::sync::Arc;

pub mod selector;

pub use selector::{select_best, Selection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundReason {
    /// Every probe answered, with no pairs.
    NoPairs,
    /// Pairs came back but none survived the market-cap filter.
    NoQualifyingPair,
    /// Every probe failed at the transport or parsing layer.
    ProbesFailed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Found(PairSnapshot),
    NotFound(NotFoundReason),
}

#[cfg(test)]
impl Resolution {
    pub fn found(self) -> Option<PairSnapshot> {
        match self {
            Resolution::Found(pair) => Some(pair),
            Resolution::NotFound(_) => None,
        }
    }
}

/// Result of a set of probes before selection.
struct ProbeOutcome {
    pairs: Vec<PairSnapshot>,
    all_failed: bool,
}

#[derive(Clone)]
pub struct ChainResolver {
    lookup: Arc<dyn PairLookup>,
}

impl ChainResolver {
    pub fn new(lookup: Arc<dyn PairLookup>) -> Self {
        Self { lookup }
    }

    pub fn lookup(&self) -> &Arc<dyn PairLookup> {
        &self.lookup
    }

    pub async fn resolve(&self, identifier: &TokenIdentifier) -> Resolution {
        let outcome = match identifier.kind {
            IdentifierKind::Address(_) => self.probe_chains(&identifier.raw).await,
            IdentifierKind::Symbol => self.probe_search(&identifier.raw).await,
        };

        finish(&identifier.raw, outcome)
    }

    /// Free-text search without classification, used by the `search` command.
    pub async fn search(&self, query: &str) -> Resolution {
        let outcome = self.probe_search(query).await;
        finish(query, outcome)
    }

    async fn probe_chains(&self, address: &str) -> ProbeOutcome {
        let mut failures = 0;

        for chain in ChainId::PROBE_ORDER {
            match self.lookup.token_pairs(chain, address).await {
                Ok(pairs) if !pairs.is_empty() => {
                    debug!("Found {} pairs for {} on {}", pairs.len(), address, chain);
                    return ProbeOutcome { pairs, all_failed: false };
                }
                Ok(_) => debug!("No pairs for {} on {}", address, chain),
                Err(e) => {
                    if e.is_transient() {
                        warn!("Pair lookup for {} on {} failed: {}", address, chain, e);
                    } else {
                        error!("Unexpected error probing {} on {}: {}", address, chain, e);
                    }
                    failures += 1;
                }
            }
        }

        ProbeOutcome {
            pairs: Vec::new(),
            all_failed: failures == ChainId::PROBE_ORDER.len(),
        }
    }

    async fn probe_search(&self, query: &str) -> ProbeOutcome {
        match self.lookup.search_pairs(query).await {
            Ok(pairs) => ProbeOutcome { pairs, all_failed: false },
            Err(e) => {
                warn!("Pair search for {} failed: {}", query, e);
                ProbeOutcome { pairs: Vec::new(), all_failed: true }
            }
        }
    }
}

fn finish(raw: &str, outcome: ProbeOutcome) -> Resolution {
    if outcome.all_failed {
        return Resolution::NotFound(NotFoundReason::ProbesFailed);
    }

    match select_best(outcome.pairs) {
        Selection::Selected(pair) => Resolution::Found(pair),
        Selection::EmptyInput => {
            debug!("No pairs returned for {}", raw);
            Resolution::NotFound(NotFoundReason::NoPairs)
        }
        Selection::NoneQualified => {
            info!("Pairs found for {} but none with a positive market cap", raw);
            Resolution::NotFound(NotFoundReason::NoQualifyingPair)
        }
    }
}
