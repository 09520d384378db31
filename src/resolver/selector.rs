use crate::models::PairSnapshot;
use std::cmp::Ordering;

/// Outcome of picking the canonical pair out of a lookup result.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Selected(PairSnapshot),
    /// The lookup returned no pairs at all.
    EmptyInput,
    /// Pairs were returned but none had a positive market cap.
    NoneQualified,
}

#[cfg(test)]
impl Selection {
    pub fn into_pair(self) -> Option<PairSnapshot> {
        match self {
            Selection::Selected(pair) => Some(pair),
            _ => None,
        }
    }
}

/// Drops pairs with `market_cap <= 0`, then keeps the pair with the highest
/// USD liquidity, ties broken by 24h volume. Equal pairs keep the one seen
/// first.
pub fn select_best(pairs: Vec<PairSnapshot>) -> Selection {
    if pairs.is_empty() {
        return Selection::EmptyInput;
    }

    let mut best: Option<PairSnapshot> = None;
    for pair in pairs.into_iter().filter(|p| p.market_cap > 0.0) {
        match &best {
            Some(current) if rank(&pair, current) != Ordering::Greater => {}
            _ => best = Some(pair),
        }
    }

    match best {
        Some(pair) => Selection::Selected(pair),
        None => Selection::NoneQualified,
    }
}

fn rank(a: &PairSnapshot, b: &PairSnapshot) -> Ordering {
    a.liquidity_usd()
        .partial_cmp(&b.liquidity_usd())
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.volume.h24.partial_cmp(&b.volume.h24).unwrap_or(Ordering::Equal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::common::create_test_pair;

    fn pair(address: &str, liquidity: f64, volume: f64, market_cap: f64) -> PairSnapshot {
        let mut p = create_test_pair(address, market_cap);
        p.liquidity.usd = liquidity;
        p.volume.h24 = volume;
        p
    }

    fn selected_address(selection: Selection) -> String {
        selection.into_pair().map(|p| p.pair_address).unwrap_or_default()
    }

    #[test]
    fn test_liquidity_tie_broken_by_volume() {
        let pairs = vec![pair("a", 1000.0, 500.0, 10.0), pair("b", 1000.0, 900.0, 5.0)];
        assert_eq!(selected_address(select_best(pairs)), "b");
    }

    #[test]
    fn test_higher_liquidity_wins_over_volume() {
        let pairs = vec![pair("a", 500.0, 1_000_000.0, 10.0), pair("b", 2000.0, 1.0, 10.0)];
        assert_eq!(selected_address(select_best(pairs)), "b");
    }

    #[test]
    fn test_full_tie_keeps_first() {
        let pairs = vec![
            pair("first", 100.0, 100.0, 1.0),
            pair("second", 100.0, 100.0, 1.0),
            pair("third", 100.0, 100.0, 1.0),
        ];
        assert_eq!(selected_address(select_best(pairs)), "first");
    }

    #[test]
    fn test_non_positive_market_cap_is_filtered() {
        let pairs = vec![pair("rich", 1_000_000.0, 1.0, 0.0), pair("small", 10.0, 1.0, 50.0)];
        assert_eq!(selected_address(select_best(pairs)), "small");
    }

    #[test]
    fn test_all_zero_market_cap_is_none_qualified() {
        let pairs = vec![pair("a", 1000.0, 1.0, 0.0), pair("b", 2000.0, 1.0, -3.0)];
        assert_eq!(select_best(pairs), Selection::NoneQualified);
    }

    #[test]
    fn test_empty_input_is_distinct() {
        assert_eq!(select_best(Vec::new()), Selection::EmptyInput);
    }
}
