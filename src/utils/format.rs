use crate::models::{ChainId, PairSnapshot};
use chrono::{DateTime, TimeZone, Utc};

/// `$1.2B`, `$3.4M`, `$5.6K`, else two decimals.
pub fn money(value: f64) -> String {
    if value >= 1_000_000_000.0 {
        format!("${:.1}B", value / 1_000_000_000.0)
    } else if value >= 1_000_000.0 {
        format!("${:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("${:.1}K", value / 1_000.0)
    } else {
        format!("${:.2}", value)
    }
}

/// `money` with an explicit sign, for gains and losses.
pub fn signed_money(value: f64) -> String {
    if value < 0.0 {
        format!("-{}", money(-value))
    } else {
        format!("+{}", money(value))
    }
}

pub fn percentage(value: f64) -> String {
    let sign = if value >= 0.0 { "+" } else { "" };
    format!("{}{:.1}%", sign, value)
}

pub fn trend_icon(change: f64) -> &'static str {
    if change >= 0.0 {
        "📈"
    } else {
        "📉"
    }
}

pub fn chain_icon(chain: ChainId) -> &'static str {
    match chain {
        ChainId::Solana => "☀️",
        ChainId::Ethereum => "🔷",
        ChainId::Bsc => "🟡",
        ChainId::Base => "🔵",
        ChainId::Arbitrum => "🔴",
        ChainId::Polygon => "🟣",
        ChainId::Avalanche => "🔺",
        ChainId::Unknown => "⛓️",
    }
}

/// Coarsest whole unit of the time elapsed since `created_ms`.
pub fn age(created_ms: i64, now: DateTime<Utc>) -> String {
    let created = match Utc.timestamp_millis_opt(created_ms).single() {
        Some(created) => created,
        None => return "?".to_string(),
    };

    let elapsed = now.signed_duration_since(created);
    let days = elapsed.num_days();
    if days >= 365 {
        format!("{}y", days / 365)
    } else if days >= 30 {
        format!("{}mo", days / 30)
    } else if days >= 7 {
        format!("{}w", days / 7)
    } else if days >= 1 {
        format!("{}d", days)
    } else if elapsed.num_hours() >= 1 {
        format!("{}h", elapsed.num_hours())
    } else {
        format!("{}m", elapsed.num_minutes().max(0))
    }
}

/// Multi-line card posted when a token is called or looked up.
pub fn pair_summary(pair: &PairSnapshot, contract: &str, now: DateTime<Utc>) -> String {
    let change_24h = pair.price_change.h24;
    let age_text = pair
        .pair_created_at
        .map(|ms| age(ms, now))
        .unwrap_or_else(|| "?".to_string());

    format!(
        "🚀 {} [{}/{}]\n\
         {}/{} {}\n\n\
         {} {} @ {}\n\
         💰 USD: ${}\n\
         💎 FDV: {}\n\
         💧 Liq: {}\n\
         📊 Vol: {}\n\
         ⏰ Age: {}\n\
         📈 24H: {}\n\
         📈 1H: {}\n\n\
         🔗 Contract: {}\n\
         🗓️ Updated: {} UTC",
        pair.base_token.name,
        money(pair.market_cap),
        percentage(change_24h),
        pair.base_token.symbol,
        pair.quote_token.symbol,
        trend_icon(change_24h),
        chain_icon(pair.chain_id),
        pair.chain_id.as_str().to_uppercase(),
        pair.dex_id,
        pair.price_usd,
        money(pair.fdv),
        money(pair.liquidity_usd()),
        money(pair.volume.h24),
        age_text,
        percentage(change_24h),
        percentage(pair.price_change.h1),
        contract,
        now.format("%H:%M"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::common::create_test_pair;
    use chrono::Duration;

    #[test]
    fn test_money() {
        assert_eq!(money(1_234_000_000.0), "$1.2B");
        assert_eq!(money(3_400_000.0), "$3.4M");
        assert_eq!(money(5_600.0), "$5.6K");
        assert_eq!(money(7.891), "$7.89");
        assert_eq!(money(0.0), "$0.00");
    }

    #[test]
    fn test_signed_money() {
        assert_eq!(signed_money(-1_500_000.0), "-$1.5M");
        assert_eq!(signed_money(250.0), "+$250.00");
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(12.34), "+12.3%");
        assert_eq!(percentage(-4.56), "-4.6%");
        assert_eq!(percentage(0.0), "+0.0%");
    }

    #[test]
    fn test_age_units() {
        let now = Utc::now();
        let ms = |d: Duration| (now - d).timestamp_millis();
        assert_eq!(age(ms(Duration::days(800)), now), "2y");
        assert_eq!(age(ms(Duration::days(65)), now), "2mo");
        assert_eq!(age(ms(Duration::days(15)), now), "2w");
        assert_eq!(age(ms(Duration::days(3)), now), "3d");
        assert_eq!(age(ms(Duration::hours(5)), now), "5h");
        assert_eq!(age(ms(Duration::minutes(12)), now), "12m");
    }

    #[test]
    fn test_unknown_chain_renders_generically() {
        assert_eq!(chain_icon(ChainId::Unknown), "⛓️");
    }

    #[test]
    fn test_pair_summary_contains_key_figures() {
        let mut pair = create_test_pair("p1", 2_500_000.0);
        pair.base_token.name = "Bonk".to_string();
        pair.price_change.h24 = -3.2;
        let card = pair_summary(&pair, "BONK", Utc::now());
        assert!(card.contains("🚀 Bonk [$2.5M/-3.2%]"));
        assert!(card.contains("📉"));
        assert!(card.contains("🔗 Contract: BONK"));
        assert!(card.contains("SOLANA @"));
    }
}
