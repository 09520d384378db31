use crate::models::Call;

/// Profit/loss of a call, derived from its two market-cap fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pnl {
    pub pnl: f64,
    pub pnl_percentage: f64,
}

/// Pure derivation, recomputed on demand and never stored. A zero (or
/// negative) market cap at call time yields 0%.
pub fn calculate(call: &Call) -> Pnl {
    let pnl = call.current_market_cap - call.market_cap_at_call;
    let pnl_percentage = if call.market_cap_at_call > 0.0 {
        pnl / call.market_cap_at_call * 100.0
    } else {
        0.0
    };

    Pnl { pnl, pnl_percentage }
}

impl Call {
    pub fn pnl(&self) -> Pnl {
        calculate(self)
    }
}
