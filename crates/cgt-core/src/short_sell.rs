//! Short-Sell Adjuster: peels uncovered sell quantity off before LP
//! formulation. See `SPEC_FULL.md` §4.3.

use crate::models::{MatchEdge, Trade};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Result of applying the short-sell adjustment to one (symbol, FY) slice.
pub struct ShortSellAdjustment {
    /// Short-sell fragments (`buy_id`/`buy_date` both `None`), in peel order.
    pub fragments: Vec<MatchEdge>,
    /// Revenue recognised on the peeled fragments. Undiscounted, not offset
    /// by losses.
    pub short_sell_gain: Decimal,
    /// Remaining sell quantity to formulate into the LP, keyed by sell id.
    /// Sells untouched by the peel keep their original quantity.
    pub residual_quantity: HashMap<u64, Decimal>,
}

/// Peel `shortfall` units off `sells`, cheapest-unit-price-first, recording
/// each peeled amount as a short-sell fragment.
///
/// `shortfall` must be `<= sum(sells.quantity)`; the caller (the year
/// orchestrator) computes it as `total_sell - total_buy_available` and only
/// calls this when that is positive.
pub fn adjust(sells: &[&Trade], shortfall: Decimal) -> ShortSellAdjustment {
    let mut ordered: Vec<&Trade> = sells.to_vec();
    ordered.sort_by(|a, b| {
        a.unit_price()
            .cmp(&b.unit_price())
            .then_with(|| a.id.cmp(&b.id))
    });

    let mut remaining_shortfall = shortfall;
    let mut fragments = Vec::new();
    let mut short_sell_gain = Decimal::ZERO;
    let mut residual_quantity: HashMap<u64, Decimal> =
        sells.iter().map(|s| (s.id, s.quantity)).collect();

    for sell in ordered {
        if remaining_shortfall <= Decimal::ZERO {
            break;
        }
        let peel = sell.quantity.min(remaining_shortfall);
        if peel <= Decimal::ZERO {
            continue;
        }

        fragments.push(MatchEdge {
            buy_id: None,
            buy_date: None,
            sell_id: sell.id,
            sell_date: sell.trade_date,
            quantity: peel,
            per_unit_gain: sell.unit_price(),
            long_term: false,
        });
        short_sell_gain += peel * sell.unit_price();
        residual_quantity.insert(sell.id, sell.quantity - peel);
        remaining_shortfall -= peel;
    }

    ShortSellAdjustment {
        fragments,
        short_sell_gain,
        residual_quantity,
    }
}
