use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Side of a trade execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

/// A single normalised trade execution.
///
/// Produced once by [`crate::ledger::TradeLedger::load`] and never mutated
/// afterwards except by a [`crate::corporate_actions::CorporateActionAdjuster`]
/// run between ledger freeze and the first FY iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Dense, unique id assigned in input order.
    pub id: u64,
    pub symbol: String,
    pub side: Side,
    pub trade_date: NaiveDate,
    pub quantity: Decimal,
    pub transaction_amount: Decimal,
    /// Australian financial year (ending calendar year) this trade falls in.
    pub fy: u16,
}

impl Trade {
    /// `transaction_amount / quantity`. Panics only if `quantity` is zero,
    /// which the ledger loader rejects before any `Trade` is constructed.
    pub fn unit_price(&self) -> Decimal {
        self.transaction_amount / self.quantity
    }
}

/// One resolved match between a BUY parcel and a SELL execution, or a
/// short-sell fragment with no covering BUY (`buy_id`/`buy_date` both `None`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchEdge {
    pub buy_id: Option<u64>,
    pub buy_date: Option<NaiveDate>,
    pub sell_id: u64,
    pub sell_date: NaiveDate,
    pub quantity: Decimal,
    pub per_unit_gain: Decimal,
    pub long_term: bool,
}

/// Aggregate result for one symbol within one FY, as returned by the LP
/// formulator/driver before the orchestrator commits the parcel consumption.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymbolYearSolution {
    pub short_term_gain: Decimal,
    pub long_term_gain: Decimal,
    pub loss: Decimal,
    pub edges: Vec<MatchEdge>,
}

/// Totals and assignment detail for one financial year, across all symbols.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FyResult {
    pub fy: u16,
    /// Matches and short-sell fragments, keyed by symbol, in the order they
    /// were appended (buy-then-sell chronology within a symbol-year solve).
    pub buy_and_sell_pairs: std::collections::BTreeMap<String, Vec<MatchEdge>>,
    pub total_capital_gain: Decimal,
    pub capital_gain_discount: Decimal,
    pub loss: Decimal,
    pub short_sell_gain: Decimal,
    pub taxable_capital_gain: Decimal,
}

impl FyResult {
    pub fn new(fy: u16) -> Self {
        Self {
            fy,
            ..Default::default()
        }
    }
}
