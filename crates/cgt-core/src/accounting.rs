//! Lot Accounting State: per-BUY-id consumed-quantity ledger, carried across
//! FYs by the [`crate::orchestrator::YearOrchestrator`]. See `SPEC_FULL.md` §4.2.

use crate::error::CgtError;
use crate::models::Trade;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::collections::HashMap;

/// Monotonically-updated `used_buy` map.
///
/// Owned explicitly by the orchestrator and passed by mutable reference; it
/// is never a default constructor argument, which is the fix for the
/// default-mutable-argument bug this module replaces (see `SPEC_FULL.md` §9).
#[derive(Debug, Clone, Default)]
pub struct LotAccounting {
    used_buy: HashMap<u64, Decimal>,
    epsilon: Decimal,
}

impl LotAccounting {
    pub fn new(epsilon: Decimal) -> Self {
        Self {
            used_buy: HashMap::new(),
            epsilon,
        }
    }

    /// Remaining unconsumed quantity of BUY `buy`.
    pub fn available(&self, buy: &Trade) -> Decimal {
        let used = self.used_buy.get(&buy.id).copied().unwrap_or(Decimal::ZERO);
        buy.quantity - used
    }

    /// Record that `quantity` units of `buy` have been matched to a SELL.
    ///
    /// # Errors
    /// Returns [`CgtError::Inconsistency`] if `quantity` exceeds what remains
    /// available (beyond the configured tolerance), which indicates the LP
    /// solver returned an infeasible allocation.
    pub fn consume(&mut self, buy: &Trade, quantity: Decimal) -> Result<(), CgtError> {
        let available = self.available(buy);
        if quantity > available + self.epsilon {
            return Err(CgtError::Inconsistency {
                buy_id: buy.id,
                requested: quantity.to_f64().unwrap_or(f64::NAN),
                available: available.to_f64().unwrap_or(f64::NAN),
            });
        }
        *self.used_buy.entry(buy.id).or_insert(Decimal::ZERO) += quantity;
        Ok(())
    }
}
