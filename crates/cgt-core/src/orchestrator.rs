//! Year Orchestrator: iterates FYs ascending, symbols within each FY
//! ascending, committing BUY consumption immediately after each symbol-year
//! solve. Grounded on `original_source/src/cgt_calculator.py`'s
//! `CGTCalculator.execute`. See `SPEC_FULL.md` §4.6.

use crate::accounting::LotAccounting;
use crate::config::Config;
use crate::corporate_actions::CorporateActionAdjuster;
use crate::error::CgtError;
use crate::ledger::TradeLedger;
use crate::lp::formulator::{self, SellInput};
use crate::models::FyResult;
use crate::short_sell;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::{BTreeMap, HashMap};

/// Run the full computation: one pass of the corporate-actions pre-pass,
/// then ascending FY/symbol iteration.
///
/// `ledger` is consumed because the corporate-actions adjuster may mutate
/// trade quantities and symbols in place before any FY is processed.
pub fn run(
    mut ledger: TradeLedger,
    adjuster: &dyn CorporateActionAdjuster,
    config: Config,
) -> Result<BTreeMap<u16, FyResult>, CgtError> {
    adjuster.adjust(ledger.trades_mut());

    let mut accounting = LotAccounting::new(config.epsilon);
    let mut results: BTreeMap<u16, FyResult> = BTreeMap::new();

    for fy in ledger.fys() {
        let mut fy_result = FyResult::new(fy);
        let mut short_sell_symbols: Vec<String> = Vec::new();

        for symbol in ledger.symbols() {
            let sells = ledger.sells_in(&symbol, fy);
            if sells.is_empty() {
                continue;
            }
            let buys = ledger.buys_up_to(&symbol, fy);

            let total_sell: Decimal = sells.iter().map(|s| s.quantity).sum();
            let total_available: Decimal = buys.iter().map(|b| accounting.available(b)).sum();

            let mut short_sell_gain = Decimal::ZERO;
            let residual_quantity: HashMap<u64, Decimal> = if total_available < total_sell {
                short_sell_symbols.push(symbol.clone());
                let adjustment = short_sell::adjust(&sells, total_sell - total_available);
                short_sell_gain = adjustment.short_sell_gain;
                fy_result
                    .buy_and_sell_pairs
                    .entry(symbol.clone())
                    .or_default()
                    .extend(adjustment.fragments);
                adjustment.residual_quantity
            } else {
                sells.iter().map(|s| (s.id, s.quantity)).collect()
            };

            let sell_inputs: Vec<SellInput> = sells
                .iter()
                .copied()
                .map(|trade| SellInput {
                    trade,
                    residual_quantity: residual_quantity[&trade.id],
                })
                .collect();

            let solution = formulator::solve(&symbol, &buys, &accounting, &sell_inputs)?;

            for edge in &solution.edges {
                if let Some(buy_id) = edge.buy_id {
                    let buy = buys
                        .iter()
                        .copied()
                        .find(|b| b.id == buy_id)
                        .unwrap_or_else(|| {
                            unreachable!("LP solution referenced a buy id not in the eligible set")
                        });
                    accounting.consume(buy, edge.quantity)?;
                }
            }

            fy_result
                .buy_and_sell_pairs
                .entry(symbol.clone())
                .or_default()
                .extend(solution.edges.clone());

            fy_result.total_capital_gain +=
                solution.short_term_gain + solution.long_term_gain + short_sell_gain;
            fy_result.capital_gain_discount += dec!(0.5) * solution.long_term_gain;
            fy_result.loss += solution.loss;
            fy_result.short_sell_gain += short_sell_gain;
            fy_result.taxable_capital_gain += solution.short_term_gain
                + dec!(0.5) * solution.long_term_gain
                - solution.loss
                + short_sell_gain;
        }

        if !config.allow_short_selling && !short_sell_symbols.is_empty() {
            return Err(CgtError::ShortSellDetected {
                fy,
                symbols: short_sell_symbols,
            });
        }

        results.insert(fy, fy_result);
    }

    Ok(results)
}
