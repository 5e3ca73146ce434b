//! LP Formulator: builds the per-(symbol, FY) linear program and extracts
//! the solution into assignment edges and aggregate totals. Grounded on
//! `original_source/lp_solver.py`. See `SPEC_FULL.md` §4.4.

use super::driver::LpModel;
use crate::accounting::LotAccounting;
use crate::error::CgtError;
use crate::fy::is_long_term;
use crate::models::{MatchEdge, SymbolYearSolution, Trade};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

/// A residual SELL still to be matched against BUY parcels, after the
/// short-sell adjuster has peeled off any uncovered quantity.
pub struct SellInput<'a> {
    pub trade: &'a Trade,
    pub residual_quantity: Decimal,
}

/// A (buy, sell) candidate match: `buy.trade_date <= sell.trade_date`.
struct Edge<'a> {
    buy: &'a Trade,
    sell: &'a Trade,
    per_unit_gain: Decimal,
    long_term: bool,
}

impl Edge<'_> {
    /// `A_row[e]`: positive short-term gain contribution, else zero.
    fn a_row(&self) -> Decimal {
        if self.per_unit_gain > Decimal::ZERO && !self.long_term {
            self.per_unit_gain
        } else {
            Decimal::ZERO
        }
    }

    /// `B_row[e]`: positive long-term gain contribution, else zero.
    fn b_row(&self) -> Decimal {
        if self.per_unit_gain > Decimal::ZERO && self.long_term {
            self.per_unit_gain
        } else {
            Decimal::ZERO
        }
    }

    /// `L_row[e]`: loss magnitude contribution, else zero.
    fn l_row(&self) -> Decimal {
        if self.per_unit_gain <= Decimal::ZERO {
            -self.per_unit_gain
        } else {
            Decimal::ZERO
        }
    }
}

/// Solve the LP for one (symbol, FY) slice and extract the assignment.
///
/// `buys` must already be filtered to eligible parcels for this symbol/FY
/// (see [`crate::ledger::TradeLedger::buys_up_to`]); `sells` carries the
/// post-short-sell-adjustment residual quantity for each SELL.
///
/// Returns a zero solution with no edges if `sells` has no residual
/// quantity at all (§4.4: "If there are no SELLs, return a zero result").
pub fn solve(
    symbol: &str,
    buys: &[&Trade],
    accounting: &LotAccounting,
    sells: &[SellInput<'_>],
) -> Result<SymbolYearSolution, CgtError> {
    let active_sells: Vec<&SellInput> = sells
        .iter()
        .filter(|s| s.residual_quantity > Decimal::ZERO)
        .collect();
    if active_sells.is_empty() {
        return Ok(SymbolYearSolution::default());
    }

    let edges: Vec<Edge> = active_sells
        .iter()
        .flat_map(|sell_input| {
            buys.iter()
                .filter(|buy| {
                    buy.trade_date <= sell_input.trade.trade_date
                        && accounting.available(buy) > Decimal::ZERO
                })
                .map(|buy| Edge {
                    buy,
                    sell: sell_input.trade,
                    per_unit_gain: sell_input.trade.unit_price() - buy.unit_price(),
                    long_term: is_long_term(buy.trade_date, sell_input.trade.trade_date),
                })
        })
        .collect();

    let mut model = LpModel::new();
    let edge_vars: Vec<_> = edges.iter().map(|_| model.add_var(0.0)).collect();
    let a_var = model.add_var(1.0);
    let b_var = model.add_var(0.5);
    let l_var = model.add_var(0.0);

    // Sell-quantity equalities: sum of edges touching a sell == its residual quantity.
    for sell_input in &active_sells {
        let coefficients: Vec<_> = edges
            .iter()
            .zip(&edge_vars)
            .filter(|(edge, _)| std::ptr::eq(edge.sell, sell_input.trade))
            .map(|(_, var)| (*var, 1.0))
            .collect();
        model.add_eq(
            &coefficients,
            sell_input.residual_quantity.to_f64().unwrap_or(0.0),
        );
    }

    // Buy-capacity inequalities: sum of edges touching a buy <= its remaining quantity.
    for buy in buys {
        let coefficients: Vec<_> = edges
            .iter()
            .zip(&edge_vars)
            .filter(|(edge, _)| std::ptr::eq(edge.buy, *buy))
            .map(|(_, var)| (*var, 1.0))
            .collect();
        if !coefficients.is_empty() {
            model.add_le(&coefficients, accounting.available(buy).to_f64().unwrap_or(0.0));
        }
    }

    // Auxiliary bindings: A' - sum(A_row . x) = 0, and likewise for B', L'.
    let mut a_coefficients = vec![(a_var, 1.0)];
    let mut b_coefficients = vec![(b_var, 1.0)];
    let mut l_coefficients = vec![(l_var, 1.0)];
    for (edge, var) in edges.iter().zip(&edge_vars) {
        let a_row = edge.a_row().to_f64().unwrap_or(0.0);
        let b_row = edge.b_row().to_f64().unwrap_or(0.0);
        let l_row = edge.l_row().to_f64().unwrap_or(0.0);
        if a_row != 0.0 {
            a_coefficients.push((*var, -a_row));
        }
        if b_row != 0.0 {
            b_coefficients.push((*var, -b_row));
        }
        if l_row != 0.0 {
            l_coefficients.push((*var, -l_row));
        }
    }
    model.add_eq(&a_coefficients, 0.0);
    model.add_eq(&b_coefficients, 0.0);
    model.add_eq(&l_coefficients, 0.0);

    // Redundant non-negativity rows, kept for solver stability per §4.4.
    let a_row_terms: Vec<_> = edges
        .iter()
        .zip(&edge_vars)
        .filter_map(|(e, v)| {
            let a = e.a_row().to_f64().unwrap_or(0.0);
            (a != 0.0).then_some((*v, a))
        })
        .collect();
    if !a_row_terms.is_empty() {
        model.add_ge(&a_row_terms, 0.0);
    }
    let b_row_terms: Vec<_> = edges
        .iter()
        .zip(&edge_vars)
        .filter_map(|(e, v)| {
            let b = e.b_row().to_f64().unwrap_or(0.0);
            (b != 0.0).then_some((*v, b))
        })
        .collect();
    if !b_row_terms.is_empty() {
        model.add_ge(&b_row_terms, 0.0);
    }
    let l_row_terms: Vec<_> = edges
        .iter()
        .zip(&edge_vars)
        .filter_map(|(e, v)| {
            let l = e.l_row().to_f64().unwrap_or(0.0);
            (l != 0.0).then_some((*v, l))
        })
        .collect();
    if !l_row_terms.is_empty() {
        model.add_ge(&l_row_terms, 0.0);
    }

    let solution = model.solve(symbol)?;

    let mut result_edges = Vec::new();
    for (edge, var) in edges.iter().zip(&edge_vars) {
        let x = solution.value(*var);
        if x <= 1e-9 {
            continue;
        }
        result_edges.push(MatchEdge {
            buy_id: Some(edge.buy.id),
            buy_date: Some(edge.buy.trade_date),
            sell_id: edge.sell.id,
            sell_date: edge.sell.trade_date,
            quantity: Decimal::from_f64(x).unwrap_or(Decimal::ZERO),
            per_unit_gain: edge.per_unit_gain,
            long_term: edge.long_term,
        });
    }

    Ok(SymbolYearSolution {
        short_term_gain: Decimal::from_f64(solution.value(a_var)).unwrap_or(Decimal::ZERO),
        long_term_gain: Decimal::from_f64(solution.value(b_var)).unwrap_or(Decimal::ZERO),
        loss: Decimal::from_f64(solution.value(l_var)).unwrap_or(Decimal::ZERO),
        edges: result_edges,
    })
}
