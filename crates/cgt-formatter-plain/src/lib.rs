//! Plain text formatter for Australian CGT reports.
//!
//! Implements the report-writer collaborator described in `SPEC_FULL.md`
//! §6: it consumes the per-FY result mapping exactly as produced by
//! `cgt_core::orchestrator::run` and renders it as a human readable report.
//! Short-sell fragments (`buy_date = None`) are rendered as the literal
//! string `"Short Sell"`.

use cgt_core::{Config, FyResult, MatchEdge};
use cgt_format::{format_currency, format_date, format_decimal, format_financial_year};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Render the full per-FY result mapping as a plain-text report.
///
/// `config.truncate_quantities` controls whether matched quantities are
/// truncated to an integer at this presentation boundary (legacy behaviour,
/// see `SPEC_FULL.md` §9) or printed as the real value.
pub fn format(results: &BTreeMap<u16, FyResult>, config: &Config) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# SUMMARY\n");
    let _ = writeln!(
        out,
        "{:<10}{:<14}{:<14}{:<14}{:<14}Taxable gain",
        "FY", "Total gain", "CGT discount", "Loss", "Short sell"
    );
    let _ = writeln!(
        out,
        "======================================================================="
    );
    for result in results.values() {
        let _ = writeln!(
            out,
            "{:<10}{:<14}{:<14}{:<14}{:<14}{}",
            format_financial_year(result.fy),
            format_currency(result.total_capital_gain),
            format_currency(result.capital_gain_discount),
            format_currency(result.loss),
            format_currency(result.short_sell_gain),
            format_currency(result.taxable_capital_gain)
        );
    }

    let _ = writeln!(out, "\n# FY DETAILS");
    for result in results.values() {
        let _ = writeln!(out, "\n## {}\n", format_financial_year(result.fy));
        if result.buy_and_sell_pairs.is_empty() {
            let _ = writeln!(out, "NONE");
            continue;
        }
        for (symbol, edges) in &result.buy_and_sell_pairs {
            let _ = writeln!(out, "{symbol}:");
            for edge in edges {
                format_edge(&mut out, edge, config);
            }
        }
    }

    out.trim_end().to_string() + "\n"
}

fn format_edge(out: &mut String, edge: &MatchEdge, config: &Config) {
    let buy_label = match edge.buy_date {
        Some(date) => format_date(date),
        None => "Short Sell".to_string(),
    };
    let quantity = if config.truncate_quantities {
        format_decimal(edge.quantity.trunc())
    } else {
        format_decimal(edge.quantity)
    };
    let gain_label = if edge.buy_date.is_none() {
        "proceeds"
    } else if edge.per_unit_gain > Decimal::ZERO {
        if edge.long_term { "long-term gain/unit" } else { "short-term gain/unit" }
    } else {
        "loss/unit"
    };

    let _ = writeln!(
        out,
        "   {} -> {}: {} units, {} {}",
        buy_label,
        format_date(edge.sell_date),
        quantity,
        format_currency(edge.per_unit_gain),
        gain_label
    );
}
