//! Trade Ledger: CSV loading, normalisation, and freeze.
//!
//! Required columns (case-insensitive, whitespace-trimmed): `symbol`, `side`,
//! `trade_date`, `quantity`, `transaction_amount`. See `SPEC_FULL.md` §4.1.

use crate::error::CgtError;
use crate::fy::fy_for_date;
use crate::models::{Side, Trade};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

const REQUIRED_COLUMNS: [&str; 5] = ["symbol", "side", "trade_date", "quantity", "transaction_amount"];

/// Day-first date formats accepted for `trade_date`, tried in order.
const DATE_FORMATS: [&str; 3] = ["%d/%m/%Y", "%d-%m-%Y", "%Y-%m-%d"];

/// An immutable, normalised trade history.
///
/// Built once via [`TradeLedger::load`] or [`TradeLedger::load_from_reader`].
/// A [`crate::corporate_actions::CorporateActionAdjuster`] may mutate
/// `quantity`/`symbol` on the held trades between load and the first call
/// into [`crate::orchestrator::YearOrchestrator`]; after that the ledger is
/// never touched again.
#[derive(Debug, Clone)]
pub struct TradeLedger {
    trades: Vec<Trade>,
}

impl TradeLedger {
    /// Load and normalise a trade history from a CSV file.
    pub fn load(path: &Path) -> Result<Self, CgtError> {
        let file = std::fs::File::open(path)?;
        Self::load_from_reader(file)
    }

    /// Load and normalise a trade history from any reader (used by tests and
    /// by callers that already have the CSV content in memory).
    pub fn load_from_reader(reader: impl Read) -> Result<Self, CgtError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let column_index = index_required_columns(&headers)?;

        let mut trades = Vec::new();
        for (row_idx, record) in csv_reader.records().enumerate() {
            let record = record?;
            trades.push(parse_trade_row(row_idx as u64, &record, &column_index)?);
        }

        Ok(Self { trades })
    }

    /// Construct a ledger directly from already-normalised trades (used by
    /// tests and by callers building fixtures in code).
    pub fn from_trades(trades: Vec<Trade>) -> Self {
        Self { trades }
    }

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn trades_mut(&mut self) -> &mut [Trade] {
        &mut self.trades
    }

    /// All FYs present in the ledger, ascending.
    pub fn fys(&self) -> Vec<u16> {
        let mut fys: Vec<u16> = self.trades.iter().map(|t| t.fy).collect();
        fys.sort_unstable();
        fys.dedup();
        fys
    }

    /// All symbols present in the ledger, lexicographically ascending.
    pub fn symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self.trades.iter().map(|t| t.symbol.clone()).collect();
        symbols.sort();
        symbols.dedup();
        symbols
    }

    /// BUYs of `symbol` dated in FY `up_to_fy` or earlier, in trade-date order.
    pub fn buys_up_to(&self, symbol: &str, up_to_fy: u16) -> Vec<&Trade> {
        let mut buys: Vec<&Trade> = self
            .trades
            .iter()
            .filter(|t| t.symbol == symbol && t.side == Side::Buy && t.fy <= up_to_fy)
            .collect();
        buys.sort_by_key(|t| t.trade_date);
        buys
    }

    /// SELLs of `symbol` dated exactly in FY `fy`, in trade-date order.
    pub fn sells_in(&self, symbol: &str, fy: u16) -> Vec<&Trade> {
        let mut sells: Vec<&Trade> = self
            .trades
            .iter()
            .filter(|t| t.symbol == symbol && t.side == Side::Sell && t.fy == fy)
            .collect();
        sells.sort_by_key(|t| t.trade_date);
        sells
    }
}

/// Map required column names to their position in the header row.
fn index_required_columns(headers: &csv::StringRecord) -> Result<HashMap<&'static str, usize>, CgtError> {
    let lower: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();

    let mut index = HashMap::new();
    let mut missing = Vec::new();
    for &required in &REQUIRED_COLUMNS {
        match lower.iter().position(|h| h == required) {
            Some(pos) => {
                index.insert(required, pos);
            }
            None => missing.push(required.to_string()),
        }
    }

    if !missing.is_empty() {
        return Err(CgtError::ValidationError(missing.join(", ")));
    }

    Ok(index)
}

fn parse_trade_row(
    id: u64,
    record: &csv::StringRecord,
    column_index: &HashMap<&'static str, usize>,
) -> Result<Trade, CgtError> {
    let field = |name: &'static str| -> &str { record.get(column_index[name]).unwrap_or("") };

    let symbol = normalize_symbol(field("symbol"));
    let side = parse_side(field("side"))?;
    let trade_date = parse_trade_date(field("trade_date"))?;
    let quantity = parse_decimal(field("quantity"), "quantity")?;
    let transaction_amount = parse_decimal(field("transaction_amount"), "transaction_amount")?;

    if quantity <= Decimal::ZERO {
        return Err(CgtError::InvalidQuantity {
            raw: field("quantity").to_string(),
            field: "quantity",
        });
    }

    let fy = fy_for_date(trade_date);

    Ok(Trade {
        id,
        symbol,
        side,
        trade_date,
        quantity,
        transaction_amount,
        fy,
    })
}

/// Strip the exchange suffix after the first `.` (e.g. `BHP.AX` -> `BHP`).
fn normalize_symbol(raw: &str) -> String {
    raw.split('.').next().unwrap_or(raw).trim().to_string()
}

fn parse_side(raw: &str) -> Result<Side, CgtError> {
    match raw.trim().to_uppercase().as_str() {
        "BUY" => Ok(Side::Buy),
        "SELL" => Ok(Side::Sell),
        _ => Err(CgtError::InvalidSide {
            raw: raw.to_string(),
        }),
    }
}

fn parse_trade_date(raw: &str) -> Result<NaiveDate, CgtError> {
    let trimmed = raw.trim();
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date);
        }
    }
    Err(CgtError::InvalidDate {
        raw: trimmed.to_string(),
    })
}

fn parse_decimal(raw: &str, field: &'static str) -> Result<Decimal, CgtError> {
    Decimal::from_str(raw.trim()).map_err(|_| CgtError::InvalidQuantity {
        raw: raw.to_string(),
        field,
    })
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    fn sample_csv() -> &'static str {
        "Symbol,Side,Trade_Date,Quantity,Transaction_Amount\n\
         TSLA.AX,BUY,01/07/2019,10,1000\n\
         TSLA.AX,sell,15/08/2021,4,800\n"
    }

    #[test]
    fn loads_and_normalises_trades() {
        let ledger = TradeLedger::load_from_reader(sample_csv().as_bytes()).expect("load");
        assert_eq!(ledger.trades().len(), 2);
        assert_eq!(ledger.trades()[0].symbol, "TSLA");
        assert_eq!(ledger.trades()[0].side, Side::Buy);
        assert_eq!(ledger.trades()[1].side, Side::Sell);
        assert_eq!(ledger.trades()[0].fy, 2020);
        assert_eq!(ledger.trades()[1].fy, 2022);
    }

    #[test]
    fn assigns_dense_sequential_ids() {
        let ledger = TradeLedger::load_from_reader(sample_csv().as_bytes()).expect("load");
        assert_eq!(ledger.trades()[0].id, 0);
        assert_eq!(ledger.trades()[1].id, 1);
    }

    #[test]
    fn missing_column_is_rejected() {
        let csv = "symbol,side,trade_date,quantity\nAAA,BUY,01/01/2020,10\n";
        let result = TradeLedger::load_from_reader(csv.as_bytes());
        assert!(matches!(result, Err(CgtError::ValidationError(_))));
    }

    #[test]
    fn invalid_side_is_rejected() {
        let csv = "symbol,side,trade_date,quantity,transaction_amount\nAAA,HOLD,01/01/2020,10,100\n";
        let result = TradeLedger::load_from_reader(csv.as_bytes());
        assert!(matches!(result, Err(CgtError::InvalidSide { .. })));
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let csv = "symbol,side,trade_date,quantity,transaction_amount\nAAA,BUY,01/01/2020,0,100\n";
        let result = TradeLedger::load_from_reader(csv.as_bytes());
        assert!(matches!(result, Err(CgtError::InvalidQuantity { .. })));
    }

    #[test]
    fn fys_and_symbols_are_sorted_and_deduped() {
        let csv = "symbol,side,trade_date,quantity,transaction_amount\n\
                   BBB,BUY,01/07/2021,1,10\n\
                   AAA,BUY,01/07/2020,1,10\n\
                   AAA,BUY,01/08/2020,1,10\n";
        let ledger = TradeLedger::load_from_reader(csv.as_bytes()).expect("load");
        assert_eq!(ledger.symbols(), vec!["AAA".to_string(), "BBB".to_string()]);
        assert_eq!(ledger.fys(), vec![2021, 2022]);
    }
}
