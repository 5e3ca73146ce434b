use thiserror::Error;

#[derive(Error, Debug)]
pub enum CgtError {
    #[error("missing required column(s): {0}")]
    ValidationError(String),

    #[error("short selling detected for FY {fy} in symbol(s): {}", .symbols.join(", "))]
    ShortSellDetected { fy: u16, symbols: Vec<String> },

    #[error("LP solve failed for {symbol}: {status} ({message})")]
    LpFailed {
        symbol: String,
        status: String,
        message: String,
    },

    #[error(
        "inconsistent lot accounting: buy {buy_id} requested {requested} but only {available} available"
    )]
    Inconsistency {
        buy_id: u64,
        requested: f64,
        available: f64,
    },

    #[error("invalid date '{raw}'")]
    InvalidDate { raw: String },

    #[error("invalid {field} '{raw}'")]
    InvalidQuantity { raw: String, field: &'static str },

    #[error("invalid side '{raw}' (expected BUY or SELL)")]
    InvalidSide { raw: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
