//! Shared formatting utilities for currency, dates, and financial-year
//! labels, tuned to Australian conventions (AUD, day-first dates, FY labelled
//! by its ending calendar year).

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// Policy for formatting values in reports.
#[derive(Debug, Clone)]
pub struct FormattingPolicy {
    /// Currency symbol (default: $)
    pub currency_symbol: char,
    /// Date format string (default: %d/%m/%Y)
    pub date_format: String,
    /// Use thousands separators in currency (default: true)
    pub use_thousands_separator: bool,
}

impl FormattingPolicy {
    /// Create a new formatting policy with Australian defaults.
    pub fn au() -> Self {
        Self {
            currency_symbol: '$',
            date_format: "%d/%m/%Y".to_string(),
            use_thousands_separator: true,
        }
    }
}

impl Default for FormattingPolicy {
    fn default() -> Self {
        Self::au()
    }
}

/// Currency formatter with configurable rounding.
#[derive(Debug, Clone)]
pub struct CurrencyFormatter {
    #[allow(dead_code)] // Reserved for future locale-specific formatting
    policy: FormattingPolicy,
}

impl CurrencyFormatter {
    /// Create a new currency formatter with Australian defaults.
    pub fn au() -> Self {
        Self {
            policy: FormattingPolicy::au(),
        }
    }

    /// Format a decimal value as AUD currency.
    pub fn format_decimal(&self, value: Decimal) -> String {
        format_currency(value)
    }
}

impl Default for CurrencyFormatter {
    fn default() -> Self {
        Self::au()
    }
}

/// Format a decimal value as currency with thousands separators, rounded to
/// two decimal places.
///
/// # Examples
/// ```
/// use rust_decimal::Decimal;
/// use cgt_format::format_currency;
///
/// assert_eq!(format_currency(Decimal::from(1234)), "$1,234.00");
/// assert_eq!(format_currency(Decimal::from(-100)), "-$100.00");
/// ```
pub fn format_currency(value: Decimal) -> String {
    format_currency_with_minor_units(value, '$', 2)
}

/// Format a decimal value as currency using the provided symbol and minor units.
pub fn format_currency_with_minor_units(value: Decimal, symbol: char, minor_units: u32) -> String {
    let rounded = value.round_dp_with_strategy(minor_units, RoundingStrategy::MidpointAwayFromZero);
    let abs_str = format_decimal_fixed(rounded.abs(), minor_units);
    let mut parts = abs_str.split('.');
    let integer_part = parts.next().unwrap_or("0");
    let fractional_part = parts.next();
    let formatted_int = format_with_commas_str(integer_part);

    let formatted = if let Some(frac) = fractional_part {
        format!("{formatted_int}.{frac}")
    } else {
        formatted_int
    };

    if rounded.is_sign_negative() {
        format!("-{symbol}{formatted}")
    } else {
        format!("{symbol}{formatted}")
    }
}

/// Add thousands separators to an integer string.
fn format_with_commas_str(integer_part: &str) -> String {
    let chars: Vec<char> = integer_part.chars().collect();
    let mut result = String::with_capacity(chars.len() + chars.len() / 3);
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i).is_multiple_of(3) {
            result.push(',');
        }
        result.push(*c);
    }
    result
}

/// Format a decimal value to a fixed number of fractional digits.
pub fn format_decimal_fixed(value: Decimal, precision: u32) -> String {
    let rounded = value.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.precision$}", precision = precision as usize)
}

/// Format a decimal value, removing trailing zeros after the decimal point.
///
/// # Examples
/// ```
/// use rust_decimal::Decimal;
/// use cgt_format::format_decimal;
///
/// assert_eq!(format_decimal(Decimal::new(1234, 1)), "123.4");
/// assert_eq!(format_decimal(Decimal::new(12300, 2)), "123");
/// ```
pub fn format_decimal(value: Decimal) -> String {
    let s = value.to_string();
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

/// Format a date as DD/MM/YYYY.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use cgt_format::format_date;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// assert_eq!(format_date(date), "15/03/2024");
/// ```
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Format an Australian financial year (labelled by its ending calendar
/// year) as "FY2024".
///
/// # Examples
/// ```
/// use cgt_format::format_financial_year;
///
/// assert_eq!(format_financial_year(2024), "FY2024");
/// ```
pub fn format_financial_year(end_year: u16) -> String {
    format!("FY{end_year}")
}
