//! Australian financial year arithmetic.
//!
//! The Australian FY runs 1 July to 30 June and is labelled by its ending
//! calendar year, e.g. 1 July 2023 - 30 June 2024 is "FY2024".

use chrono::{Datelike, NaiveDate};

/// The FY label (ending calendar year) containing `date`.
pub fn fy_for_date(date: NaiveDate) -> u16 {
    let year = date.year() as u16;
    if date.month() >= 7 { year + 1 } else { year }
}

/// Whether a disposal on `sell_date` of a parcel bought on `buy_date` qualifies
/// for the CGT discount (held strictly more than 365 days).
pub fn is_long_term(buy_date: NaiveDate, sell_date: NaiveDate) -> bool {
    (sell_date - buy_date).num_days() > 365
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fy_before_july_is_same_calendar_year() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 30).expect("valid date");
        assert_eq!(fy_for_date(date), 2024);
    }

    #[test]
    fn fy_on_or_after_july_is_next_calendar_year() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 1).expect("valid date");
        assert_eq!(fy_for_date(date), 2025);
    }

    #[test]
    fn boundary_365_days_is_short_term() {
        let buy = NaiveDate::from_ymd_opt(2023, 1, 1).expect("valid date");
        let sell = buy + chrono::Days::new(365);
        assert!(!is_long_term(buy, sell));
    }

    #[test]
    fn boundary_366_days_is_long_term() {
        let buy = NaiveDate::from_ymd_opt(2023, 1, 1).expect("valid date");
        let sell = buy + chrono::Days::new(366);
        assert!(is_long_term(buy, sell));
    }
}
