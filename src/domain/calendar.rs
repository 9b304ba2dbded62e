//! Calendar arithmetic for the monthly withdrawal window.

use chrono::{Datelike, Duration, NaiveDate};

/// Days from `today` until the 1st of the following calendar month.
///
/// Jumps to the 28th (valid in every month), adds four days to land inside
/// the next month, then snaps back to its 1st. This never overflows a short
/// month and crosses December into January naturally. The result is always
/// at least 1.
#[must_use]
pub fn days_until_first_of_next_month(today: NaiveDate) -> i64 {
    (first_of_next_month(today) - today).num_days()
}

/// The 1st of the month following `today`.
#[must_use]
pub fn first_of_next_month(today: NaiveDate) -> NaiveDate {
    let anchor = today.with_day(28).unwrap_or(today) + Duration::days(4);
    anchor - Duration::days(i64::from(anchor.day()) - 1)
}

/// Whether withdrawals may be opened on `today`.
#[must_use]
pub fn is_withdrawal_day(today: NaiveDate) -> bool {
    today.day() == 1
}
