//! Business-day date index.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// `n` consecutive weekdays starting at `start`.
///
/// A weekend `start` rolls forward to the following Monday. No holiday
/// calendar is applied.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use volviz_models::calendar::business_days;
///
/// // 2024-01-05 is a Friday
/// let start = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
/// let days = business_days(start, 2);
/// assert_eq!(days[1], NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
/// ```
pub fn business_days(start: NaiveDate, n: usize) -> Vec<NaiveDate> {
    let mut days = Vec::with_capacity(n);
    let mut current = start;
    while days.len() < n {
        if is_business_day(current) {
            days.push(current);
        }
        current += Duration::days(1);
    }
    days
}

fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
