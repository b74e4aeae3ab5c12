//! Weekday counting and month splitting for leave date ranges.
//!
//! Leave is accounted in working days only: Saturdays and Sundays inside a
//! leave range are silently excluded. A range that crosses a month boundary is
//! attributed to every month it touches.

use chrono::{Datelike, NaiveDate, Weekday};

/// The weekdays a date range contributes to one calendar month.
///
/// # Example
///
/// ```
/// use leave_ledger::calculation::MonthSpan;
///
/// let span = MonthSpan { year: 2026, month: 2, weekday_count: 3 };
/// assert_eq!(span.month, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthSpan {
    /// Calendar year of the month.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
    /// Monday-Friday days of the range falling in this month.
    pub weekday_count: u32,
}

/// Returns true for Monday through Friday.
pub fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Splits an inclusive date range into per-month weekday counts.
///
/// Every month the range touches appears once, in chronological order, even
/// when it contributes no weekdays (a weekend at the end of a month, say).
/// A reversed range yields an empty sequence.
///
/// # Example
///
/// ```
/// use leave_ledger::calculation::split_by_month;
/// use chrono::NaiveDate;
///
/// // Thursday 2026-01-29 to Tuesday 2026-02-03
/// let spans = split_by_month(
///     NaiveDate::from_ymd_opt(2026, 1, 29).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 2, 3).unwrap(),
/// );
///
/// assert_eq!(spans.len(), 2);
/// assert_eq!((spans[0].month, spans[0].weekday_count), (1, 2));
/// assert_eq!((spans[1].month, spans[1].weekday_count), (2, 2));
/// ```
pub fn split_by_month(start_date: NaiveDate, end_date: NaiveDate) -> Vec<MonthSpan> {
    let mut spans: Vec<MonthSpan> = Vec::new();

    for date in start_date.iter_days().take_while(|d| *d <= end_date) {
        let weekday = u32::from(is_weekday(date));

        match spans.last_mut() {
            Some(span) if span.year == date.year() && span.month == date.month() => {
                span.weekday_count += weekday;
            }
            _ => spans.push(MonthSpan {
                year: date.year(),
                month: date.month(),
                weekday_count: weekday,
            }),
        }
    }

    spans
}

/// Counts the weekdays in an inclusive date range.
pub fn count_weekdays(start_date: NaiveDate, end_date: NaiveDate) -> u32 {
    split_by_month(start_date, end_date)
        .iter()
        .map(|span| span.weekday_count)
        .sum()
}

/// Intersects an inclusive date range with calendar year `year`.
///
/// Returns `None` when the range lies entirely outside the year.
pub fn clip_to_year(
    start_date: NaiveDate,
    end_date: NaiveDate,
    year: i32,
) -> Option<(NaiveDate, NaiveDate)> {
    let year_start = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let year_end = NaiveDate::from_ymd_opt(year, 12, 31)?;

    let start = start_date.max(year_start);
    let end = end_date.min(year_end);

    (start <= end).then_some((start, end))
}
