//! Date menu generation for the booking dialog.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// One entry of the date menu: the calendar date plus its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateOption {
    pub date: NaiveDate,
    pub label: String,
}

/// Builds the 1-indexed menu of the next seven days starting at `today`.
///
/// The first two days carry relative names ("Today", "Tomorrow"); the rest
/// use the weekday abbreviation. Labels look like `Today - Mar 1` or
/// `Thu - Mar 4`.
pub fn next_seven_days(today: NaiveDate) -> Vec<DateOption> {
    (0..7)
        .map(|offset| {
            let date = today + Duration::days(offset);
            let day_name = match offset {
                0 => "Today".to_string(),
                1 => "Tomorrow".to_string(),
                _ => date.format("%a").to_string(),
            };
            DateOption {
                date,
                label: format!("{} - {}", day_name, date.format("%b %-d")),
            }
        })
        .collect()
}
