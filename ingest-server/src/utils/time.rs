//! Business-timezone date helpers
//!
//! Sale IDs, lead dates, and pickup scheduling are all defined in terms of
//! the business local date, never UTC. Repositories only see formatted
//! strings or `i64` millis.

use chrono::{Duration, NaiveDate, Utc};
use chrono_tz::Tz;

/// Today's date in the business timezone
pub fn local_today(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

/// Yesterday's date in the business timezone
pub fn local_yesterday(tz: Tz) -> NaiveDate {
    local_today(tz) - Duration::days(1)
}

/// Format a date as YYYY-MM-DD
pub fn format_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Format a date as the compact YYMMDD identifier stamp
pub fn format_compact(date: NaiveDate) -> String {
    date.format("%y%m%d").to_string()
}
