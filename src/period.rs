use crate::error::{AigError, Result};
use crate::model::DateWindow;
use chrono::{Datelike, Local, NaiveDate};

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_date(input: &str, label: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| {
        AigError::InvalidDate(format!(
            "{label} date '{input}' is malformed, expected YYYY-MM-DD"
        ))
    })
}

/// Half-month reporting window relative to `today`.
///
/// In the first half of a month this is the second half of the previous
/// month; otherwise it is the first half of the current month.
pub fn default_window(today: NaiveDate) -> Result<DateWindow> {
    let out_of_range = || AigError::InvalidDate(format!("no reporting window for {today}"));

    if today.day() <= 15 {
        let last_of_previous = today
            .with_day(1)
            .and_then(|first| first.pred_opt())
            .ok_or_else(out_of_range)?;
        let since = last_of_previous.with_day(16).ok_or_else(out_of_range)?;
        Ok(DateWindow {
            since,
            until: last_of_previous,
        })
    } else {
        let since = today.with_day(1).ok_or_else(out_of_range)?;
        let until = today.with_day(15).ok_or_else(out_of_range)?;
        Ok(DateWindow { since, until })
    }
}

/// Validate the positional dates and fill whichever bound is missing from
/// the default window.
pub fn resolve_window(
    since: Option<&str>,
    until: Option<&str>,
    today: NaiveDate,
) -> Result<DateWindow> {
    let since = since.map(|s| parse_date(s, "start")).transpose()?;
    let until = until.map(|u| parse_date(u, "end")).transpose()?;

    let window = match (since, until) {
        (Some(since), Some(until)) => DateWindow { since, until },
        (since, until) => {
            let fallback = default_window(today)?;
            DateWindow {
                since: since.unwrap_or(fallback.since),
                until: until.unwrap_or(fallback.until),
            }
        }
    };

    if window.since > window.until {
        return Err(AigError::InvalidDate(format!(
            "Invalid range: since ({}) is after until ({})",
            window.since, window.until
        )));
    }

    Ok(window)
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
