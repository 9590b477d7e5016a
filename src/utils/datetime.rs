//! Pure date utility functions
use chrono::{Days, NaiveDate};

use crate::models::BirthDate;

/// Text layouts accepted for birth dates, tried in order
///
/// Slash and dash dates with the year last are month-first.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%m.%d.%Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
];

/// Serial 60 is the 1900-02-29 that Excel counts but never existed
const PHANTOM_LEAP_SERIAL: f64 = 60.0;

/// Largest serial a spreadsheet can hold (9999-12-31)
const MAX_SERIAL: f64 = 2_958_465.0;

/// Resolve a roster birth date to a calendar date, if it can be parsed
pub fn resolve_birth_date(value: &BirthDate) -> Option<NaiveDate> {
    match value {
        BirthDate::Date(date) => Some(*date),
        BirthDate::Serial(serial) => from_serial(*serial),
        BirthDate::Text(text) => parse_birth_date(text),
        BirthDate::Missing => None,
    }
}

/// Parse a textual birth date in any of the accepted layouts
///
/// Purely numeric text is read as a spreadsheet serial, except a bare
/// four-digit year, which names no day. A trailing time of day
/// (`1990-03-15 00:00:00`, `1990-03-15T08:30:00`) is ignored.
pub fn parse_birth_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() || is_year_only(text) {
        return None;
    }

    if let Ok(serial) = text.parse::<f64>() {
        return from_serial(serial);
    }

    if let Some(date) = parse_with_formats(text) {
        return Some(date);
    }

    // Retry on the date part of a date-time
    text.split(['T', ' '])
        .next()
        .filter(|head| head.len() < text.len())
        .and_then(parse_with_formats)
}

fn is_year_only(text: &str) -> bool {
    text.len() == 4 && text.bytes().all(|b| b.is_ascii_digit())
}

fn parse_with_formats(text: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}

/// Convert a spreadsheet serial date (1900 date system) to a calendar date
///
/// The fractional part is a time of day and is dropped.
pub fn from_serial(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 || serial > MAX_SERIAL {
        return None;
    }

    let whole = serial.trunc();
    if whole == PHANTOM_LEAP_SERIAL {
        return None;
    }

    // Serials before the phantom day count from 1899-12-31, later ones
    // from 1899-12-30 to absorb it
    let (epoch, days) = if whole < PHANTOM_LEAP_SERIAL {
        (NaiveDate::from_ymd_opt(1899, 12, 31)?, whole as u64)
    } else {
        (NaiveDate::from_ymd_opt(1899, 12, 30)?, whole as u64)
    };

    epoch.checked_add_days(Days::new(days))
}

/// Format a date as "Day MonthName" (e.g., "15 March")
pub fn format_date_display(month: u32, day: u32) -> String {
    let month_name = get_month_name(month);
    format!("{} {}", day, month_name)
}

/// Get month name from month number (1-12)
pub fn get_month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}
