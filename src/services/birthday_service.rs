//! Birthday matching - picks the roster entries whose birthday is today
use chrono::NaiveDate;
use tracing::debug;

use crate::models::{BirthDate, MatchDay, Record};
use crate::utils::datetime::resolve_birth_date;
use crate::utils::string_utils::is_empty_or_whitespace;
use crate::utils::validation::{SkipReason, is_plausible_email};

/// Check a record and resolve its birth date, or say why it is skipped
pub fn check_record(record: &Record) -> Result<NaiveDate, SkipReason> {
    if is_empty_or_whitespace(&record.name) {
        return Err(SkipReason::MissingName);
    }

    if !is_plausible_email(&record.email) {
        return Err(SkipReason::InvalidEmail(record.email.clone()));
    }

    match &record.birth_date {
        BirthDate::Missing => Err(SkipReason::MissingBirthDate),
        other => resolve_birth_date(other).ok_or_else(|| {
            SkipReason::UnparseableBirthDate(match other {
                BirthDate::Text(text) => text.clone(),
                BirthDate::Serial(serial) => serial.to_string(),
                BirthDate::Date(date) => date.to_string(),
                BirthDate::Missing => String::new(),
            })
        }),
    }
}

/// Records whose birthday falls on `today`, in roster order
///
/// Malformed records are skipped with a debug line. February 29 birthdays
/// only match when `today` is February 29.
pub fn todays_birthdays(records: &[Record], today: MatchDay) -> Vec<Record> {
    records
        .iter()
        .filter(|record| match check_record(record) {
            Ok(birth_date) => today.matches(birth_date),
            Err(reason) => {
                debug!("Skipping row {}: {}", record.row, reason);
                false
            }
        })
        .cloned()
        .collect()
}
