//! Record field validation

use std::fmt;

/// Why a record was left out of matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingName,
    InvalidEmail(String),
    MissingBirthDate,
    UnparseableBirthDate(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingName => write!(f, "name is blank"),
            SkipReason::InvalidEmail(email) if email.is_empty() => write!(f, "email is blank"),
            SkipReason::InvalidEmail(email) => write!(f, "email {:?} is not a valid address", email),
            SkipReason::MissingBirthDate => write!(f, "birth date is blank"),
            SkipReason::UnparseableBirthDate(raw) => {
                write!(f, "birth date {:?} could not be parsed", raw)
            }
        }
    }
}

/// Check that an address looks like `local@domain.tld`
///
/// This is a plausibility check only; the transport does the strict parse.
pub fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    // Domain needs at least two non-empty labels
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}
