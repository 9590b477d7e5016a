//! Column header normalization
use crate::error::SourceError;
use crate::utils::string_utils::normalize_header;

/// Roster fields the job reads
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    BirthDate,
}

impl Field {
    /// Canonical column name, used in error messages
    pub fn column_name(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::BirthDate => "birth_date",
        }
    }
}

/// Accepted header spellings, compared after `normalize_header`
const HEADER_ALIASES: &[(&str, Field)] = &[
    ("name", Field::Name),
    ("full name", Field::Name),
    ("employee name", Field::Name),
    ("email", Field::Email),
    ("e-mail", Field::Email),
    ("email address", Field::Email),
    ("e-mail address", Field::Email),
    ("mail", Field::Email),
    ("date of birth", Field::BirthDate),
    ("dob", Field::BirthDate),
    ("birth date", Field::BirthDate),
    ("birthdate", Field::BirthDate),
    ("birth_date", Field::BirthDate),
    ("birthday", Field::BirthDate),
];

/// Map a raw header to the field it names, if any
pub fn canonical_field(header: &str) -> Option<Field> {
    let normalized = normalize_header(header);
    HEADER_ALIASES
        .iter()
        .find(|(alias, _)| *alias == normalized)
        .map(|(_, field)| *field)
}

/// Column index of each field in a table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnMap {
    pub name: usize,
    pub email: usize,
    pub birth_date: usize,
}

impl ColumnMap {
    /// Locate every field in a header row; the first matching column wins
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> Result<Self, SourceError> {
        let find = |field: Field| {
            headers
                .iter()
                .position(|header| canonical_field(header.as_ref()) == Some(field))
                .ok_or(SourceError::MissingColumn(field.column_name()))
        };

        Ok(Self {
            name: find(Field::Name)?,
            email: find(Field::Email)?,
            birth_date: find(Field::BirthDate)?,
        })
    }
}
