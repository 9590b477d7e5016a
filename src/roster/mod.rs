/// Roster loading, organized by file format
mod delimited;
mod headers;
mod spreadsheet;

use std::path::Path;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::SourceError;
use crate::models::{BirthDate, Record};
use headers::ColumnMap;

/// Raw cell value before it is mapped onto a record field
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl Cell {
    fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    fn to_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(text) => text.trim().to_string(),
            Cell::Number(number) => number.to_string(),
            Cell::Date(date) => date.to_string(),
        }
    }

    fn to_birth_date(&self) -> BirthDate {
        match self {
            Cell::Empty => BirthDate::Missing,
            Cell::Text(text) if text.trim().is_empty() => BirthDate::Missing,
            Cell::Text(text) => BirthDate::Text(text.trim().to_string()),
            Cell::Number(number) => BirthDate::Serial(*number),
            Cell::Date(date) => BirthDate::Date(*date),
        }
    }
}

/// Header row plus data rows as read from a file
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
    /// 1-based sheet row of `rows[0]`
    pub first_row: usize,
}

/// File formats the roster can be read from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RosterFormat {
    Spreadsheet,
    Csv,
    Tsv,
}

impl RosterFormat {
    /// Pick the format from the file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(Self::Spreadsheet),
            "csv" => Some(Self::Csv),
            "tsv" => Some(Self::Tsv),
            _ => None,
        }
    }
}

/// Load every roster row from `path`
///
/// Rows with bad data are still returned, with blank fields or an
/// unparsed birth date, so that one bad row never fails the load.
pub fn load(path: &Path) -> Result<Vec<Record>, SourceError> {
    if !path.is_file() {
        return Err(SourceError::NotFound(path.to_path_buf()));
    }

    let format = RosterFormat::from_path(path)
        .ok_or_else(|| SourceError::UnsupportedFormat(path.to_path_buf()))?;

    let table = match format {
        RosterFormat::Spreadsheet => spreadsheet::read_table(path)?,
        RosterFormat::Csv => delimited::read_table(path, b',')?,
        RosterFormat::Tsv => delimited::read_table(path, b'\t')?,
    };

    info!("Columns in the roster file: {:?}", table.headers);

    records_from_table(path, table)
}

/// Map table rows onto records through the header alias table
pub fn records_from_table(path: &Path, table: Table) -> Result<Vec<Record>, SourceError> {
    if table.headers.is_empty() {
        return Err(SourceError::Empty(path.to_path_buf()));
    }

    let columns = ColumnMap::from_headers(&table.headers)?;
    let blank = Cell::Empty;

    let records: Vec<Record> = table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| !row.iter().all(Cell::is_empty))
        .map(|(index, row)| {
            let cell = |column: usize| row.get(column).unwrap_or(&blank);
            Record {
                row: table.first_row + index,
                name: cell(columns.name).to_text(),
                email: cell(columns.email).to_text(),
                birth_date: cell(columns.birth_date).to_birth_date(),
            }
        })
        .collect();

    debug!("Loaded {} record(s) from {}", records.len(), path.display());
    Ok(records)
}
