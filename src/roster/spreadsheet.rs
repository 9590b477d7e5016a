//! Excel and OpenDocument rosters
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};

use super::headers::ColumnMap;
use super::{Cell, Table};
use crate::error::SourceError;

/// Read the first worksheet of a workbook
///
/// The header is the first row that names all the required columns, so
/// title rows above it are skipped. Without such a row the first used row
/// is taken and the column lookup reports what is missing.
pub fn read_table(path: &Path) -> Result<Table, SourceError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| workbook_error(path, e))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SourceError::Empty(path.to_path_buf()))?
        .map_err(|e| workbook_error(path, e))?;

    let mut sheet_rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(header_text).collect())
        .collect();
    if sheet_rows.is_empty() {
        return Err(SourceError::Empty(path.to_path_buf()));
    }

    let header_index = sheet_rows
        .iter()
        .position(|row| ColumnMap::from_headers(row.as_slice()).is_ok())
        .unwrap_or(0);

    // The range starts at the first used cell, not at A1
    let range_top = range.start().map_or(0, |(row, _)| row as usize);

    let rows: Vec<Vec<Cell>> = range
        .rows()
        .skip(header_index + 1)
        .map(|row| row.iter().map(to_cell).collect::<Vec<_>>())
        .collect();

    Ok(Table {
        headers: sheet_rows.swap_remove(header_index),
        rows,
        first_row: range_top + header_index + 2,
    })
}

fn workbook_error(path: &Path, error: calamine::Error) -> SourceError {
    match error {
        calamine::Error::Io(source) => SourceError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => SourceError::Malformed {
            path: path.to_path_buf(),
            reason: other.to_string(),
        },
    }
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

/// Keep the cell kind so dates and serials survive into the record
fn to_cell(cell: &Data) -> Cell {
    match cell {
        Data::Empty => Cell::Empty,
        Data::String(s) if s.trim().is_empty() => Cell::Empty,
        Data::String(s) => Cell::Text(s.trim().to_string()),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) => Cell::Date(datetime.date()),
            None => Cell::Number(dt.as_f64()),
        },
        other => Cell::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn fixture(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name)
    }

    #[test]
    fn test_read_table_keeps_cell_kinds() {
        let table = read_table(&fixture("roster.xlsx")).unwrap();

        assert_eq!(table.headers, vec!["Name", "Email", "DOB", "Department"]);
        assert_eq!(table.first_row, 2);
        assert_eq!(table.rows.len(), 3);
        assert_eq!(
            table.rows[0][2],
            Cell::Date(NaiveDate::from_ymd_opt(1990, 3, 15).unwrap())
        );
        assert_eq!(table.rows[1][2], Cell::Number(37330.0));
        assert_eq!(table.rows[2][2], Cell::Text("07/04/1985".to_string()));
    }

    #[test]
    fn test_read_table_skips_title_rows() {
        let table = read_table(&fixture("roster_titled.xlsx")).unwrap();

        assert_eq!(table.headers, vec![" Name ", "E-mail", "Date of Birth"]);
        assert_eq!(table.first_row, 4);
        assert_eq!(table.rows[0][0], Cell::Text("Ana".to_string()));
    }

    #[test]
    fn test_read_table_header_below_blank_rows() {
        let table = read_table(&fixture("roster_offset.xlsx")).unwrap();

        assert_eq!(table.headers[2], "Date of Birth");
        assert_eq!(table.first_row, 4);
    }

    #[test]
    fn test_to_cell_kinds() {
        assert_eq!(to_cell(&Data::Empty), Cell::Empty);
        assert_eq!(to_cell(&Data::String("   ".to_string())), Cell::Empty);
        assert_eq!(
            to_cell(&Data::String(" Ana ".to_string())),
            Cell::Text("Ana".to_string())
        );
        assert_eq!(to_cell(&Data::Int(32947)), Cell::Number(32947.0));
        assert_eq!(to_cell(&Data::Float(32947.5)), Cell::Number(32947.5));
        assert_eq!(
            to_cell(&Data::DateTimeIso("1990-03-15".to_string())),
            Cell::Text("1990-03-15".to_string())
        );
    }

    #[test]
    fn test_header_text() {
        assert_eq!(header_text(&Data::String(" DOB ".to_string())), " DOB ");
        assert_eq!(header_text(&Data::Empty), "");
    }

    #[test]
    fn test_read_table_not_a_workbook() {
        let path = std::env::temp_dir().join(format!(
            "birthday_mailer_{}_garbage.xlsx",
            std::process::id()
        ));
        std::fs::write(&path, b"this is not a zip archive").unwrap();

        let result = read_table(&path);
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(SourceError::Malformed { .. })));
    }
}
