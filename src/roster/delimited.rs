//! Comma and tab separated rosters
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::warn;

use super::{Cell, Table};
use crate::error::SourceError;

/// Read a delimited file into a table of text cells
pub fn read_table(path: &Path, delimiter: u8) -> Result<Table, SourceError> {
    let file = File::open(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    read_from(file, delimiter).map_err(|e| SourceError::Malformed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Parse delimited text from any reader; the first record is the header row
///
/// Only the header row must be valid UTF-8. Data fields with bad bytes are
/// decoded lossily so one mis-encoded row never loses the others.
pub fn read_from<R: Read>(reader: R, delimiter: u8) -> Result<Table, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows: Vec<Vec<Cell>> = Vec::new();
    for record in reader.byte_records() {
        let record = record?;
        if std::str::from_utf8(record.as_slice()).is_err() {
            let line = record.position().map_or(0, |p| p.line());
            warn!("Line {} is not valid UTF-8; unreadable characters were replaced", line);
        }
        rows.push(record.iter().map(text_cell).collect());
    }

    Ok(Table {
        headers,
        rows,
        first_row: 2,
    })
}

fn text_cell(value: &[u8]) -> Cell {
    let value = String::from_utf8_lossy(value);
    let value = value.trim();
    if value.is_empty() {
        Cell::Empty
    } else {
        Cell::Text(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_from_csv() {
        let data = "Name,Email,DOB\nAna, ana@x.com ,1990-03-15\nBo,bo@x.com,\n";
        let table = read_from(data.as_bytes(), b',').unwrap();

        assert_eq!(table.headers, vec!["Name", "Email", "DOB"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][1], Cell::Text("ana@x.com".to_string()));
        assert_eq!(table.rows[1][2], Cell::Empty);
    }

    #[test]
    fn test_read_from_tsv() {
        let data = "Name\tEmail\tDate of Birth\nAna\tana@x.com\t03/15/2001\n";
        let table = read_from(data.as_bytes(), b'\t').unwrap();

        assert_eq!(table.headers, vec!["Name", "Email", "Date of Birth"]);
        assert_eq!(table.rows[0][2], Cell::Text("03/15/2001".to_string()));
    }

    #[test]
    fn test_read_from_short_rows() {
        let data = "Name,Email,DOB\nAna\n";
        let table = read_from(data.as_bytes(), b',').unwrap();
        assert_eq!(table.rows[0], vec![Cell::Text("Ana".to_string())]);
    }

    #[test]
    fn test_read_from_invalid_utf8_header() {
        let data: &[u8] = &[b'N', b',', 0xff, 0xfe, b'\n', b'a', b',', b'b', b'\n'];
        assert!(read_from(data, b',').is_err());
    }

    #[test]
    fn test_read_from_keeps_rows_around_badly_encoded_row() {
        // "Jos\xe9" is cp1252, as Excel writes it
        let data: &[u8] = b"Name,Email,DOB\n\
            Ana,ana@x.com,1990-03-15\n\
            Jos\xe9,jose@x.com,1991-04-01\n\
            Bo,bo@x.com,03/15/2001\n";
        let table = read_from(data, b',').unwrap();

        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[0][0], Cell::Text("Ana".to_string()));
        assert_eq!(table.rows[1][0], Cell::Text("Jos\u{fffd}".to_string()));
        assert_eq!(table.rows[1][1], Cell::Text("jose@x.com".to_string()));
        assert_eq!(table.rows[2][2], Cell::Text("03/15/2001".to_string()));
    }
}
