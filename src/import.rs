//! # Menu Import
//!
//! Reads a spreadsheet export (CSV) of `name, price[, note]` rows. There is no header
//! requirement: any row whose first cell is blank or whose second cell is not a non-negative
//! number is skipped, which also drops a header line if there is one.

use std::io::Read;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ImportError {
    #[error("Spreadsheet could not be read: {0}")]
    Read(String),

    #[error("No valid menu rows found")]
    Empty,
}

/// One importable menu line.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuRow {
    pub name: String,
    pub price: f64,
    pub note: Option<String>,
}

pub fn parse_menu<R: Read>(reader: R) -> Result<Vec<MenuRow>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (line, record) in csv_reader.records().enumerate() {
        let record = record.map_err(|e| ImportError::Read(e.to_string()))?;
        match parse_record(&record) {
            Some(row) => rows.push(row),
            None => debug!(line = line + 1, "Skipping row"),
        }
    }

    if rows.is_empty() {
        return Err(ImportError::Empty);
    }
    Ok(rows)
}

fn parse_record(record: &csv::StringRecord) -> Option<MenuRow> {
    let name = record.get(0).filter(|name| !name.is_empty())?;
    let price: f64 = record.get(1)?.parse().ok()?;
    if !price.is_finite() || price < 0.0 {
        return None;
    }
    let note = record
        .get(2)
        .filter(|note| !note.is_empty())
        .map(str::to_string);

    Some(MenuRow {
        name: name.to_string(),
        price,
        note,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_bad_rows_are_skipped() {
        let data = "name,price,note\nFried Rice, 90 ,no onion\n,50\nSoup,abc\nTea,-5\nBun,15,\n";
        let rows = parse_menu(data.as_bytes()).unwrap();
        assert_eq!(
            rows,
            vec![
                MenuRow {
                    name: "Fried Rice".to_string(),
                    price: 90.0,
                    note: Some("no onion".to_string()),
                },
                MenuRow {
                    name: "Bun".to_string(),
                    price: 15.0,
                    note: None,
                },
            ]
        );
    }

    #[test]
    fn test_fractional_prices_are_kept() {
        let rows = parse_menu("Latte,65.5".as_bytes()).unwrap();
        assert_eq!(rows[0].price, 65.5);
    }

    #[test]
    fn test_nothing_valid_is_an_error() {
        assert_eq!(parse_menu("name,price\n".as_bytes()), Err(ImportError::Empty));
        assert_eq!(parse_menu("".as_bytes()), Err(ImportError::Empty));
    }
}
