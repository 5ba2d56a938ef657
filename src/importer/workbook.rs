use super::build_dataset;
use crate::error::Result;
use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use etiket_common::{CellValue, Dataset, Error as CoreError};
use std::io::{Cursor, Read, Seek};
use std::path::Path;

pub(super) fn read_path(path: &Path) -> Result<Dataset> {
    let mut workbook = open_workbook_auto(path).map_err(unparsable)?;
    first_sheet(&mut workbook)
}

pub(super) fn read_bytes(bytes: Vec<u8>) -> Result<Dataset> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(unparsable)?;
    first_sheet(&mut workbook)
}

fn first_sheet<RS: Read + Seek>(workbook: &mut Sheets<RS>) -> Result<Dataset> {
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(CoreError::ImportEmpty)?;

    let range = workbook.worksheet_range(&sheet_name).map_err(unparsable)?;
    range_to_dataset(&range)
}

fn range_to_dataset(range: &Range<Data>) -> Result<Dataset> {
    let mut rows = range.rows();
    let header: Vec<String> = rows
        .next()
        .ok_or(CoreError::ImportEmpty)?
        .iter()
        .map(|cell| cell.to_string())
        .collect();

    let body = rows
        .map(|row| row.iter().map(cell_value).collect())
        .collect();

    build_dataset(header, body)
}

/// Sayı ve tarih hücreleri sayı olarak kalır (tarih seri numarası)
fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            if s.trim().is_empty() {
                CellValue::Empty
            } else {
                CellValue::Text(s.clone())
            }
        }
    }
}

fn unparsable(e: impl std::fmt::Display) -> CoreError {
    CoreError::ImportUnparsable(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_value() {
        assert_eq!(cell_value(&Data::Empty), CellValue::Empty);
        assert_eq!(cell_value(&Data::Int(42)), CellValue::Number(42.0));
        assert_eq!(cell_value(&Data::Float(1.5)), CellValue::Number(1.5));
        assert_eq!(cell_value(&Data::Bool(true)), CellValue::from("true"));
        assert_eq!(cell_value(&Data::String("M".into())), CellValue::from("M"));
        assert_eq!(cell_value(&Data::String("  ".into())), CellValue::Empty);
    }

    #[test]
    fn test_garbage_bytes_unparsable() {
        let err = read_bytes(b"bu bir excel dosyasi degil".to_vec()).unwrap_err();
        assert!(matches!(
            err,
            crate::error::EtiketError::Common(CoreError::ImportUnparsable(_))
        ));
    }
}
