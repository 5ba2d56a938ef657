use super::build_dataset;
use crate::error::Result;
use csv::ReaderBuilder;
use etiket_common::{CellValue, Dataset, Error as CoreError};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// CSV okur. Ayırıcı ilk satırdan seçilir (Türkçe Excel `;` kullanır).
pub(super) fn read_bytes(bytes: &[u8]) -> Result<Dataset> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(CoreError::ImportEmpty.into());
    }

    let mut reader = ReaderBuilder::new()
        .delimiter(detect_delimiter(bytes))
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let header: Vec<String> = reader
        .byte_headers()
        .map_err(unparsable)?
        .iter()
        .map(|h| String::from_utf8_lossy(h).to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.byte_records() {
        let record = record.map_err(unparsable)?;
        rows.push(record.iter().map(cell_value).collect());
    }

    build_dataset(header, rows)
}

fn detect_delimiter(bytes: &[u8]) -> u8 {
    let first_line = bytes.split(|&b| b == b'\n').next().unwrap_or_default();
    [b';', b'\t', b',']
        .into_iter()
        .max_by_key(|d| first_line.iter().filter(|&b| b == d).count())
        .filter(|d| first_line.contains(d))
        .unwrap_or(b',')
}

fn cell_value(raw: &[u8]) -> CellValue {
    let text = String::from_utf8_lossy(raw);
    if text.trim().is_empty() {
        CellValue::Empty
    } else {
        CellValue::Text(text.to_string())
    }
}

fn unparsable(e: csv::Error) -> CoreError {
    CoreError::ImportUnparsable(e.to_string())
}
