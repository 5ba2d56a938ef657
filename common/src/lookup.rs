//! Barkod ile kayıt arama

use crate::error::{Error, Result};
use crate::mapping::FieldMapping;
use crate::types::{CanonicalField, Dataset, Record};
use tracing::debug;

/// Elle girilen ya da okuyucudan gelen barkodu temizler.
/// Boş veya yalnızca boşluk içeren girdi reddedilir.
pub fn normalize_barcode_input(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidBarcodeInput);
    }
    Ok(trimmed.to_string())
}

/// Barkodu eşleşen ilk kaydın sırası
pub fn position_by_barcode(dataset: &Dataset, mapping: &FieldMapping, barcode: &str) -> Result<usize> {
    let wanted = normalize_barcode_input(barcode)?;
    let column = mapping
        .column(CanonicalField::Barcode)
        .ok_or(Error::MappingIncomplete)?;

    let found = dataset
        .records()
        .iter()
        .position(|record| record.get(column).to_string().trim() == wanted);

    match found {
        Some(index) => {
            debug!(barcode = %wanted, index, "barkod bulundu");
            Ok(index)
        }
        None => {
            debug!(barcode = %wanted, rows = dataset.len(), "barkod bulunamadı");
            Err(Error::NotFound(wanted))
        }
    }
}

/// Barkodu eşleşen ilk kayıt. Aynı barkodlu satırlarda dosyadaki ilk satır kazanır.
pub fn find_by_barcode<'a>(dataset: &'a Dataset, mapping: &FieldMapping, barcode: &str) -> Result<&'a Record> {
    let index = position_by_barcode(dataset, mapping, barcode)?;
    dataset.get(index).ok_or_else(|| Error::NotFound(barcode.trim().to_string()))
}
