//! Etiket verisi oluşturma

use crate::error::{Error, Result};
use crate::format::{format_date, format_price};
use crate::mapping::{FieldMapping, FieldSource, DEFAULT_CURRENCY, DEFAULT_NOTE};
use crate::types::{CanonicalField, CellValue, LabelData, Record};

/// Kayıt ve eşlemeden etiket verisi üretir.
///
/// Eşlemede bulunan her alan çözülür; tarih ve fiyat biçimlendirilir,
/// diğerleri metne çevrilir. Para birimi ve açıklama eşlemede yoksa
/// varsayılanları eklenir. Barkodu boş olan etiket üretilmez.
pub fn assemble(record: &Record, mapping: &FieldMapping) -> Result<LabelData> {
    let mut label = LabelData::default();

    for (field, mapped) in mapping.iter() {
        let raw = match &mapped.source {
            FieldSource::Column(column) => record.get(column).clone(),
            FieldSource::Constant(value) => CellValue::Text(value.clone()),
        };
        label.insert(field, render_value(field, &raw));
    }

    if !mapping.is_mapped(CanonicalField::Currency) {
        label.insert(CanonicalField::Currency, DEFAULT_CURRENCY.to_string());
    }
    if !mapping.is_mapped(CanonicalField::Note) {
        label.insert(CanonicalField::Note, DEFAULT_NOTE.to_string());
    }

    if label.barcode().trim().is_empty() {
        return Err(Error::MissingBarcode);
    }

    Ok(label)
}

fn render_value(field: CanonicalField, raw: &CellValue) -> String {
    match field {
        CanonicalField::Date => format_date(raw),
        CanonicalField::Price => format_price(raw),
        _ => raw.to_string(),
    }
}
