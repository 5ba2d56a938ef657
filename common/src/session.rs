//! Oturum nesnesi
//!
//! İçe aktarılan tablo ve eşleme birlikte tutulur ve her yeni içe
//! aktarmada birlikte değiştirilir. Son başarılı etiket `current` olarak saklanır.

use crate::assemble::assemble;
use crate::error::{Error, Result};
use crate::lookup::{normalize_barcode_input, position_by_barcode};
use crate::mapping::{build_mapping, FieldMapping, MappingRules};
use crate::types::{CanonicalField, Dataset, LabelData, Record, TableRow};
use serde::Serialize;
use tracing::info;

/// İçe aktarma özeti
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub row_count: usize,
    pub headers: Vec<String>,
    pub unresolved: Vec<CanonicalField>,
}

#[derive(Debug, Clone)]
struct Loaded {
    dataset: Dataset,
    mapping: FieldMapping,
}

#[derive(Debug, Clone, Default)]
pub struct LabelSession {
    rules: MappingRules,
    loaded: Option<Loaded>,
    current: Option<LabelData>,
}

impl LabelSession {
    pub fn new(rules: MappingRules) -> Self {
        Self {
            rules,
            loaded: None,
            current: None,
        }
    }

    /// Yeni tabloyu yükler. Boş tablo reddedilir ve önceki veri korunur.
    pub fn import(&mut self, dataset: Dataset) -> Result<ImportSummary> {
        if dataset.is_empty() {
            return Err(Error::ImportEmpty);
        }

        let mapping = build_mapping(dataset.columns(), &self.rules);
        let summary = ImportSummary {
            row_count: dataset.len(),
            headers: dataset.columns().to_vec(),
            unresolved: mapping.unresolved(),
        };
        info!(rows = summary.row_count, columns = summary.headers.len(), "veri yüklendi");

        self.loaded = Some(Loaded { dataset, mapping });
        self.current = None;
        Ok(summary)
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.loaded.as_ref().map(|l| &l.dataset)
    }

    pub fn mapping(&self) -> Option<&FieldMapping> {
        self.loaded.as_ref().map(|l| &l.mapping)
    }

    pub fn rules(&self) -> &MappingRules {
        &self.rules
    }

    /// Barkodla arar ve etiket verisini oluşturur.
    /// Girdi, veri yüklü olup olmadığından önce doğrulanır.
    pub fn lookup(&mut self, input: &str) -> Result<&LabelData> {
        let barcode = normalize_barcode_input(input)?;
        let loaded = self.loaded.as_ref().ok_or(Error::NoDataset)?;

        let index = position_by_barcode(&loaded.dataset, &loaded.mapping, &barcode)?;
        self.select_row(index)
    }

    /// Tablodan seçilen satırın etiketini oluşturur
    pub fn select_row(&mut self, index: usize) -> Result<&LabelData> {
        let loaded = self.loaded.as_ref().ok_or(Error::NoDataset)?;
        let record = loaded.dataset.get(index).ok_or(Error::RowOutOfRange {
            index,
            len: loaded.dataset.len(),
        })?;

        let label = assemble(record, &loaded.mapping)?;
        Ok(self.current.insert(label))
    }

    /// Barkodu eşleşen satırın sırası (tabloda vurgulamak için)
    pub fn position_of(&self, input: &str) -> Result<usize> {
        let barcode = normalize_barcode_input(input)?;
        let loaded = self.loaded.as_ref().ok_or(Error::NoDataset)?;
        position_by_barcode(&loaded.dataset, &loaded.mapping, &barcode)
    }

    pub fn current(&self) -> Option<&LabelData> {
        self.current.as_ref()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Ürün tablosu satırları: barkod, marka, renk, beden
    pub fn rows(&self) -> Vec<TableRow> {
        let Some(loaded) = self.loaded.as_ref() else {
            return Vec::new();
        };

        let cell = |record: &Record, field: CanonicalField| {
            loaded
                .mapping
                .column(field)
                .map(|column| record.get(column).to_string())
                .unwrap_or_default()
        };

        loaded
            .dataset
            .records()
            .iter()
            .enumerate()
            .map(|(index, record)| TableRow {
                index,
                barcode: cell(record, CanonicalField::Barcode),
                brand: cell(record, CanonicalField::Brand),
                color: cell(record, CanonicalField::Color),
                size: cell(record, CanonicalField::Size),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CellValue;

    fn scenario_dataset() -> Dataset {
        Dataset::from_rows(
            vec!["Barcode - EAN".into(), "Product code".into(), "Size".into()],
            vec![vec![
                CellValue::from("1234567890123"),
                CellValue::from("A1"),
                CellValue::from("M"),
            ]],
        )
    }

    #[test]
    fn test_scenario_end_to_end() {
        let mut session = LabelSession::default();
        let summary = session.import(scenario_dataset()).unwrap();
        assert_eq!(summary.row_count, 1);
        assert!(summary.unresolved.contains(&CanonicalField::Brand));

        let label = session.lookup("1234567890123").unwrap().clone();
        assert_eq!(label.barcode(), "1234567890123");
        assert_eq!(label.get(CanonicalField::Size), "M");
        assert_eq!(label.get(CanonicalField::ProductCode), "A1");
        assert_eq!(label.get(CanonicalField::Currency), "TL");
        assert_eq!(label.get(CanonicalField::Note), "KDV DAHİLDİR");
        assert_eq!(label.get(CanonicalField::Brand), "");
        assert_eq!(session.current(), Some(&label));
    }

    #[test]
    fn test_invalid_input_before_dataset_check() {
        let mut session = LabelSession::default();
        assert_eq!(session.lookup("   ").unwrap_err(), Error::InvalidBarcodeInput);
        assert_eq!(session.lookup("123").unwrap_err(), Error::NoDataset);
    }

    #[test]
    fn test_empty_import_keeps_previous_pair() {
        let mut session = LabelSession::default();
        session.import(scenario_dataset()).unwrap();
        let before = session.mapping().cloned();

        let empty = Dataset::from_rows(vec!["Other".into()], Vec::new());
        assert_eq!(session.import(empty).unwrap_err(), Error::ImportEmpty);

        assert_eq!(session.mapping().cloned(), before);
        assert_eq!(session.dataset().map(Dataset::len), Some(1));
        assert!(session.lookup("1234567890123").is_ok());
    }

    #[test]
    fn test_reimport_replaces_pair_and_clears_current() {
        let mut session = LabelSession::default();
        session.import(scenario_dataset()).unwrap();
        session.lookup("1234567890123").unwrap();
        assert!(session.current().is_some());

        let other = Dataset::from_rows(
            vec!["barcode".into()],
            vec![vec![CellValue::from("42")]],
        );
        session.import(other).unwrap();
        assert!(session.current().is_none());
        assert_eq!(session.lookup("1234567890123").unwrap_err(), Error::NotFound("1234567890123".into()));
        assert!(session.lookup("42").is_ok());
    }

    #[test]
    fn test_failed_lookup_keeps_current() {
        let mut session = LabelSession::default();
        session.import(scenario_dataset()).unwrap();
        session.lookup("1234567890123").unwrap();
        assert!(session.lookup("000").is_err());
        assert_eq!(session.current().map(LabelData::barcode), Some("1234567890123"));
    }

    #[test]
    fn test_select_row() {
        let mut session = LabelSession::default();
        assert_eq!(session.select_row(0).unwrap_err(), Error::NoDataset);

        session.import(scenario_dataset()).unwrap();
        assert_eq!(session.select_row(0).unwrap().get(CanonicalField::Size), "M");
        assert_eq!(
            session.select_row(3).unwrap_err(),
            Error::RowOutOfRange { index: 3, len: 1 }
        );
    }

    #[test]
    fn test_mapping_incomplete_on_lookup() {
        let mut session = LabelSession::default();
        let data = Dataset::from_rows(vec!["Kod".into()], vec![vec![CellValue::from("1")]]);
        session.import(data).unwrap();
        assert_eq!(session.lookup("1").unwrap_err(), Error::MappingIncomplete);
    }

    #[test]
    fn test_position_of() {
        let mut session = LabelSession::default();
        assert_eq!(session.position_of("1").unwrap_err(), Error::NoDataset);
        assert_eq!(session.position_of(" ").unwrap_err(), Error::InvalidBarcodeInput);

        let data = Dataset::from_rows(
            vec!["Barcode - EAN".into()],
            vec![
                vec![CellValue::from("10")],
                vec![CellValue::from("20")],
                vec![CellValue::from("20")],
            ],
        );
        session.import(data).unwrap();
        assert_eq!(session.position_of(" 20 ").unwrap(), 1);
        assert_eq!(session.position_of("30").unwrap_err(), Error::NotFound("30".into()));
        assert!(session.current().is_none());
    }

    #[test]
    fn test_clear_keeps_dataset() {
        let mut session = LabelSession::default();
        session.import(scenario_dataset()).unwrap();
        session.lookup("1234567890123").unwrap();

        session.clear();
        assert!(session.current().is_none());
        assert_eq!(session.dataset().map(Dataset::len), Some(1));
        assert!(session.lookup("1234567890123").is_ok());
    }

    #[test]
    fn test_rows_for_table() {
        let mut session = LabelSession::default();
        assert!(session.rows().is_empty());
        session.import(scenario_dataset()).unwrap();

        let rows = session.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].barcode, "1234567890123");
        assert_eq!(rows[0].size, "M");
        assert_eq!(rows[0].brand, "");
    }
}
