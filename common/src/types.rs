//! Etiket veri türleri
//!
//! - CanonicalField: etiket şemasındaki 12 sabit alan
//! - CellValue / Record / Dataset: içe aktarılan tablo
//! - LabelData: biçimlendirilmiş, yazdırmaya hazır etiket alanları

use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Etiket alanı. Sıralama etiket şemasındaki sırayla aynıdır.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    Barcode,
    ProductCode,
    Brand,
    ProductCode2,
    Color,
    Size,
    ProductionCountry,
    Date,
    Currency,
    Price,
    Note,
    Category,
}

impl CanonicalField {
    pub const ALL: [CanonicalField; 12] = [
        CanonicalField::Barcode,
        CanonicalField::ProductCode,
        CanonicalField::Brand,
        CanonicalField::ProductCode2,
        CanonicalField::Color,
        CanonicalField::Size,
        CanonicalField::ProductionCountry,
        CanonicalField::Date,
        CanonicalField::Currency,
        CanonicalField::Price,
        CanonicalField::Note,
        CanonicalField::Category,
    ];

    /// Etikette ve kullanıcı arayüzünde görünen ad
    pub fn label(&self) -> &'static str {
        match self {
            CanonicalField::Barcode => "Barkod",
            CanonicalField::ProductCode => "Ürün Kodu",
            CanonicalField::Brand => "Marka",
            CanonicalField::ProductCode2 => "Ürün Kodu 2",
            CanonicalField::Color => "Renk",
            CanonicalField::Size => "Beden",
            CanonicalField::ProductionCountry => "Üretim Yeri",
            CanonicalField::Date => "Tarih",
            CanonicalField::Currency => "Para Birimi",
            CanonicalField::Price => "Fiyat",
            CanonicalField::Note => "Açıklama",
            CanonicalField::Category => "Kategori",
        }
    }

    /// Varsayılan Excel sütun adı. Sabit alanların sütunu yoktur.
    pub fn default_column(&self) -> Option<&'static str> {
        match self {
            CanonicalField::Barcode => Some("Barcode - EAN"),
            CanonicalField::ProductCode => Some("Product code"),
            CanonicalField::Brand => Some("Product description"),
            CanonicalField::ProductCode2 => Some("Color Code"),
            CanonicalField::Color => Some("Color description in Turkish"),
            CanonicalField::Size => Some("Size"),
            CanonicalField::ProductionCountry => Some("Country of production"),
            CanonicalField::Date => Some("Last price change date"),
            CanonicalField::Price => Some("Price in Turkish Lira inc.VAT"),
            CanonicalField::Category => Some("Collection Code"),
            CanonicalField::Currency | CanonicalField::Note => None,
        }
    }

    /// Para birimi ve açıklama hiçbir zaman sütuna eşlenmez
    pub fn is_constant(&self) -> bool {
        matches!(self, CanonicalField::Currency | CanonicalField::Note)
    }

    /// Türkçe etiket adından alan bulur (büyük/küçük harf duyarsız)
    pub fn from_label(label: &str) -> Option<Self> {
        let wanted = label.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.label().to_lowercase() == wanted)
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ham hücre değeri
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            CellValue::Number(_) => false,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

/// Tek bir Excel satırı (sütun adı → hücre)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    cells: HashMap<String, CellValue>,
}

impl Record {
    /// Sütun değeri; olmayan sütun boş kabul edilir
    pub fn get(&self, column: &str) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        self.cells.get(column).unwrap_or(&EMPTY)
    }

    pub fn contains_column(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }

    pub fn column_count(&self) -> usize {
        self.cells.len()
    }
}

/// İçe aktarılmış tablo. Tüm satırlar aynı sütun kümesine sahiptir.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    records: Vec<Record>,
}

impl Dataset {
    /// Başlık satırı ve veri satırlarından tablo oluşturur.
    ///
    /// Kısa satırlar boş hücrelerle doldurulur, uzun satırlar başlık
    /// genişliğinde kesilir; böylece her satır aynı anahtar kümesini taşır.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let records = rows
            .into_iter()
            .map(|row| {
                let mut values = row.into_iter();
                let cells = columns
                    .iter()
                    .map(|column| (column.clone(), values.next().unwrap_or_default()))
                    .collect();
                Record { cells }
            })
            .collect();

        Self { columns, records }
    }

    /// Sütun adları, dosyadaki sırayla
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Yazdırmaya hazır etiket verisi
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelData {
    values: BTreeMap<CanonicalField, String>,
}

impl LabelData {
    pub(crate) fn insert(&mut self, field: CanonicalField, value: String) {
        self.values.insert(field, value);
    }

    /// Alan değeri; atanmamış alanlar boş metin döner
    pub fn get(&self, field: CanonicalField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn contains(&self, field: CanonicalField) -> bool {
        self.values.contains_key(&field)
    }

    pub fn barcode(&self) -> &str {
        self.get(CanonicalField::Barcode)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CanonicalField, &str)> {
        self.values.iter().map(|(f, v)| (*f, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(CanonicalField, String)> for LabelData {
    fn from_iter<I: IntoIterator<Item = (CanonicalField, String)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

// JSON çıktısında anahtarlar Türkçe alan adlarıdır
impl Serialize for LabelData {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (field, value) in &self.values {
            map.serialize_entry(field.label(), value)?;
        }
        map.end()
    }
}

/// Ürün tablosunda gösterilen satır özeti
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub index: usize,
    pub barcode: String,
    pub brand: String,
    pub color: String,
    pub size: String,
}
