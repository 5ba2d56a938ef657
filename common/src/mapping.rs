//! Başlık eşleştirme modülü
//!
//! Excel sütun adlarını etiket alanlarına bağlar. Her alan için sırayla:
//! 1. Para birimi / açıklama: her zaman sabit değer
//! 2. Tam eşleşme: yapılandırılmış sütun adı dosyada varsa
//! 3. Kısmi eşleşme: büyük/küçük harf duyarsız, iki yönlü içerme
//! 4. (isteğe bağlı) Takma ad listesi
//!
//! Eşleşmeyen alan hata üretmez, eşlemede yer almaz.

use crate::types::CanonicalField;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

pub const DEFAULT_CURRENCY: &str = "TL";
pub const DEFAULT_NOTE: &str = "KDV DAHİLDİR";

/// Eşleştirme kuralları (config.json içindeki `mapping` bölümü)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingRules {
    /// Varsayılan sütun adlarının üzerine yazılan sütunlar
    pub columns: BTreeMap<CanonicalField, String>,
    /// Para birimi sabiti
    pub currency: String,
    /// Açıklama sabiti
    pub note: String,
    /// Takma ad aşamasını etkinleştirir
    pub use_aliases: bool,
    /// Yerleşik takma adların üzerine yazılan listeler
    pub aliases: BTreeMap<CanonicalField, Vec<String>>,
}

impl Default for MappingRules {
    fn default() -> Self {
        Self {
            columns: BTreeMap::new(),
            currency: DEFAULT_CURRENCY.into(),
            note: DEFAULT_NOTE.into(),
            use_aliases: false,
            aliases: BTreeMap::new(),
        }
    }
}

impl MappingRules {
    /// Alanın beklenen sütun adı
    pub fn exact_column(&self, field: CanonicalField) -> Option<&str> {
        if field.is_constant() {
            return None;
        }
        self.columns
            .get(&field)
            .map(String::as_str)
            .filter(|column| !column.trim().is_empty())
            .or_else(|| field.default_column())
    }

    /// Sabit alanların değeri
    pub fn constant(&self, field: CanonicalField) -> Option<&str> {
        match field {
            CanonicalField::Currency => Some(&self.currency),
            CanonicalField::Note => Some(&self.note),
            _ => None,
        }
    }

    pub fn with_column(mut self, field: CanonicalField, column: impl Into<String>) -> Self {
        self.columns.insert(field, column.into());
        self
    }

    pub fn with_aliases(mut self, enabled: bool) -> Self {
        self.use_aliases = enabled;
        self
    }

    /// Alanın takma adları (küçük harf)
    pub fn aliases_for(&self, field: CanonicalField) -> Vec<String> {
        match self.aliases.get(&field) {
            Some(list) => list.iter().map(|a| a.to_lowercase()).collect(),
            None => builtin_aliases(field).iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// Yerleşik takma adlar
fn builtin_aliases(field: CanonicalField) -> &'static [&'static str] {
    match field {
        CanonicalField::Barcode => &["barcode", "barkod", "ean"],
        CanonicalField::ProductCode => &["product code", "ürün kodu"],
        CanonicalField::Brand => &["product description", "marka"],
        CanonicalField::ProductCode2 => &["color code", "renk kodu"],
        CanonicalField::Color => &["color", "renk"],
        CanonicalField::Size => &["size", "beden"],
        CanonicalField::ProductionCountry => &["country", "ülke"],
        CanonicalField::Date => &["date", "tarih"],
        CanonicalField::Price => &["price", "fiyat"],
        CanonicalField::Category => &["collection", "category", "kategori"],
        CanonicalField::Currency | CanonicalField::Note => &[],
    }
}

/// Alanın değer kaynağı
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSource {
    Column(String),
    Constant(String),
}

/// Eşleşmeyi sağlayan kural
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchRule {
    Exact,
    Constant,
    Fuzzy,
    Alias,
}

impl std::fmt::Display for MatchRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchRule::Exact => write!(f, "tam eşleşme"),
            MatchRule::Constant => write!(f, "sabit değer"),
            MatchRule::Fuzzy => write!(f, "alternatif eşleşme"),
            MatchRule::Alias => write!(f, "takma ad"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappedField {
    pub source: FieldSource,
    pub rule: MatchRule,
}

impl MappedField {
    fn column(name: &str, rule: MatchRule) -> Self {
        Self {
            source: FieldSource::Column(name.to_string()),
            rule,
        }
    }
}

/// Alan → kaynak eşlemesi. Oluşturulduktan sonra değişmez.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldMapping {
    entries: BTreeMap<CanonicalField, MappedField>,
}

impl FieldMapping {
    pub fn get(&self, field: CanonicalField) -> Option<&MappedField> {
        self.entries.get(&field)
    }

    pub fn source(&self, field: CanonicalField) -> Option<&FieldSource> {
        self.entries.get(&field).map(|m| &m.source)
    }

    /// Alan bir sütuna eşlenmişse sütun adı
    pub fn column(&self, field: CanonicalField) -> Option<&str> {
        match self.source(field) {
            Some(FieldSource::Column(name)) => Some(name),
            _ => None,
        }
    }

    pub fn is_mapped(&self, field: CanonicalField) -> bool {
        self.entries.contains_key(&field)
    }

    /// Eşlenemeyen alanlar, şema sırasıyla
    pub fn unresolved(&self) -> Vec<CanonicalField> {
        CanonicalField::ALL
            .iter()
            .copied()
            .filter(|f| !self.is_mapped(*f))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CanonicalField, &MappedField)> {
        self.entries.iter().map(|(f, m)| (*f, m))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(CanonicalField, MappedField)> for FieldMapping {
    fn from_iter<I: IntoIterator<Item = (CanonicalField, MappedField)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Sütun adlarından eşleme oluşturur.
///
/// Kısmi eşleşmede sütunlar dosyadaki sırayla taranır ve ilk uyan alınır.
///
/// # Examples
/// ```
/// use etiket_common::{build_mapping, CanonicalField, MappingRules};
///
/// let columns = vec!["Barcode - EAN".to_string(), "Beden ölçüsü (Size)".to_string()];
/// let mapping = build_mapping(&columns, &MappingRules::default());
/// assert_eq!(mapping.column(CanonicalField::Barcode), Some("Barcode - EAN"));
/// assert_eq!(mapping.column(CanonicalField::Size), Some("Beden ölçüsü (Size)"));
/// ```
pub fn build_mapping(columns: &[String], rules: &MappingRules) -> FieldMapping {
    let mut entries = BTreeMap::new();

    for field in CanonicalField::ALL {
        match resolve_field(field, columns, rules) {
            Some(mapped) => {
                debug!(field = field.label(), rule = %mapped.rule, source = ?mapped.source, "alan eşleştirildi");
                entries.insert(field, mapped);
            }
            None => {
                warn!(
                    field = field.label(),
                    expected = rules.exact_column(field).unwrap_or("-"),
                    "alan için sütun bulunamadı"
                );
            }
        }
    }

    FieldMapping { entries }
}

fn resolve_field(field: CanonicalField, columns: &[String], rules: &MappingRules) -> Option<MappedField> {
    if let Some(value) = rules.constant(field) {
        return Some(MappedField {
            source: FieldSource::Constant(value.to_string()),
            rule: MatchRule::Constant,
        });
    }

    if let Some(expected) = rules.exact_column(field) {
        if let Some(column) = columns.iter().find(|c| c.as_str() == expected) {
            return Some(MappedField::column(column, MatchRule::Exact));
        }
        if let Some(column) = fuzzy_match(expected, columns) {
            return Some(MappedField::column(column, MatchRule::Fuzzy));
        }
    }

    if rules.use_aliases {
        if let Some(column) = alias_match(field, columns, rules) {
            return Some(MappedField::column(column, MatchRule::Alias));
        }
    }

    None
}

/// Biri diğerini içeren ilk sütun (büyük/küçük harf duyarsız)
fn fuzzy_match<'a>(expected: &str, columns: &'a [String]) -> Option<&'a str> {
    let expected = expected.trim().to_lowercase();
    if expected.is_empty() {
        return None;
    }
    columns
        .iter()
        .filter(|c| !c.trim().is_empty())
        .find(|c| {
            let candidate = c.to_lowercase();
            candidate.contains(&expected) || expected.contains(&candidate)
        })
        .map(String::as_str)
}

/// Alan adıyla birebir aynı sütun, yoksa takma adlardan birini içeren ilk sütun
fn alias_match<'a>(field: CanonicalField, columns: &'a [String], rules: &MappingRules) -> Option<&'a str> {
    if let Some(column) = columns.iter().find(|c| c.as_str() == field.label()) {
        return Some(column);
    }

    let aliases = rules.aliases_for(field);
    columns
        .iter()
        .find(|c| {
            let candidate = c.to_lowercase();
            aliases.iter().any(|alias| !alias.is_empty() && candidate.contains(alias.as_str()))
        })
        .map(String::as_str)
}
