//! Etiket Common Library
//!
//! Excel verisini etiket alanlarına dönüştüren saf çekirdek:
//! başlık eşleştirme, barkod arama, değer biçimlendirme ve etiket verisi oluşturma.
//! Dosya okuma ve çizim kök crate'te yapılır.

pub mod types;
pub mod error;
pub mod mapping;
pub mod lookup;
pub mod format;
pub mod assemble;
pub mod session;

pub use types::{CanonicalField, CellValue, Dataset, LabelData, Record, TableRow};
pub use error::{Error, Result};
pub use mapping::{build_mapping, FieldMapping, FieldSource, MappedField, MappingRules, MatchRule};
pub use lookup::{find_by_barcode, normalize_barcode_input, position_by_barcode};
pub use format::{format_date, format_price};
pub use assemble::assemble;
pub use session::{ImportSummary, LabelSession};
