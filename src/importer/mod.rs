//! Ürün tablosu içe aktarma
//!
//! İlk çalışma sayfası okunur, ilk satır başlık kabul edilir.

mod delimited;
mod workbook;

use crate::error::{EtiketError, Result};
use etiket_common::{CellValue, Dataset, Error as CoreError};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];
const DELIMITED_EXTENSIONS: &[&str] = &["csv", "txt"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Workbook,
    Delimited,
}

impl SourceKind {
    pub fn from_extension(extension: &str) -> Result<Self> {
        let ext = extension.trim_start_matches('.').to_lowercase();
        if WORKBOOK_EXTENSIONS.contains(&ext.as_str()) {
            Ok(SourceKind::Workbook)
        } else if DELIMITED_EXTENSIONS.contains(&ext.as_str()) {
            Ok(SourceKind::Delimited)
        } else {
            Err(EtiketError::UnsupportedFormat(extension.to_string()))
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_string())
            .unwrap_or_default();
        Self::from_extension(&ext)
    }
}

/// Dosyayı okuyup tabloya çevirir
pub fn load_file(path: &Path) -> Result<Dataset> {
    if !path.is_file() {
        return Err(EtiketError::FileNotFound(path.display().to_string()));
    }

    let kind = SourceKind::from_path(path)?;
    info!(path = %path.display(), ?kind, "dosya okunuyor");

    match kind {
        SourceKind::Workbook => workbook::read_path(path),
        SourceKind::Delimited => {
            let bytes = std::fs::read(path)?;
            delimited::read_bytes(&bytes)
        }
    }
}

/// Bellekteki dosya içeriğini okur (ör. yüklenen dosya)
pub fn load_bytes(bytes: Vec<u8>, extension: &str) -> Result<Dataset> {
    match SourceKind::from_extension(extension)? {
        SourceKind::Workbook => workbook::read_bytes(bytes),
        SourceKind::Delimited => delimited::read_bytes(&bytes),
    }
}

/// Başlık ve satırlardan tablo kurar. Tamamen boş satırlar atlanır.
pub(crate) fn build_dataset(header: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Dataset> {
    if header.iter().all(|h| h.trim().is_empty()) {
        return Err(CoreError::ImportEmpty.into());
    }

    let columns = unique_headers(header);
    let total = rows.len();
    let rows: Vec<Vec<CellValue>> = rows
        .into_iter()
        .filter(|row| row.iter().any(|cell| !cell.is_empty()))
        .collect();

    if rows.is_empty() {
        return Err(CoreError::ImportEmpty.into());
    }

    debug!(columns = columns.len(), rows = rows.len(), skipped = total - rows.len(), "tablo kuruldu");
    Ok(Dataset::from_rows(columns, rows))
}

/// Boş başlıklar `__EMPTY`, tekrar edenler `_1`, `_2` ekiyle adlandırılır
fn unique_headers(raw: Vec<String>) -> Vec<String> {
    let mut used = HashSet::new();
    let mut columns = Vec::with_capacity(raw.len());

    for header in raw {
        let base = match header.trim() {
            "" => "__EMPTY".to_string(),
            trimmed => trimmed.to_string(),
        };

        let mut name = base.clone();
        let mut n = 1;
        while used.contains(&name) {
            name = format!("{}_{}", base, n);
            n += 1;
        }
        used.insert(name.clone());
        columns.push(name);
    }

    columns
}
