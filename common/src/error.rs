//! Hata türleri
//!
//! Kullanıcıya doğrudan gösterilen hatalar. Hiçbiri otomatik olarak
//! yeniden denenmez; her biri yeni kullanıcı girdisi bekler.

use thiserror::Error;

/// Çekirdek hata türü
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Excel dosyası boş veya veri içermiyor.")]
    ImportEmpty,

    #[error("Excel dosyası yüklenirken hata oluştu: {0}")]
    ImportUnparsable(String),

    #[error("Barkod sütunu eşleştirilemedi.")]
    MappingIncomplete,

    #[error("Barkod {0} bulunamadı.")]
    NotFound(String),

    #[error("Barkod bilgisi bulunamadı!")]
    MissingBarcode,

    #[error("Lütfen bir barkod girin veya okutun.")]
    InvalidBarcodeInput,

    #[error("Önce Excel verilerini yükleyin.")]
    NoDataset,

    #[error("Seçilen satır bulunamadı: {index} (toplam {len})")]
    RowOutOfRange { index: usize, len: usize },
}

/// Result tür takma adı
pub type Result<T> = std::result::Result<T, Error>;
