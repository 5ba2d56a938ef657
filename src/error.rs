use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtiketError {
    #[error(transparent)]
    Common(#[from] etiket_common::Error),

    #[error("Ayar hatası: {0}")]
    Config(String),

    #[error("Dosya bulunamadı: {0}")]
    FileNotFound(String),

    #[error("Desteklenmeyen dosya türü: {0} (xlsx, xlsm, xls, ods, csv)")]
    UnsupportedFormat(String),

    #[error("JSON hatası: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO hatası: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF oluşturma hatası: {0}")]
    PdfGeneration(String),

    #[error("Barkod çizilemedi: {0}")]
    BarcodeEncode(String),

    #[error("Yazı tipi yüklenemedi: {0}")]
    Font(String),

    #[error("Komut hatası: {0}")]
    CliExecution(String),
}

pub type Result<T> = std::result::Result<T, EtiketError>;
