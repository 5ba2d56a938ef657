//! Hata durumları testleri

use etiket::error::EtiketError;
use etiket::importer;
use etiket_common::Error as CoreError;
use std::path::Path;

#[test]
fn test_load_nonexistent_file() {
    let result = importer::load_file(Path::new("/nonexistent/path/urunler.xlsx"));
    assert!(matches!(result, Err(EtiketError::FileNotFound(_))));
}

#[test]
fn test_core_errors_pass_through() {
    let err: EtiketError = CoreError::NotFound("123".into()).into();
    assert_eq!(err.to_string(), "Barkod 123 bulunamadı.");

    let err: EtiketError = CoreError::MissingBarcode.into();
    assert_eq!(err.to_string(), "Barkod bilgisi bulunamadı!");
}

#[test]
fn test_error_display() {
    let errors = vec![
        EtiketError::Config("test".to_string()),
        EtiketError::FileNotFound("urunler.xlsx".to_string()),
        EtiketError::UnsupportedFormat("pdf".to_string()),
        EtiketError::PdfGeneration("test".to_string()),
        EtiketError::BarcodeEncode("Ç".to_string()),
        EtiketError::Font("font.ttf".to_string()),
        EtiketError::CliExecution("test".to_string()),
        CoreError::ImportEmpty.into(),
        CoreError::NoDataset.into(),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "Error display should not be empty");
    }
}

#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: EtiketError = io_err.into();
    assert!(matches!(err, EtiketError::Io(_)));
}

#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{bozuk").unwrap_err();
    let err: EtiketError = json_err.into();
    assert!(matches!(err, EtiketError::JsonParse(_)));
}
