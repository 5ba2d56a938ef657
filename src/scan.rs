//! Barkod okuyucu ile etkileşimli etiket basma
//!
//! Okuyucu barkodu yazıp Enter gönderir. Her okumada etiket PDF'i
//! çıktı dizinine yazılır ve önizleme gösterilir. Hatalar döngüyü bitirmez.

use crate::error::{EtiketError, Result};
use crate::render::{self, LabelLayout};
use dialoguer::Input;
use etiket_common::{LabelData, LabelSession};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Etiket çıktı ayarları
#[derive(Debug, Clone)]
pub struct PrintSettings {
    pub layout: LabelLayout,
    pub font_path: Option<PathBuf>,
    pub output_dir: PathBuf,
}

impl PrintSettings {
    /// Etiketi PDF olarak yazar, yazılan dosyanın yolunu döner
    pub fn print(&self, label: &LabelData) -> Result<PathBuf> {
        let path = render::output_path_for_label(Some(&self.output_dir), label.barcode());
        render::write_pdf(
            std::slice::from_ref(label),
            &self.layout,
            self.font_path.as_deref(),
            &path,
        )?;
        Ok(path)
    }
}

/// Okunan satırın anlamı
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanAction {
    Barcode(String),
    /// `#3` gibi tablo satırı (1'den başlar)
    Row(usize),
    List,
    /// Ekrandaki etiketi temizler
    Clear,
    Skip,
    Quit,
}

pub fn parse_scan_input(line: &str) -> ScanAction {
    let trimmed = line.trim();
    match trimmed {
        "" => ScanAction::Skip,
        "q" | "Q" | "çık" | "exit" => ScanAction::Quit,
        "l" | "L" | "liste" => ScanAction::List,
        "c" | "C" | "temizle" => ScanAction::Clear,
        _ => match trimmed.strip_prefix('#').map(|n| n.trim().parse::<usize>()) {
            Some(Ok(n)) if n > 0 => ScanAction::Row(n - 1),
            _ => ScanAction::Barcode(trimmed.to_string()),
        },
    }
}

/// Tek okumanın sonucu
#[derive(Debug)]
pub enum ScanOutcome {
    /// `row` tablodaki satırın sırasıdır (0'dan başlar)
    Printed { label: LabelData, row: usize, path: PathBuf },
    Listed(usize),
    Cleared,
    Skipped,
    Quit,
}

/// Okumayı işler: arar, etiketi oluşturur ve yazar
pub fn process(
    session: &mut LabelSession,
    action: ScanAction,
    settings: &PrintSettings,
) -> Result<ScanOutcome> {
    let (label, row) = match action {
        ScanAction::Skip => return Ok(ScanOutcome::Skipped),
        ScanAction::Clear => {
            session.clear();
            return Ok(ScanOutcome::Cleared);
        }
        ScanAction::Quit => return Ok(ScanOutcome::Quit),
        ScanAction::List => {
            let rows = session.rows();
            for row in &rows {
                println!(
                    "  #{:<4} {:<15} {:<20} {:<12} {}",
                    row.index + 1,
                    row.barcode,
                    row.brand,
                    row.color,
                    row.size
                );
            }
            return Ok(ScanOutcome::Listed(rows.len()));
        }
        ScanAction::Barcode(code) => {
            let label = session.lookup(&code)?.clone();
            (label, session.position_of(&code)?)
        }
        ScanAction::Row(index) => (session.select_row(index)?.clone(), index),
    };

    let path = settings.print(&label)?;
    Ok(ScanOutcome::Printed { label, row, path })
}

/// Etkileşimli döngü. `q` ile çıkılır.
pub fn run_scan_loop(session: &mut LabelSession, settings: &PrintSettings) -> Result<usize> {
    println!("🏷  Barkod okutun ya da yazın");
    println!("---");
    println!("İşlemler: [barkod]+Enter etiket  [#N] N. satır  [l] liste  [c] temizle  [q] çıkış");
    println!("---\n");

    let mut printed = 0;
    loop {
        let line: String = Input::new()
            .with_prompt("Barkod")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| EtiketError::CliExecution(format!("Girdi okunamadı: {}", e)))?;

        match process(session, parse_scan_input(&line), settings) {
            Ok(ScanOutcome::Printed { label, row, path }) => {
                println!("{}", render::preview(&label));
                println!("✔ Etiket (#{}): {}\n", row + 1, path.display());
                printed += 1;
            }
            Ok(ScanOutcome::Listed(count)) => println!("  {} ürün\n", count),
            Ok(ScanOutcome::Cleared) => println!("✓ Etiket temizlendi\n"),
            Ok(ScanOutcome::Skipped) => {}
            Ok(ScanOutcome::Quit) => break,
            Err(e) => {
                warn!(error = %e, "okuma başarısız");
                println!("✖ {}\n", e);
            }
        }
    }

    println!("✓ {} etiket basıldı", printed);
    Ok(printed)
}

/// Çıktı dizinini hazırlar
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    if !dir.as_os_str().is_empty() {
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use etiket_common::{CanonicalField, CellValue, Dataset, Error as CoreError, MappingRules};

    fn session() -> LabelSession {
        let mut session = LabelSession::new(MappingRules::default());
        session
            .import(Dataset::from_rows(
                vec!["Barcode - EAN".into(), "Size".into()],
                vec![
                    vec![CellValue::from("1234567890123"), CellValue::from("M")],
                    vec![CellValue::from("555"), CellValue::from("L")],
                ],
            ))
            .unwrap();
        session
    }

    fn settings(dir: &Path) -> PrintSettings {
        PrintSettings {
            layout: LabelLayout::default(),
            font_path: None,
            output_dir: dir.to_path_buf(),
        }
    }

    #[test]
    fn test_parse_scan_input() {
        assert_eq!(parse_scan_input("  \r\n"), ScanAction::Skip);
        assert_eq!(parse_scan_input("q"), ScanAction::Quit);
        assert_eq!(parse_scan_input("l"), ScanAction::List);
        assert_eq!(parse_scan_input("temizle"), ScanAction::Clear);
        assert_eq!(parse_scan_input("#2"), ScanAction::Row(1));
        assert_eq!(parse_scan_input("#0"), ScanAction::Barcode("#0".into()));
        assert_eq!(parse_scan_input(" 123 \n"), ScanAction::Barcode("123".into()));
    }

    #[test]
    fn test_process_barcode_prints() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session();

        let outcome = process(&mut session, ScanAction::Barcode("555".into()), &settings(dir.path())).unwrap();
        match outcome {
            ScanOutcome::Printed { label, row, path } => {
                assert_eq!(label.get(CanonicalField::Size), "L");
                assert_eq!(row, 1);
                assert!(path.ends_with("etiket_555.pdf"));
                assert!(path.exists());
            }
            other => panic!("beklenmeyen sonuç: {:?}", other),
        }
        assert_eq!(session.current().map(LabelData::barcode), Some("555"));
    }

    #[test]
    fn test_process_row() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session();
        let outcome = process(&mut session, ScanAction::Row(0), &settings(dir.path())).unwrap();
        assert!(matches!(outcome, ScanOutcome::Printed { row: 0, .. }));
    }

    #[test]
    fn test_process_not_found_keeps_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session();
        let err = process(&mut session, ScanAction::Barcode("999".into()), &settings(dir.path())).unwrap_err();
        assert!(matches!(err, EtiketError::Common(CoreError::NotFound(_))));
        assert!(session.dataset().is_some());
    }

    #[test]
    fn test_process_clear() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session();
        process(&mut session, ScanAction::Barcode("555".into()), &settings(dir.path())).unwrap();
        assert!(session.current().is_some());

        let outcome = process(&mut session, ScanAction::Clear, &settings(dir.path())).unwrap();
        assert!(matches!(outcome, ScanOutcome::Cleared));
        assert!(session.current().is_none());
        assert!(session.dataset().is_some());
    }

    #[test]
    fn test_process_list_and_quit() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session();
        assert!(matches!(
            process(&mut session, ScanAction::List, &settings(dir.path())).unwrap(),
            ScanOutcome::Listed(2)
        ));
        assert!(matches!(
            process(&mut session, ScanAction::Quit, &settings(dir.path())).unwrap(),
            ScanOutcome::Quit
        ));
    }
}
