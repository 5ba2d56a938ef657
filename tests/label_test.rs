//! Etiket üretimi uçtan uca testleri

use etiket::config::Config;
use etiket::render::{self, FontSize, LabelLayout};
use etiket::scan::{self, PrintSettings, ScanAction, ScanOutcome};
use etiket_common::{CanonicalField, CellValue, Dataset, LabelSession, MappingRules};
use tempfile::tempdir;

fn scenario_session() -> LabelSession {
    let mut session = LabelSession::new(MappingRules::default());
    session
        .import(Dataset::from_rows(
            vec!["Barcode - EAN".into(), "Product code".into(), "Size".into()],
            vec![vec![
                CellValue::from("1234567890123"),
                CellValue::from("A1"),
                CellValue::from("M"),
            ]],
        ))
        .unwrap();
    session
}

#[test]
fn test_scenario_pdf() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut session = scenario_session();

    let label = session.lookup("1234567890123").unwrap().clone();
    assert_eq!(label.get(CanonicalField::Currency), "TL");
    assert_eq!(label.get(CanonicalField::Note), "KDV DAHİLDİR");

    let output = render::output_path_for_label(Some(dir.path()), label.barcode());
    render::write_pdf(&[label], &LabelLayout::default(), None, &output).unwrap();

    let bytes = std::fs::read(&output).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_layout_from_config() {
    let mut config = Config::default();
    config.set_size(50.0, 30.0).unwrap();
    config.font_size = FontSize::Small;

    let layout = config.layout(None, None, None).unwrap();
    assert_eq!(layout, LabelLayout::new(50.0, 30.0, FontSize::Small));

    let mut session = scenario_session();
    let label = session.select_row(0).unwrap().clone();
    let bytes = render::render_pdf(&[label], &layout, None).unwrap();
    assert!(!bytes.is_empty());
}

#[test]
fn test_scan_sequence() {
    let dir = tempdir().expect("Failed to create temp dir");
    let settings = PrintSettings {
        layout: LabelLayout::default(),
        font_path: None,
        output_dir: dir.path().to_path_buf(),
    };
    let mut session = scenario_session();

    let inputs = ["", "999", "1234567890123\r\n", "q"];
    let mut printed = Vec::new();
    let mut errors = 0;
    for input in inputs {
        match scan::process(&mut session, scan::parse_scan_input(input), &settings) {
            Ok(ScanOutcome::Printed { path, .. }) => printed.push(path),
            Ok(ScanOutcome::Quit) => break,
            Ok(_) => {}
            Err(_) => errors += 1,
        }
    }

    assert_eq!(errors, 1);
    assert_eq!(printed.len(), 1);
    assert!(printed[0].exists());
    assert_eq!(scan::parse_scan_input("#1"), ScanAction::Row(0));
}
