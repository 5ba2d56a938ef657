pub mod code128;
pub mod layout;
pub mod pdf;
pub mod preview;

pub use layout::{FontSize, LabelLayout, LabelPlan};
pub use pdf::{render_pdf, write_pdf};
pub use preview::preview;

use std::path::{Path, PathBuf};

/// Tek etiket çıktısı: dizin verilirse içine `etiket_<barkod>.pdf` yazılır
pub fn output_path_for_label(output: Option<&Path>, barcode: &str) -> PathBuf {
    let file_name = format!("etiket_{}.pdf", sanitize(barcode));
    match output {
        Some(path) if path.is_dir() || path.extension().is_none() => path.join(file_name),
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(file_name),
    }
}

/// Toplu çıktı: `etiketler_<tarih>.pdf`
pub fn output_path_for_batch(output: Option<&Path>) -> PathBuf {
    let file_name = format!("etiketler_{}.pdf", chrono::Local::now().format("%Y%m%d_%H%M%S"));
    match output {
        Some(path) if path.is_dir() || path.extension().is_none() => path.join(file_name),
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(file_name),
    }
}

fn sanitize(text: &str) -> String {
    text.trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect()
}
