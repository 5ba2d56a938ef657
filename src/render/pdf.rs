use super::code128;
use super::layout::{LabelLayout, LabelPlan};
use crate::error::{EtiketError, Result};
use etiket_common::LabelData;
use printpdf::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::debug;

/// Barkodun iki yanındaki boşluk (modül)
const QUIET_ZONE_MODULES: usize = 10;

struct LabelFonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    embedded: bool,
}

impl LabelFonts {
    fn load(doc: &PdfDocumentReference, font_path: Option<&Path>) -> Result<Self> {
        match font_path {
            Some(path) => {
                let file = File::open(path)
                    .map_err(|e| EtiketError::Font(format!("{}: {}", path.display(), e)))?;
                let font = doc
                    .add_external_font(file)
                    .map_err(|e| EtiketError::Font(format!("{}: {:?}", path.display(), e)))?;
                Ok(Self {
                    regular: font.clone(),
                    bold: font,
                    embedded: true,
                })
            }
            None => {
                let regular = doc
                    .add_builtin_font(BuiltinFont::Helvetica)
                    .map_err(|e| EtiketError::Font(format!("{:?}", e)))?;
                let bold = doc
                    .add_builtin_font(BuiltinFont::HelveticaBold)
                    .map_err(|e| EtiketError::Font(format!("{:?}", e)))?;
                Ok(Self {
                    regular,
                    bold,
                    embedded: false,
                })
            }
        }
    }

    fn text(&self, text: &str) -> String {
        if self.embedded {
            text.to_string()
        } else {
            fold_for_builtin(text)
        }
    }
}

/// Yerleşik yazı tiplerinde (WinAnsi) bulunmayan Türkçe harfler
fn fold_for_builtin(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'İ' => 'I',
            'ı' => 'i',
            'Ş' => 'S',
            'ş' => 's',
            'Ğ' => 'G',
            'ğ' => 'g',
            other => other,
        })
        .collect()
}

/// Her etiket ayrı sayfa olmak üzere PDF üretir
pub fn render_pdf(labels: &[LabelData], layout: &LabelLayout, font_path: Option<&Path>) -> Result<Vec<u8>> {
    let doc = build_document(labels, layout, font_path)?;
    doc.save_to_bytes()
        .map_err(|e| EtiketError::PdfGeneration(format!("PDF kaydedilemedi: {:?}", e)))
}

pub fn write_pdf(
    labels: &[LabelData],
    layout: &LabelLayout,
    font_path: Option<&Path>,
    output_path: &Path,
) -> Result<()> {
    let doc = build_document(labels, layout, font_path)?;

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(output_path)?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| EtiketError::PdfGeneration(format!("PDF kaydedilemedi: {:?}", e)))?;

    debug!(path = %output_path.display(), pages = labels.len(), "PDF yazıldı");
    Ok(())
}

fn build_document(
    labels: &[LabelData],
    layout: &LabelLayout,
    font_path: Option<&Path>,
) -> Result<PdfDocumentReference> {
    let first = labels
        .first()
        .ok_or_else(|| EtiketError::PdfGeneration("yazdırılacak etiket yok".into()))?;

    let title = format!("Etiket {}", first.barcode());
    let width = Mm(layout.width_mm);
    let height = Mm(layout.height_mm);
    let (doc, page1, layer1) = PdfDocument::new(&title, width, height, "Etiket");
    let fonts = LabelFonts::load(&doc, font_path)?;

    for (i, label) in labels.iter().enumerate() {
        let (page, layer) = if i == 0 {
            (page1, layer1)
        } else {
            doc.add_page(width, height, "Etiket")
        };
        let current_layer = doc.get_page(page).get_layer(layer);
        draw_label(&current_layer, &fonts, &layout.place(label))?;
    }

    Ok(doc)
}

fn draw_label(layer: &PdfLayerReference, fonts: &LabelFonts, plan: &LabelPlan) -> Result<()> {
    let black = Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None));
    layer.set_fill_color(black);

    let modules = code128::modules(&plan.barcode_value)?;
    let area = plan.barcode;
    let module_mm = area.width_mm / (modules.len() + 2 * QUIET_ZONE_MODULES) as f32;
    let origin = area.x_mm + QUIET_ZONE_MODULES as f32 * module_mm;

    for (start, width) in code128::bar_runs(&modules) {
        let x1 = origin + start as f32 * module_mm;
        let x2 = x1 + width as f32 * module_mm;
        layer.add_rect(Rect::new(
            Mm(x1),
            Mm(area.y_mm),
            Mm(x2),
            Mm(area.y_mm + area.height_mm),
        ));
    }

    for text in &plan.texts {
        let font = if text.bold { &fonts.bold } else { &fonts.regular };
        layer.use_text(
            fonts.text(&text.text),
            text.size_pt,
            Mm(text.x_mm),
            Mm(text.baseline_mm),
            font,
        );
    }

    Ok(())
}
