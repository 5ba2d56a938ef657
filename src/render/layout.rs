//! Etiket yerleşimi
//!
//! Konumlar 40x40mm etikete göre mm cinsindendir. Üste bağlı öğeler üst
//! kenardan, alta bağlı öğeler alt kenardan ölçülür; böylece farklı
//! boyutlarda da köşelere yapışık kalırlar. PDF koordinatları sol alttan başlar.

use etiket_common::{CanonicalField, LabelData};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const PT_TO_MM: f32 = 0.352_778;
const EDGE_MM: f32 = 2.0;
const BARCODE_BOTTOM_MM: f32 = 14.0;
const BARCODE_HEIGHT_MM: f32 = 7.0;
pub const PRODUCTION_CAPTION: &str = "ÜRETİM YERİ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl FontSize {
    pub fn scale(&self) -> f32 {
        match self {
            FontSize::Small => 0.85,
            FontSize::Medium => 1.0,
            FontSize::Large => 1.2,
        }
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontSize::Small => write!(f, "small"),
            FontSize::Medium => write!(f, "medium"),
            FontSize::Large => write!(f, "large"),
        }
    }
}

impl FromStr for FontSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "small" | "kucuk" | "küçük" => Ok(FontSize::Small),
            "medium" | "orta" => Ok(FontSize::Medium),
            "large" | "buyuk" | "büyük" => Ok(FontSize::Large),
            _ => Err(format!("Geçersiz yazı boyutu: {} (small, medium, large)", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Horizontal {
    Left(f32),
    Right(f32),
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Vertical {
    Top(f32),
    Bottom(f32),
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    x: Horizontal,
    y: Vertical,
    size_pt: f32,
    bold: bool,
}

impl Slot {
    const fn new(x: Horizontal, y: Vertical, size_pt: f32, bold: bool) -> Self {
        Self { x, y, size_pt, bold }
    }
}

/// Yazı satırının yerleşik konumu (taban çizgisi, sol alttan mm)
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    pub text: String,
    pub x_mm: f32,
    pub baseline_mm: f32,
    pub size_pt: f32,
    pub bold: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarcodeBox {
    pub x_mm: f32,
    pub y_mm: f32,
    pub width_mm: f32,
    pub height_mm: f32,
}

/// Çizime hazır etiket
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPlan {
    pub width_mm: f32,
    pub height_mm: f32,
    pub texts: Vec<PlacedText>,
    pub barcode: BarcodeBox,
    pub barcode_value: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelLayout {
    pub width_mm: f32,
    pub height_mm: f32,
    pub font_size: FontSize,
}

impl Default for LabelLayout {
    fn default() -> Self {
        Self::new(40.0, 40.0, FontSize::Medium)
    }
}

impl LabelLayout {
    pub fn new(width_mm: f32, height_mm: f32, font_size: FontSize) -> Self {
        Self {
            width_mm,
            height_mm,
            font_size,
        }
    }

    fn slot(field: CanonicalField) -> Slot {
        use Horizontal::*;
        use Vertical::*;

        match field {
            CanonicalField::ProductCode => Slot::new(Left(EDGE_MM), Top(2.0), 7.0, true),
            CanonicalField::Brand => Slot::new(Left(EDGE_MM), Top(5.0), 7.0, true),
            CanonicalField::ProductCode2 => Slot::new(Left(EDGE_MM), Top(8.0), 7.0, false),
            CanonicalField::Color => Slot::new(Left(EDGE_MM), Top(11.0), 7.0, false),
            CanonicalField::Size => Slot::new(Left(EDGE_MM), Top(14.0), 14.0, true),
            CanonicalField::Category => Slot::new(Right(EDGE_MM), Top(8.0), 8.0, true),
            CanonicalField::ProductionCountry => Slot::new(Right(8.0), Top(17.0), 6.0, false),
            CanonicalField::Barcode => Slot::new(Center, Bottom(11.5), 6.0, true),
            CanonicalField::Date => Slot::new(Right(EDGE_MM), Bottom(7.0), 6.0, false),
            CanonicalField::Currency => Slot::new(Left(EDGE_MM), Bottom(4.0), 8.0, true),
            CanonicalField::Price => Slot::new(Left(9.0), Bottom(4.0), 8.0, true),
            CanonicalField::Note => Slot::new(Left(EDGE_MM), Bottom(2.0), 5.0, false),
        }
    }

    fn barcode_box(&self) -> BarcodeBox {
        BarcodeBox {
            x_mm: EDGE_MM,
            y_mm: BARCODE_BOTTOM_MM,
            width_mm: self.width_mm - 2.0 * EDGE_MM,
            height_mm: BARCODE_HEIGHT_MM,
        }
    }

    /// Etiket verisini konumlara yerleştirir. Boş alanlar atlanır.
    pub fn place(&self, label: &LabelData) -> LabelPlan {
        let texts = CanonicalField::ALL
            .iter()
            .filter_map(|&field| {
                let text = display_text(field, label.get(field))?;
                Some(self.place_text(Self::slot(field), text))
            })
            .collect();

        LabelPlan {
            width_mm: self.width_mm,
            height_mm: self.height_mm,
            texts,
            barcode: self.barcode_box(),
            barcode_value: label.barcode().trim().to_string(),
        }
    }

    fn place_text(&self, slot: Slot, text: String) -> PlacedText {
        let size_pt = slot.size_pt * self.font_size.scale();
        let size_mm = size_pt * PT_TO_MM;
        let width_mm = estimate_width_mm(&text, size_pt, slot.bold);

        let x_mm = match slot.x {
            Horizontal::Left(left) => left,
            Horizontal::Right(right) => (self.width_mm - right - width_mm).max(0.0),
            Horizontal::Center => ((self.width_mm - width_mm) / 2.0).max(0.0),
        };
        // satır yüksekliği yazı boyutuna eşit; taban çizgisi kutunun %80'inde
        let baseline_mm = match slot.y {
            Vertical::Top(top) => self.height_mm - top - size_mm * 0.8,
            Vertical::Bottom(bottom) => bottom + size_mm * 0.2,
        };

        PlacedText {
            text,
            x_mm,
            baseline_mm,
            size_pt,
            bold: slot.bold,
        }
    }
}

fn display_text(field: CanonicalField, value: &str) -> Option<String> {
    let value = value.trim();
    match field {
        CanonicalField::ProductionCountry if value.is_empty() => Some(PRODUCTION_CAPTION.to_string()),
        CanonicalField::ProductionCountry => Some(format!("{}: {}", PRODUCTION_CAPTION, value)),
        _ if value.is_empty() => None,
        _ => Some(value.to_string()),
    }
}

/// Helvetica ortalama karakter genişliğine göre tahmini genişlik
pub fn estimate_width_mm(text: &str, size_pt: f32, bold: bool) -> f32 {
    let em = if bold { 0.58 } else { 0.52 };
    text.chars().count() as f32 * size_pt * em * PT_TO_MM
}
