use crate::error::{EtiketError, Result};
use crate::render::{FontSize, LabelLayout};
use etiket_common::{CanonicalField, MappingRules};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const MIN_LABEL_MM: f32 = 20.0;
const MAX_LABEL_MM: f32 = 300.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub label_width_mm: f32,
    pub label_height_mm: f32,
    pub font_size: FontSize,
    /// Yerleşik Helvetica yerine kullanılacak TTF (Türkçe karakterler için)
    pub font_path: Option<PathBuf>,
    pub mapping: MappingRules,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Dosya yoksa varsayılan ayarlar döner
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| EtiketError::Config("Ana dizin bulunamadı".into()))?;
        Ok(home.join(".config").join("etiket").join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            label_width_mm: 40.0,
            label_height_mm: 40.0,
            font_size: FontSize::Medium,
            font_path: None,
            mapping: MappingRules::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_dimension("genişlik", self.label_width_mm)?;
        check_dimension("yükseklik", self.label_height_mm)?;
        Ok(())
    }

    /// Etiket boyutunu ayarlar
    pub fn set_size(&mut self, width_mm: f32, height_mm: f32) -> Result<()> {
        check_dimension("genişlik", width_mm)?;
        check_dimension("yükseklik", height_mm)?;
        self.label_width_mm = width_mm;
        self.label_height_mm = height_mm;
        Ok(())
    }

    /// Komut satırı seçenekleriyle birleştirilmiş yerleşim
    pub fn layout(
        &self,
        width_mm: Option<f32>,
        height_mm: Option<f32>,
        font_size: Option<FontSize>,
    ) -> Result<LabelLayout> {
        let width = width_mm.unwrap_or(self.label_width_mm);
        let height = height_mm.unwrap_or(self.label_height_mm);
        check_dimension("genişlik", width)?;
        check_dimension("yükseklik", height)?;
        Ok(LabelLayout::new(width, height, font_size.unwrap_or(self.font_size)))
    }

    /// `alan=değer` ataması. Para birimi ve açıklamada değer sabittir,
    /// diğer alanlarda sütun adıdır.
    pub fn assign_column(&mut self, assignment: &str) -> Result<CanonicalField> {
        let (name, value) = assignment
            .split_once('=')
            .map(|(n, v)| (n.trim(), v.trim()))
            .filter(|(n, v)| !n.is_empty() && !v.is_empty())
            .ok_or_else(|| {
                EtiketError::Config(format!("Geçersiz atama: {} (ör. barcode=EAN)", assignment))
            })?;

        let field = parse_field(name)?;
        match field {
            CanonicalField::Currency => self.mapping.currency = value.to_string(),
            CanonicalField::Note => self.mapping.note = value.to_string(),
            _ => {
                self.mapping.columns.insert(field, value.to_string());
            }
        }
        Ok(field)
    }
}

/// Alan adını okur: `product_code` ya da `Ürün Kodu`
pub fn parse_field(name: &str) -> Result<CanonicalField> {
    serde_json::from_value(serde_json::Value::String(name.trim().to_lowercase()))
        .ok()
        .or_else(|| CanonicalField::from_label(name))
        .ok_or_else(|| EtiketError::Config(format!("Bilinmeyen alan: {}", name)))
}

fn check_dimension(name: &str, value: f32) -> Result<()> {
    if !(MIN_LABEL_MM..=MAX_LABEL_MM).contains(&value) {
        return Err(EtiketError::Config(format!(
            "Etiket {} {}mm olamaz ({}-{}mm arası olmalı)",
            name, value, MIN_LABEL_MM, MAX_LABEL_MM
        )));
    }
    Ok(())
}

/// "50x30" biçimindeki boyutu okur
pub fn parse_size(text: &str) -> Result<(f32, f32)> {
    let invalid = || EtiketError::Config(format!("Geçersiz boyut: {} (ör. 40x40)", text));
    let (w, h) = text
        .trim()
        .to_lowercase()
        .split_once(['x', '×', '*'])
        .map(|(w, h)| (w.trim().to_string(), h.trim().to_string()))
        .ok_or_else(invalid)?;

    let width: f32 = w.replace(',', ".").parse().map_err(|_| invalid())?;
    let height: f32 = h.replace(',', ".").parse().map_err(|_| invalid())?;
    check_dimension("genişlik", width)?;
    check_dimension("yükseklik", height)?;
    Ok((width, height))
}
