use crate::render::FontSize;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "etiket")]
#[command(about = "Excel ürün listesinden barkodlu raf etiketi basma aracı", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Ayrıntılı günlük
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Ayar dosyası (varsayılan: ~/.config/etiket/config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Etiket boyutu seçenekleri (ayar dosyasını geçersiz kılar)
#[derive(clap::Args, Debug, Clone, Default)]
pub struct LayoutArgs {
    /// Etiket genişliği (mm)
    #[arg(long)]
    pub width: Option<f32>,

    /// Etiket yüksekliği (mm)
    #[arg(long)]
    pub height: Option<f32>,

    /// Yazı boyutu (small/medium/large)
    #[arg(long)]
    pub font_size: Option<FontSize>,

    /// Türkçe karakterler için TTF yazı tipi
    #[arg(long)]
    pub font: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Dosyayı okuyup sütun eşlemesini gösterir
    Inspect {
        /// Excel/CSV dosyası
        #[arg(required = true)]
        file: PathBuf,

        /// Türkçe sütun adı eşlemesini de dene
        #[arg(long)]
        aliases: bool,

        /// JSON olarak yaz
        #[arg(long)]
        json: bool,
    },

    /// Ürün tablosunu listeler (barkod, marka, renk, beden)
    List {
        #[arg(required = true)]
        file: PathBuf,

        #[arg(long)]
        aliases: bool,

        #[arg(long)]
        json: bool,
    },

    /// Tek etiket basar
    Label {
        #[arg(required = true)]
        file: PathBuf,

        /// Aranacak barkod
        #[arg(short, long, conflicts_with = "row", required_unless_present = "row")]
        barcode: Option<String>,

        /// Tablo satırı (1'den başlar)
        #[arg(short, long)]
        row: Option<usize>,

        /// Çıktı PDF dosyası veya dizini
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,

        #[arg(long)]
        aliases: bool,

        /// Etiket verisini JSON olarak yaz (PDF üretilmez)
        #[arg(long)]
        json: bool,
    },

    /// Barkod okuyucu ile sürekli etiket basma
    Scan {
        #[arg(required = true)]
        file: PathBuf,

        /// Etiketlerin yazılacağı dizin
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        #[command(flatten)]
        layout: LayoutArgs,

        #[arg(long)]
        aliases: bool,
    },

    /// Tüm satırlar (veya verilen barkodlar) için çok sayfalı PDF
    Batch {
        #[arg(required = true)]
        file: PathBuf,

        /// Barkod listesi dosyası (her satırda bir barkod)
        #[arg(long)]
        barcodes: Option<PathBuf>,

        /// Çıktı PDF dosyası veya dizini
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,

        #[arg(long)]
        aliases: bool,
    },

    /// Ayarları göster/değiştir
    Config {
        /// Ayarları göster
        #[arg(long)]
        show: bool,

        /// Etiket boyutu (ör. 40x40)
        #[arg(long)]
        set_size: Option<String>,

        /// Varsayılan yazı boyutu
        #[arg(long)]
        set_font_size: Option<FontSize>,

        /// Varsayılan TTF yazı tipi
        #[arg(long)]
        set_font: Option<PathBuf>,

        /// Alan için sütun adı (ör. --set-column barcode=EAN)
        #[arg(long)]
        set_column: Option<String>,
    },
}
