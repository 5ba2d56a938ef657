use anyhow::{bail, Context};
use clap::Parser;
use etiket::cli::{Cli, Commands, LayoutArgs};
use etiket::config::{self, Config};
use etiket::render::{self, code128};
use etiket::scan::{self, PrintSettings};
use etiket::{importer, logging};
use etiket_common::{CanonicalField, FieldSource, ImportSummary, LabelData, LabelSession};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing::warn;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::config_path()?,
    };
    let mut config = Config::load_from(&config_path)
        .with_context(|| format!("Ayar dosyası okunamadı: {}", config_path.display()))?;

    match cli.command {
        Commands::Inspect { file, aliases, json } => {
            let (session, summary) = open_session(&file, &config, aliases)?;
            let Some(mapping) = session.mapping() else {
                bail!("Eşleme oluşturulamadı");
            };

            if json {
                let out = serde_json::json!({ "summary": summary, "mapping": mapping });
                println!("{}", serde_json::to_string_pretty(&out)?);
                return Ok(());
            }

            println!("📄 {} - {} satır\n", file.display(), summary.row_count);
            println!("Sütunlar: {}\n", summary.headers.join(" | "));
            for field in CanonicalField::ALL {
                match mapping.get(field) {
                    Some(mapped) => match &mapped.source {
                        FieldSource::Column(column) => {
                            println!("✔ {:<12} ← {} ({})", field.label(), column, mapped.rule)
                        }
                        FieldSource::Constant(value) => {
                            println!("✔ {:<12} = {} ({})", field.label(), value, mapped.rule)
                        }
                    },
                    None => println!("✖ {:<12} eşlenemedi", field.label()),
                }
            }

            if !summary.unresolved.is_empty() {
                println!("\n⚠ {} alan boş basılacak", summary.unresolved.len());
            }
        }

        Commands::List { file, aliases, json } => {
            let (session, summary) = open_session(&file, &config, aliases)?;
            let rows = session.rows();

            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
                return Ok(());
            }

            println!("{:<5} {:<15} {:<20} {:<12} {}", "#", "Barkod", "Marka", "Renk", "Beden");
            for row in &rows {
                println!(
                    "{:<5} {:<15} {:<20} {:<12} {}",
                    row.index + 1,
                    row.barcode,
                    row.brand,
                    row.color,
                    row.size
                );
            }
            println!("\n{} ürün", summary.row_count);
        }

        Commands::Label { file, barcode, row, output, layout, aliases, json } => {
            let (mut session, _) = open_session(&file, &config, aliases)?;

            let label = match (barcode, row) {
                (Some(code), _) => session.lookup(&code)?.clone(),
                (None, Some(row)) if row > 0 => session.select_row(row - 1)?.clone(),
                (None, Some(row)) => bail!("Satır numarası 1'den başlar: {}", row),
                (None, None) => bail!("--barcode veya --row gerekli"),
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&label)?);
                return Ok(());
            }

            let settings = print_settings(&config, &layout, PathBuf::new())?;
            let output_path = render::output_path_for_label(output.as_deref(), label.barcode());
            render::write_pdf(
                std::slice::from_ref(&label),
                &settings.layout,
                settings.font_path.as_deref(),
                &output_path,
            )?;

            println!("{}", render::preview(&label));
            println!("✔ PDF çıktısı: {}", output_path.display());
        }

        Commands::Scan { file, output, layout, aliases } => {
            let (mut session, summary) = open_session(&file, &config, aliases)?;
            println!("✔ {} ürün yüklendi\n", summary.row_count);

            scan::ensure_output_dir(&output)?;
            let settings = print_settings(&config, &layout, output)?;
            scan::run_scan_loop(&mut session, &settings)?;
        }

        Commands::Batch { file, barcodes, output, layout, aliases } => {
            let (mut session, summary) = open_session(&file, &config, aliases)?;
            let settings = print_settings(&config, &layout, PathBuf::new())?;

            let wanted = match &barcodes {
                Some(list) => read_barcode_list(list)?,
                None => Vec::new(),
            };
            let total = if barcodes.is_some() { wanted.len() } else { summary.row_count };

            println!("[1/2] Etiketler hazırlanıyor...");
            let progress = ProgressBar::new(total as u64);
            progress.set_style(ProgressStyle::default_bar().template("{bar:40} {pos}/{len} {msg}")?);

            let mut labels = Vec::with_capacity(total);
            let mut skipped = 0;
            for i in 0..total {
                let result = if barcodes.is_some() {
                    session.lookup(&wanted[i]).map(LabelData::clone)
                } else {
                    session.select_row(i).map(LabelData::clone)
                };

                match result {
                    Ok(label) if code128::encode(label.barcode().trim()).is_ok() => labels.push(label),
                    Ok(label) => {
                        warn!(barcode = label.barcode(), "barkod Code 128 ile yazılamıyor, atlandı");
                        skipped += 1;
                    }
                    Err(e) => {
                        warn!(item = i + 1, error = %e, "etiket atlandı");
                        skipped += 1;
                    }
                }
                progress.inc(1);
            }
            progress.finish_and_clear();
            println!("✔ {} etiket hazır, {} atlandı\n", labels.len(), skipped);

            if labels.is_empty() {
                bail!("Basılacak etiket yok");
            }

            println!("[2/2] PDF oluşturuluyor...");
            let output_path = render::output_path_for_batch(output.as_deref());
            render::write_pdf(&labels, &settings.layout, settings.font_path.as_deref(), &output_path)?;
            println!("✔ PDF çıktısı: {} ({} sayfa)", output_path.display(), labels.len());
        }

        Commands::Config { show, set_size, set_font_size, set_font, set_column } => {
            let mut changed = false;

            if let Some(size) = set_size {
                let (width, height) = config::parse_size(&size)?;
                config.set_size(width, height)?;
                println!("✔ Etiket boyutu: {}x{}mm", width, height);
                changed = true;
            }
            if let Some(font_size) = set_font_size {
                config.font_size = font_size;
                println!("✔ Yazı boyutu: {}", font_size);
                changed = true;
            }
            if let Some(font) = set_font {
                if !font.is_file() {
                    bail!("Yazı tipi dosyası bulunamadı: {}", font.display());
                }
                println!("✔ Yazı tipi: {}", font.display());
                config.font_path = Some(font);
                changed = true;
            }
            if let Some(assignment) = set_column {
                let field = config.assign_column(&assignment)?;
                println!("✔ {} eşlemesi güncellendi", field.label());
                changed = true;
            }

            if changed {
                config.save_to(&config_path)?;
                println!("✔ Kaydedildi: {}", config_path.display());
            }
            if show || !changed {
                println!("{}", serde_json::to_string_pretty(&config)?);
                println!("\nAyar dosyası: {}", config_path.display());
            }
        }
    }

    Ok(())
}

fn open_session(file: &Path, config: &Config, aliases: bool) -> anyhow::Result<(LabelSession, ImportSummary)> {
    let rules = config
        .mapping
        .clone()
        .with_aliases(aliases || config.mapping.use_aliases);
    let dataset = importer::load_file(file)
        .with_context(|| format!("Dosya okunamadı: {}", file.display()))?;

    let mut session = LabelSession::new(rules);
    let summary = session.import(dataset)?;
    Ok((session, summary))
}

fn print_settings(config: &Config, args: &LayoutArgs, output_dir: PathBuf) -> anyhow::Result<PrintSettings> {
    Ok(PrintSettings {
        layout: config.layout(args.width, args.height, args.font_size)?,
        font_path: args.font.clone().or_else(|| config.font_path.clone()),
        output_dir,
    })
}

fn read_barcode_list(path: &Path) -> anyhow::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Barkod listesi okunamadı: {}", path.display()))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}
