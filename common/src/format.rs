//! Etiket değeri biçimlendirme
//!
//! Tarih ve fiyat dönüşümleri hiçbir zaman hata vermez: geçersiz girdi
//! kendi metin haliyle geri döner, tek bir bozuk alan etiketi engellemez.

use crate::types::CellValue;
use chrono::{Days, NaiveDate};
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};

/// Excel gün numarasını ya da metni `GG/AA/YYYY` biçimine çevirir.
///
/// Excel 1900'ü artık yıl saydığı için 60'tan büyük değerlerden 1 düşülür.
/// Sayı olmayan metin olduğu gibi döner.
///
/// ```
/// use etiket_common::{format_date, CellValue};
///
/// assert_eq!(format_date(&CellValue::Number(44927.0)), "01/01/2023");
/// assert_eq!(format_date(&CellValue::from("15.03.2024")), "15.03.2024");
/// ```
pub fn format_date(value: &CellValue) -> String {
    let serial = match value {
        CellValue::Empty => return String::new(),
        CellValue::Number(n) => *n,
        CellValue::Text(text) => {
            if text.trim().is_empty() {
                return String::new();
            }
            match text.trim().parse::<f64>() {
                Ok(n) => n,
                Err(_) => return text.clone(),
            }
        }
    };

    // 0 boş hücre gibi davranır
    if serial == 0.0 {
        return String::new();
    }

    match serial_to_date(serial) {
        Some(date) => date.format("%d/%m/%Y").to_string(),
        None => value.to_string(),
    }
}

fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }

    let adjusted = if serial > 60.0 { serial - 1.0 } else { serial };
    // 1 → 01/01/1900; gün kesri atılır
    let base = NaiveDate::from_ymd_opt(1899, 12, 31)?;
    base.checked_add_days(Days::new(adjusted.trunc() as u64))
}

/// Fiyatı Türk biçiminde iki ondalıkla yazar: 1234.5 → "1.234,50".
///
/// Rakam, nokta ve virgül dışındaki karakterler atılır, ilk virgül
/// ondalık noktaya çevrilir ve baştaki sayı okunur. Okunamazsa ham
/// değer döner.
///
/// ```
/// use etiket_common::{format_price, CellValue};
///
/// assert_eq!(format_price(&CellValue::Number(1500.5)), "1.500,50");
/// assert_eq!(format_price(&CellValue::from("₺ 99,9")), "99,90");
/// ```
pub fn format_price(value: &CellValue) -> String {
    let raw = value.to_string();

    lazy_static::lazy_static! {
        static ref NON_NUMERIC: Regex = Regex::new(r"[^0-9.,]").unwrap();
    }
    let cleaned = NON_NUMERIC.replace_all(&raw, "").replacen(',', ".", 1);

    match parse_leading_decimal(&cleaned) {
        Some(amount) => format_tr_amount(amount),
        None => raw,
    }
}

/// Metnin başındaki ondalık sayıyı okur ("1.234.50" → 1.234)
fn parse_leading_decimal(text: &str) -> Option<f64> {
    lazy_static::lazy_static! {
        static ref LEADING: Regex = Regex::new(r"^([0-9]+\.?[0-9]*|\.[0-9]+)").unwrap();
    }
    LEADING
        .find(text)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|n| n.is_finite())
}

/// Binlik ayırıcı nokta, ondalık ayırıcı virgül.
/// Temizlenmiş tutar hiçbir zaman negatif değildir.
fn format_tr_amount(amount: f64) -> String {
    let fixed = round_to_cents(amount);
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*digit);
    }

    format!("{},{}", grouped, frac_part)
}

/// İki ondalığa yuvarlar; tam yarıda sıfırdan uzağa (0.125 → 0.13)
fn round_to_cents(amount: f64) -> String {
    match Decimal::from_f64_retain(amount) {
        Some(exact) => format!(
            "{:.2}",
            exact.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        ),
        None => format!("{:.2}", amount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_date_serials() {
        assert_eq!(format_date(&CellValue::Number(44927.0)), "01/01/2023");
        assert_eq!(format_date(&CellValue::Number(45366.0)), "15/03/2024");
        assert_eq!(format_date(&CellValue::Number(1.0)), "01/01/1900");
        assert_eq!(format_date(&CellValue::Number(59.0)), "28/02/1900");
        assert_eq!(format_date(&CellValue::Number(61.0)), "01/03/1900");
    }

    #[test]
    fn test_date_fraction_is_dropped() {
        assert_eq!(format_date(&CellValue::Number(44927.75)), "01/01/2023");
    }

    #[test]
    fn test_date_numeric_text() {
        assert_eq!(format_date(&CellValue::from(" 44927 ")), "01/01/2023");
    }

    #[test]
    fn test_date_passthrough() {
        assert_eq!(format_date(&CellValue::Empty), "");
        assert_eq!(format_date(&CellValue::from("")), "");
        assert_eq!(format_date(&CellValue::from("   ")), "");
        assert_eq!(format_date(&CellValue::Number(0.0)), "");
        assert_eq!(format_date(&CellValue::from("2023-01-01")), "2023-01-01");
        assert_eq!(format_date(&CellValue::Number(-5.0)), "-5");
        assert_eq!(format_date(&CellValue::from("inf")), "inf");
    }

    #[test]
    fn test_date_out_of_range_serial() {
        assert_eq!(format_date(&CellValue::Number(1e300)), CellValue::Number(1e300).to_string());
    }

    #[test]
    fn test_price_numbers() {
        assert_eq!(format_price(&CellValue::Number(1500.5)), "1.500,50");
        assert_eq!(format_price(&CellValue::Number(1234.5)), "1.234,50");
        assert_eq!(format_price(&CellValue::Number(0.0)), "0,00");
        assert_eq!(format_price(&CellValue::Number(999.0)), "999,00");
        assert_eq!(format_price(&CellValue::Number(1234567.891)), "1.234.567,89");
    }

    #[test]
    fn test_price_text_with_symbols() {
        assert_eq!(format_price(&CellValue::from("299,99 TL")), "299,99");
        assert_eq!(format_price(&CellValue::from("₺1500")), "1.500,00");
        assert_eq!(format_price(&CellValue::from(".5")), "0,50");
    }

    #[test]
    fn test_price_only_first_comma_becomes_point() {
        // "1.234,50" → "1.234.50" → baştaki sayı 1.234
        assert_eq!(format_price(&CellValue::from("1.234,50")), "1,23");
    }

    #[test]
    fn test_price_passthrough() {
        assert_eq!(format_price(&CellValue::Empty), "");
        assert_eq!(format_price(&CellValue::from("fiyat yok")), "fiyat yok");
        assert_eq!(format_price(&CellValue::from(",")), ",");
    }

    #[test]
    fn test_price_half_cent_rounds_up() {
        assert_eq!(format_price(&CellValue::Number(0.125)), "0,13");
        assert_eq!(format_price(&CellValue::Number(12.125)), "12,13");
        assert_eq!(format_price(&CellValue::Number(0.625)), "0,63");
        assert_eq!(format_price(&CellValue::Number(1.375)), "1,38");
        assert_eq!(format_price(&CellValue::from("2,125 TL")), "2,13");
    }

    #[test]
    fn test_price_below_binary_tie() {
        // 1.005 ikili gösterimde 1.00499... olduğundan aşağı yuvarlanır
        assert_eq!(format_price(&CellValue::Number(1.005)), "1,00");
    }

    #[test]
    fn test_price_minus_sign_is_dropped() {
        assert_eq!(format_price(&CellValue::from("-15")), "15,00");
    }

    #[test]
    fn test_huge_amount_falls_back() {
        let out = format_tr_amount(1e30);
        assert!(out.ends_with(",00"));
        assert!(out.starts_with("1.000.000"));
    }

    #[test]
    fn test_grouping() {
        assert_eq!(format_tr_amount(12.0), "12,00");
        assert_eq!(format_tr_amount(123456.0), "123.456,00");
        assert_eq!(format_tr_amount(1000000.0), "1.000.000,00");
    }

    proptest! {
        #[test]
        fn prop_price_never_panics(s in ".{0,24}") {
            let _ = format_price(&CellValue::Text(s));
        }

        #[test]
        fn prop_date_never_panics(n in any::<f64>()) {
            let _ = format_date(&CellValue::Number(n));
        }

        #[test]
        fn prop_price_shape(n in 0u32..10_000_000u32) {
            let out = format_price(&CellValue::Number(n as f64));
            prop_assert!(out.ends_with(",00"));
            prop_assert_eq!(out.replace('.', "").trim_end_matches(",00").to_string(), n.to_string());
        }
    }
}
