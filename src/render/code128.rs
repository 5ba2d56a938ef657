//! Code 128 barkod kodlayıcı
//!
//! Yalnızca rakamdan oluşan uzun barkodlar (EAN-13 gibi) C kümesiyle,
//! diğerleri B kümesiyle kodlanır.

use crate::error::{EtiketError, Result};

/// Her sembolün çubuk/boşluk genişlikleri (modül cinsinden)
const PATTERNS: [&str; 107] = [
    "212222", "222122", "222221", "121223", "121322", "131222", "122213", "122312", "132212", "221213",
    "221312", "231212", "112232", "122132", "122231", "113222", "123122", "123221", "223211", "221132",
    "221231", "213212", "223112", "312131", "311222", "321122", "321221", "312212", "322112", "322211",
    "212123", "212321", "232121", "111323", "131123", "131321", "112313", "132113", "132311", "211313",
    "231113", "231311", "112133", "112331", "132131", "113123", "113321", "133121", "313121", "211331",
    "231131", "213113", "213311", "213131", "311123", "311321", "331121", "312113", "312311", "332111",
    "314111", "221411", "431111", "111224", "111422", "121124", "121421", "141122", "141221", "112214",
    "112412", "122114", "122411", "142112", "142211", "241211", "221114", "413111", "241112", "134111",
    "111242", "121142", "121241", "114212", "124112", "124211", "411212", "421112", "421211", "212141",
    "214121", "412121", "111143", "111341", "131141", "114113", "114311", "411113", "411311", "113141",
    "114131", "311141", "411131", "211412", "211214", "211232", "2331112",
];

const CODE_B: u8 = 100;
const START_B: u8 = 104;
const START_C: u8 = 105;
const STOP: u8 = 106;

/// Başlangıç, veri, kontrol ve bitiş sembolleri
pub fn encode(data: &str) -> Result<Vec<u8>> {
    if data.is_empty() {
        return Err(EtiketError::BarcodeEncode("boş barkod".into()));
    }

    let mut symbols = if use_code_c(data) {
        encode_c(data)
    } else {
        encode_b(data)?
    };

    symbols.push(checksum(&symbols));
    symbols.push(STOP);
    Ok(symbols)
}

fn use_code_c(data: &str) -> bool {
    data.len() >= 4 && data.bytes().all(|b| b.is_ascii_digit())
}

fn encode_c(digits: &str) -> Vec<u8> {
    let bytes = digits.as_bytes();
    let mut symbols = vec![START_C];

    let mut pairs = bytes.chunks_exact(2);
    for pair in &mut pairs {
        symbols.push((pair[0] - b'0') * 10 + (pair[1] - b'0'));
    }
    // tek haneli kalan B kümesine geçilerek yazılır
    if let [last] = pairs.remainder() {
        symbols.push(CODE_B);
        symbols.push(last - 32);
    }

    symbols
}

fn encode_b(data: &str) -> Result<Vec<u8>> {
    let mut symbols = vec![START_B];
    for ch in data.chars() {
        match ch {
            ' '..='\u{7f}' => symbols.push(ch as u8 - 32),
            _ => {
                return Err(EtiketError::BarcodeEncode(format!(
                    "'{}' karakteri Code 128 ile yazılamaz",
                    ch.escape_default()
                )))
            }
        }
    }
    Ok(symbols)
}

fn checksum(symbols: &[u8]) -> u8 {
    let sum: u32 = symbols
        .iter()
        .enumerate()
        .map(|(i, &value)| (i.max(1) as u32) * value as u32)
        .sum();
    (sum % 103) as u8
}

/// Soldan sağa modüller; `true` çubuk demektir
pub fn modules(data: &str) -> Result<Vec<bool>> {
    let symbols = encode(data)?;
    let mut out = Vec::with_capacity(symbols.len() * 11 + 2);

    for symbol in symbols {
        for (i, width) in PATTERNS[symbol as usize].bytes().enumerate() {
            let is_bar = i % 2 == 0;
            out.extend(std::iter::repeat(is_bar).take((width - b'0') as usize));
        }
    }

    Ok(out)
}

/// Ardışık çubukları (başlangıç modülü, genişlik) olarak birleştirir
pub fn bar_runs(modules: &[bool]) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut start = None;

    for (i, &is_bar) in modules.iter().enumerate() {
        match (is_bar, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                runs.push((s, i - s));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push((s, modules.len() - s));
    }

    runs
}
