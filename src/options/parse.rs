//! Query string tokenizer and value parsers.

use alloc::string::String;
use alloc::vec::Vec;

use super::ParseWarning;
use crate::config::CropOptions;
use crate::geometry::TargetRatio;

/// Values seen so far. `None` = key absent.
#[derive(Default)]
struct Seen {
    ratio: Option<TargetRatio>,
    normalize: Option<bool>,
    tolerance: Option<f64>,
}

/// Parse an option query string into options + warnings.
pub(crate) fn parse_query(query: &str) -> (CropOptions, Vec<ParseWarning>) {
    let mut seen = Seen::default();
    let mut warnings = Vec::new();

    for pair in split_query(query) {
        let (raw_key, raw_value) = split_pair(pair);
        let key = percent_decode(raw_key).to_ascii_lowercase();
        let value = percent_decode(raw_value);

        dispatch_key(&key, &value, &mut seen, &mut warnings);
    }

    let mut options = CropOptions::default();
    if let Some(r) = seen.ratio {
        options = options.target_ratio(r);
    }
    if let Some(n) = seen.normalize {
        options = options.normalize(n);
    }
    if let Some(t) = seen.tolerance {
        options = options.tolerance(t);
    }
    (options, warnings)
}

fn dispatch_key(key: &str, value: &str, seen: &mut Seen, warnings: &mut Vec<ParseWarning>) {
    match key {
        "ratio" | "aspect" | "ar" => match parse_ratio(value) {
            Some(r) => set_or_warn(&mut seen.ratio, r, key, value, warnings),
            None => warnings.push(ParseWarning::ValueInvalid {
                key: "ratio",
                value: String::from(value),
                reason: "expected W:H, WxH, W/H or a positive decimal",
            }),
        },
        "normalize" | "adjust" => match parse_bool(value) {
            Some(b) => set_or_warn(&mut seen.normalize, b, key, value, warnings),
            None => warnings.push(ParseWarning::ValueInvalid {
                key: "normalize",
                value: String::from(value),
                reason: "expected true|false|1|0|yes|no|on|off",
            }),
        },
        "tolerance" | "tol" => match parse_positive_f64(value) {
            Some(t) => set_or_warn(&mut seen.tolerance, t, key, value, warnings),
            None => warnings.push(ParseWarning::ValueInvalid {
                key: "tolerance",
                value: String::from(value),
                reason: "expected a positive decimal",
            }),
        },
        _ => warnings.push(ParseWarning::KeyNotRecognized {
            key: String::from(key),
            value: String::from(value),
        }),
    }
}

fn set_or_warn<T>(
    field: &mut Option<T>,
    parsed: T,
    key: &str,
    value: &str,
    warnings: &mut Vec<ParseWarning>,
) {
    if field.is_some() {
        warnings.push(ParseWarning::DuplicateKey {
            key: String::from(key),
            value: String::from(value),
        });
    }
    *field = Some(parsed);
}

// ============================================================================
// Value parsers
// ============================================================================

pub(crate) fn parse_ratio(s: &str) -> Option<TargetRatio> {
    let s = s.trim();
    let split = s.find([':', 'x', 'X', '/']);
    match split {
        Some(pos) => {
            let w = s[..pos].trim().parse::<u32>().ok()?;
            let h = s[pos + 1..].trim().parse::<u32>().ok()?;
            TargetRatio::new(w, h).ok()
        }
        None => TargetRatio::from_f64(s.parse::<f64>().ok()?).ok(),
    }
}

fn parse_positive_f64(s: &str) -> Option<f64> {
    let v = s.trim().parse::<f64>().ok()?;
    (v.is_finite() && v > 0.0).then_some(v)
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

// ============================================================================
// Tokenizer
// ============================================================================

fn split_query(query: &str) -> impl Iterator<Item = &str> {
    let query = query.strip_prefix('?').unwrap_or(query);
    query.split('&').filter(|s| !s.is_empty())
}

fn split_pair(pair: &str) -> (&str, &str) {
    pair.split_once('=').unwrap_or((pair, ""))
}

/// Decode `+` and `%XX`. Malformed escapes pass through literally.
fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                match (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push(hi << 4 | lo);
                        i += 3;
                    }
                    _ => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
