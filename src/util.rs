use serde::Deserialize;
use tracing::{error, warn};

use crate::StdResult;

pub trait ResLog<T, E> {
    fn twarn(self) -> StdResult<T, E>;
    fn terror(self) -> StdResult<T, E>;
}

impl<T, E: std::fmt::Display> ResLog<T, E> for StdResult<T, E> {
    #[track_caller]
    fn twarn(self) -> StdResult<T, E> {
        let loc = std::panic::Location::caller();
        self.inspect_err(|err| {
            warn!(
                %err,
                "Error at {}:{}:{}",
                loc.file().replace("\\", "/"),
                loc.line(),
                loc.column()
            );
        })
    }

    #[track_caller]
    fn terror(self) -> StdResult<T, E> {
        let loc = std::panic::Location::caller();
        self.inspect_err(|err| {
            error!(
                %err,
                "Error at {}:{}:{}",
                loc.file().replace("\\", "/"),
                loc.line(),
                loc.column()
            );
        })
    }
}

fn count_digits(bytes: &[u8], start: usize) -> usize {
    bytes
        .get(start..)
        .map_or(0, |rest| rest.iter().take_while(|b| b.is_ascii_digit()).count())
}

/// Parses the leading integer of `s`, ignoring whatever follows it
/// (`"440abc"` is `440`, `"1.5"` is `1`).
pub fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let sign = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits = count_digits(bytes, sign);
    if digits == 0 {
        return None;
    }
    s[..sign + digits].parse().ok()
}

/// Parses the leading decimal number of `s`, ignoring whatever follows it
/// (`"50.5%"` is `50.5`, `"abc"` is `None`).
pub fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let sign = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    if s[sign..].starts_with("Infinity") {
        return Some(if bytes[0] == b'-' {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_digits = count_digits(bytes, sign);
    let mut end = sign + int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(bytes, end + 1);
        if frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let exp_sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_digits = count_digits(bytes, end + 1 + exp_sign);
        if exp_digits > 0 {
            end += 1 + exp_sign + exp_digits;
        }
    }

    s[..end].parse().ok()
}

/// Parses the whole of `s` as a number literal: decimal (`"1.5e3"`, `".5"`),
/// `0x`/`0o`/`0b` integers, or exactly `Infinity`. Blank text is `0`.
/// Spellings like `"inf"` or `"NaN"` and trailing junk are `None`.
pub fn parse_number_literal(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return Some(0.0);
    }

    match s {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    let radix = match s.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return u128::from_str_radix(&s[2..], radix)
            .ok()
            .filter(|_| !s[2..].starts_with('+'))
            .map(|n| n as f64);
    }

    let is_decimal = s
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !is_decimal || !s.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Accepts any JSON value where a string is expected. Null and missing
/// become empty, other scalars keep their JSON text.
pub fn lenient_string<'de, D>(deserializer: D) -> StdResult<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

/// Accepts numbers or numeric strings, falling back to `0`.
pub fn lenient_timestamp<'de, D>(deserializer: D) -> StdResult<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
            .unwrap_or(0),
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}
