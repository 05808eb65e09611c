use crate::models::CellValue;

pub const DAYS_PER_YEAR: f64 = 365.0;
pub const WEEKS_PER_YEAR: f64 = 52.0;

pub fn to_real(cell: &CellValue) -> f64 {
    let value = match cell {
        CellValue::Int(value) => *value as f64,
        CellValue::Real(value) => *value,
        CellValue::Text(text) => parse_text(text),
        CellValue::Empty | CellValue::Other(_) => 0.0,
    };
    if value.is_finite() { value } else { 0.0 }
}

pub fn parse_text(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

pub fn div(a: f64, b: f64) -> f64 {
    if b == 0.0 { 0.0 } else { a / b }
}

pub fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

pub fn mean(values: &[f64]) -> f64 {
    div(sum(values), values.len() as f64)
}

pub fn count(mask: &[bool]) -> usize {
    mask.iter().filter(|flag| **flag).count()
}

pub fn proj365(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        sum(values) * DAYS_PER_YEAR / values.len() as f64
    }
}

pub fn sec_to(unit: &str, seconds: f64) -> f64 {
    match unit {
        "h" => seconds / 3_600.0,
        "d" => seconds / 86_400.0,
        "w" => seconds / 604_800.0,
        _ => seconds,
    }
}

/// Formats `value` with `decimals` decimals, a space as thousands separator
/// and a comma as decimal separator, e.g. `36 500,00`.
pub fn fmt(value: f64, decimals: usize) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let rendered = format!("{:.*}", decimals, value.abs());
    let (whole, fraction) = match rendered.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (rendered.as_str(), None),
    };

    let is_zero = rendered.bytes().all(|b| b == b'0' || b == b'.');
    let mut out = String::with_capacity(rendered.len() + whole.len() / 3 + 1);
    if value < 0.0 && !is_zero {
        out.push('-');
    }
    out.push_str(&group_thousands(whole));
    if let Some(fraction) = fraction {
        out.push(',');
        out.push_str(fraction);
    }
    out
}

pub fn fmt_int(value: f64) -> String {
    fmt(value, 0)
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}
