//! Numeric coercion for calculator fields
//!
//! The calculator sends whatever the user typed. Anything that does not read
//! as a number becomes `None` and is stored as an empty cell instead of
//! failing the write.

use boom_types::FieldValue;
use once_cell::sync::Lazy;
use regex::Regex;

static LEADING_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([+-]?(?:\d+(?:\.\d*)?|\.\d+))").expect("leading number regex is valid")
});

/// Parse a measurement; rejects blanks, NaN and infinities
pub fn parse_number(value: Option<&FieldValue>) -> Option<f64> {
    let number = match value? {
        FieldValue::Number(n) => *n,
        FieldValue::Text(s) => s.trim().replace(',', "").parse::<f64>().ok()?,
        FieldValue::Other(_) => return None,
    };
    number.is_finite().then_some(number)
}

/// Parse a whole, non-negative count such as segments or anchors
pub fn parse_count(value: Option<&FieldValue>) -> Option<u32> {
    let number = parse_number(value)?;
    if number < 0.0 || number.fract() != 0.0 || number > u32::MAX as f64 {
        return None;
    }
    Some(number as u32)
}

/// Parse an anchor interval.
///
/// Accepts a bare number (`"150"`), a lower bound (`"200+"`) or a rate
/// (`"1 per 100 ft"`); the result is always the leading number.
pub fn parse_interval(value: Option<&FieldValue>) -> Option<f64> {
    match value? {
        FieldValue::Number(n) => n.is_finite().then_some(*n),
        FieldValue::Text(s) => LEADING_NUMBER
            .captures(s)
            .and_then(|caps| caps[1].parse::<f64>().ok())
            .filter(|n| n.is_finite()),
        FieldValue::Other(_) => None,
    }
}
