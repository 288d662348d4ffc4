//! Cell parsing. Absent, blank and unparseable cells all become `None`,
//! never zero.

use serde_json::Value;

/// Finite number from a JSON number or a numeric string.
pub fn number(v: &Value) -> Option<f64> {
    let n = match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

/// Integral number (`4`, `4.0`, `"4"`); fractional values are rejected.
pub fn integer(v: &Value) -> Option<i64> {
    let n = number(v)?;
    (n.fract() == 0.0 && n.abs() < i64::MAX as f64).then_some(n as i64)
}

/// Trimmed, non-empty text. Spreadsheet NaN markers count as empty.
pub fn text(v: &Value) -> Option<String> {
    let s = match v {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    if s.is_empty() || s.eq_ignore_ascii_case("nan") {
        None
    } else {
        Some(s)
    }
}
