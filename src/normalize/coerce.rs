//! Lenient value coercion for form snapshots.
//!
//! Form layers send numbers as strings, booleans as `"on"`, lists as
//! comma-separated text, and sometimes garbage. Each helper returns `None` for
//! anything it cannot interpret, and the caller substitutes the documented
//! default. Nothing here fails.

use chrono::NaiveDate;
use serde_json::Value;

pub fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()).map(|v| v != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "y" | "on" | "1" => Some(true),
            "false" | "no" | "n" | "off" | "0" | "" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// A finite number from a JSON number or numeric string.
pub fn as_f64(value: &Value) -> Option<f64> {
    let v = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let cleaned: String = s.trim().chars().filter(|c| !matches!(c, '$' | ',')).collect();
            cleaned.parse::<f64>().ok()?
        }
        _ => return None,
    };
    if v.is_finite() { Some(v) } else { None }
}

/// A non-negative whole count (fractions are truncated).
pub fn as_count(value: &Value) -> Option<u32> {
    let v = as_f64(value)?;
    if v < 0.0 {
        return None;
    }
    Some(v.trunc().min(u32::MAX as f64) as u32)
}

/// Trimmed, non-empty text. Numbers are accepted and rendered as text.
pub fn as_text(value: &Value) -> Option<String> {
    let s = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    if s.is_empty() { None } else { Some(s) }
}

/// A list of text items from an array or a comma-separated string.
pub fn as_text_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(as_text).collect(),
        Value::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

pub fn as_date(value: &Value) -> Option<NaiveDate> {
    let s = as_text(value)?;
    // Accept a full timestamp by keeping only the date part.
    let date_part = s.split(['T', ' ']).next().unwrap_or(&s);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// A four-digit filing year.
pub fn as_year(text: &str) -> Option<i32> {
    let t = text.trim();
    if t.len() != 4 || !t.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    t.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bools_accept_common_form_encodings() {
        assert_eq!(as_bool(&json!(true)), Some(true));
        assert_eq!(as_bool(&json!("on")), Some(true));
        assert_eq!(as_bool(&json!("No")), Some(false));
        assert_eq!(as_bool(&json!(1)), Some(true));
        assert_eq!(as_bool(&json!(0)), Some(false));
        assert_eq!(as_bool(&json!("maybe")), None);
        assert_eq!(as_bool(&json!(null)), None);
    }

    #[test]
    fn numbers_reject_non_finite_and_garbage() {
        assert_eq!(as_f64(&json!("1,250.50")), Some(1250.5));
        assert_eq!(as_f64(&json!("$300")), Some(300.0));
        assert_eq!(as_f64(&json!("NaN")), None);
        assert_eq!(as_f64(&json!("inf")), None);
        assert_eq!(as_f64(&json!("abc")), None);
        assert_eq!(as_f64(&json!([1])), None);
    }

    #[test]
    fn counts_truncate_and_reject_negatives() {
        assert_eq!(as_count(&json!("7.9")), Some(7));
        assert_eq!(as_count(&json!(-2)), None);
        assert_eq!(as_count(&json!(3)), Some(3));
    }

    #[test]
    fn lists_accept_arrays_and_csv_text() {
        assert_eq!(as_text_list(&json!(["2023", 2022, null])), vec!["2023", "2022"]);
        assert_eq!(as_text_list(&json!("2024-01, 2024-02,")), vec!["2024-01", "2024-02"]);
        assert!(as_text_list(&json!(42)).is_empty());
    }

    #[test]
    fn dates_and_years() {
        assert_eq!(
            as_date(&json!("2025-06-15T10:00:00Z")),
            NaiveDate::from_ymd_opt(2025, 6, 15)
        );
        assert_eq!(as_date(&json!("15/06/2025")), None);
        assert_eq!(as_year("2021"), Some(2021));
        assert_eq!(as_year("21"), None);
        assert_eq!(as_year("20x1"), None);
    }
}
