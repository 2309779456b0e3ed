//! Reading form snapshots from disk.
//!
//! Field contents are never validated here (the normalizer handles that);
//! a snapshot only has to be a JSON object.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde_json::Value;

use crate::error::{AppError, EXIT_INPUT};
use crate::normalize::RawInput;

/// Read a single snapshot object.
pub fn read_snapshot(path: &Path) -> Result<RawInput, AppError> {
    let file = File::open(path).map_err(|e| AppError::io("open snapshot", path, e))?;
    let value: Value = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Invalid snapshot JSON '{}': {e}", path.display())))?;
    into_object(value).ok_or_else(|| {
        AppError::new(
            EXIT_INPUT,
            format!("Snapshot '{}' must be a JSON object.", path.display()),
        )
    })
}

/// Read one snapshot object per non-blank line.
pub fn read_snapshots_jsonl(path: &Path) -> Result<Vec<RawInput>, AppError> {
    let file = File::open(path).map_err(|e| AppError::io("open snapshot file", path, e))?;

    let mut out = Vec::new();
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|e| AppError::io("read snapshot file", path, e))?;
        if line.trim().is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(&line).map_err(|e| {
            AppError::new(
                EXIT_INPUT,
                format!("Invalid JSON on line {line_no} of '{}': {e}", path.display()),
            )
        })?;
        let snapshot = into_object(value).ok_or_else(|| {
            AppError::new(
                EXIT_INPUT,
                format!("Line {line_no} of '{}' is not a JSON object.", path.display()),
            )
        })?;
        out.push(snapshot);
    }
    Ok(out)
}

fn into_object(value: Value) -> Option<RawInput> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("quote-fees-input-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn reads_object_snapshot() {
        let path = temp_file("one.json", r#"{"serviceTaas": "yes", "numEntities": "2"}"#);
        let snapshot = read_snapshot(&path).unwrap();
        assert_eq!(snapshot.get("numEntities"), Some(&Value::from("2")));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn rejects_non_object_snapshot() {
        let path = temp_file("array.json", "[1, 2, 3]");
        let err = read_snapshot(&path).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_INPUT);
        assert!(err.to_string().contains("JSON object"));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn jsonl_skips_blank_lines_and_reports_bad_line_numbers() {
        let good = temp_file("good.jsonl", "{\"a\":1}\n\n{\"b\":2}\n");
        assert_eq!(read_snapshots_jsonl(&good).unwrap().len(), 2);
        std::fs::remove_file(good).ok();

        let bad = temp_file("bad.jsonl", "{\"a\":1}\n\"oops\"\n");
        let err = read_snapshots_jsonl(&bad).unwrap_err();
        assert!(err.to_string().contains("Line 2"));
        std::fs::remove_file(bad).ok();
    }

    #[test]
    fn missing_file_is_input_error() {
        let err = read_snapshot(Path::new("/definitely/not/here.json")).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_INPUT);
    }
}
