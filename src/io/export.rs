//! Export quote results.
//!
//! - full breakdown as pretty JSON
//! - per-service line items as CSV (spreadsheet friendly)
//! - batch results as JSON lines, one breakdown per input line

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::FeeBreakdown;
use crate::error::{AppError, EXIT_INPUT};

pub fn write_breakdown_json(path: &Path, breakdown: &FeeBreakdown) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| AppError::io("create breakdown JSON", path, e))?;
    serde_json::to_writer_pretty(BufWriter::new(file), breakdown)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to write breakdown JSON: {e}")))?;
    Ok(())
}

/// One row per service plus a `combined` row.
pub fn write_line_items_csv(path: &Path, breakdown: &FeeBreakdown) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| AppError::io("create line-item CSV", path, e))?;
    let mut out = BufWriter::new(file);
    let write_err = |e: std::io::Error| AppError::io("write line-item CSV", path, e);

    writeln!(out, "service,monthly_fee,setup_fee").map_err(write_err)?;
    for item in breakdown.line_items() {
        writeln!(out, "{},{:.2},{:.2}", item.service, item.monthly_fee, item.setup_fee).map_err(write_err)?;
    }
    writeln!(
        out,
        "combined,{:.2},{:.2}",
        breakdown.combined.monthly_fee, breakdown.combined.setup_fee
    )
    .map_err(write_err)?;
    out.flush().map_err(write_err)?;
    Ok(())
}

pub fn write_breakdowns_jsonl(path: &Path, breakdowns: &[FeeBreakdown]) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| AppError::io("create batch output", path, e))?;
    let mut out = BufWriter::new(file);
    for breakdown in breakdowns {
        let line = serde_json::to_string(breakdown)
            .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to encode breakdown: {e}")))?;
        writeln!(out, "{line}").map_err(|e| AppError::io("write batch output", path, e))?;
    }
    out.flush().map_err(|e| AppError::io("write batch output", path, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_item_csv_has_every_service_and_total() {
        let mut breakdown = FeeBreakdown::zero();
        breakdown.payroll.monthly_fee = 136.0;
        breakdown.combined.monthly_fee = 150.0;

        let path = std::env::temp_dir().join(format!("quote-fees-lines-{}.csv", std::process::id()));
        write_line_items_csv(&path, &breakdown).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "service,monthly_fee,setup_fee");
        assert_eq!(lines.len(), 1 + 11 + 1);
        assert!(lines.contains(&"payroll,136.00,0.00"));
        assert_eq!(lines.last(), Some(&"combined,150.00,0.00"));
    }

    #[test]
    fn jsonl_writes_one_line_per_breakdown() {
        let path = std::env::temp_dir().join(format!("quote-fees-batch-{}.jsonl", std::process::id()));
        write_breakdowns_jsonl(&path, &[FeeBreakdown::zero(), FeeBreakdown::zero()]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(text.lines().count(), 2);
        let first: serde_json::Value = serde_json::from_str(text.lines().next().unwrap()).unwrap();
        assert_eq!(first["combined"]["monthlyFee"], 0.0);
    }
}
