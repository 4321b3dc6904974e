//! SBA Size Standards Loader
//!
//! Reads the "table_of_size_standards-all" worksheet of the SBA table and
//! reduces each code to one metric and one integer threshold.

use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

use super::file_label;
use crate::code::zero_pad;
use crate::columns::find_column;
use crate::error::CoreResult;
use crate::record::SizeMetric;
use crate::sheet::{Sheet, SheetOptions};

/// Worksheet holding the full size standard table
pub const SBA_WORKSHEET: &str = "table_of_size_standards-all";

/// Size standard for one code key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeStandard {
    pub code: String,
    pub metric: SizeMetric,
    /// Dollars for receipts, headcount for employees
    pub max: i64,
}

impl SizeStandard {
    /// Resolve a threshold from the two optional columns; receipts win
    pub fn from_columns(code: String, receipts_millions: Option<f64>, employees: Option<f64>) -> Option<Self> {
        match (receipts_millions, employees) {
            (Some(millions), _) => Some(Self {
                code,
                metric: SizeMetric::Receipts,
                max: (millions * 1_000_000.0).round() as i64,
            }),
            (None, Some(count)) => Some(Self {
                code,
                metric: SizeMetric::Employees,
                max: count as i64,
            }),
            (None, None) => None,
        }
    }
}

/// Load the SBA table; a missing or unreadable file yields no rows
pub fn load_size_standards(path: &Path) -> Vec<SizeStandard> {
    if !path.exists() {
        warn!("SBA size standards file not found at {:?}, skipping", path);
        return Vec::new();
    }

    let result = Sheet::read(path, &SheetOptions::worksheet(SBA_WORKSHEET))
        .and_then(|mut sheet| parse_size_standards(&mut sheet));

    match result {
        Ok(rows) => {
            info!("{}: processed {} size standards", file_label(path), rows.len());
            rows
        }
        Err(e) => {
            warn!("Error processing SBA size standards file {:?}: {}", path, e);
            Vec::new()
        }
    }
}

/// Normalize size standard rows, first occurrence of each code wins.
///
/// Header names are flattened (newlines to spaces) before column lookup.
/// Rows whose code cell does not start with a digit are section banners and
/// are skipped.
pub fn parse_size_standards(sheet: &mut Sheet) -> CoreResult<Vec<SizeStandard>> {
    sheet.map_headers(|h| h.to_lowercase().replace('\n', " ").trim().to_string());

    let code_col = find_column(sheet, &["naics codes"], 0)?;
    let receipts_col = find_column(sheet, &["millions of dollars"], 2)?;
    let employees_col = find_column(sheet, &["number of employees"], 3)?;

    let mut seen = HashSet::new();
    let mut rows = Vec::new();

    for row in 0..sheet.len() {
        let raw_code = sheet.cell(row, code_col);
        if !raw_code.starts_with(|c: char| c.is_ascii_digit()) {
            continue;
        }
        let Some(code) = parse_number(raw_code)
            .map(|n| (n as i64).to_string())
            .and_then(|digits| zero_pad(&digits))
        else {
            continue;
        };

        let receipts = parse_number(sheet.cell(row, receipts_col));
        let employees = parse_number(sheet.cell(row, employees_col));
        let Some(standard) = SizeStandard::from_columns(code, receipts, employees) else {
            continue;
        };

        if seen.insert(standard.code.clone()) {
            rows.push(standard);
        }
    }

    Ok(rows)
}

/// Parse a numeric cell, tolerating thousands separators and `$`
fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '$')
        .collect();
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}
