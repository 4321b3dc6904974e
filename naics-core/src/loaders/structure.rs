//! Structure Loader
//!
//! Hierarchy titles and change indicators. The vendor sheet carries two
//! banner rows above its header.

use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

use super::descriptions::clean_title;
use super::file_label;
use crate::code::zero_pad;
use crate::columns::find_column;
use crate::error::CoreResult;
use crate::sheet::{Sheet, SheetOptions};

/// Row index of the structure sheet header
pub const STRUCTURE_HEADER_ROW: usize = 2;

/// One structure row keyed by padded code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureRow {
    pub code: String,
    pub title: String,
    pub change_indicator: Option<String>,
    pub source: String,
}

/// Load the structure workbook; a missing or unreadable file yields no rows
pub fn load_structure(path: &Path, source: &str) -> Vec<StructureRow> {
    if !path.exists() {
        warn!("Structure file not found at {:?}, skipping", path);
        return Vec::new();
    }

    let result = Sheet::read(path, &SheetOptions::header_at(STRUCTURE_HEADER_ROW))
        .and_then(|sheet| parse_structure(&sheet, source));

    match result {
        Ok(rows) => {
            info!("{}: loaded {} records", file_label(path), rows.len());
            rows
        }
        Err(e) => {
            warn!("Error with NAICS structure file {:?}: {}", path, e);
            Vec::new()
        }
    }
}

/// Normalize structure rows, first occurrence of each code wins
pub fn parse_structure(sheet: &Sheet, source: &str) -> CoreResult<Vec<StructureRow>> {
    let code_col = find_column(sheet, &["code"], 1)?;
    let title_col = find_column(sheet, &["title"], 2)?;
    let change_col = find_column(sheet, &["change", "indicator"], 0)?;

    let mut seen = HashSet::new();
    let mut rows = Vec::new();

    for row in 0..sheet.len() {
        let Some(code) = zero_pad(sheet.cell(row, code_col)) else {
            continue;
        };
        if !seen.insert(code.clone()) {
            continue;
        }

        let change = sheet.cell(row, change_col).trim();
        rows.push(StructureRow {
            code,
            title: clean_title(sheet.cell(row, title_col)).0,
            change_indicator: (!change.is_empty()).then(|| change.to_string()),
            source: source.to_string(),
        });
    }

    Ok(rows)
}
