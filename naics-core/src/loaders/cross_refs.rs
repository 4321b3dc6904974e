//! Cross-References Loader
//!
//! Turns the free-text "Cross-Reference" cells into an adjacency map from
//! each code to the codes its text mentions. Columns: Code | Cross-Reference

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::{info, warn};

use super::file_label;
use crate::code::zero_pad;
use crate::columns::find_column;
use crate::error::CoreResult;
use crate::sheet::{Sheet, SheetOptions};

static REFERENCED_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{4,6})\b").expect("Invalid reference regex"));

/// Code key to sorted, de-duplicated referenced code keys
pub type CrossReferenceMap = BTreeMap<String, Vec<String>>;

/// Load the cross-reference workbook; a missing or unreadable file yields an
/// empty map.
pub fn load_cross_references(path: &Path) -> CrossReferenceMap {
    if !path.exists() {
        warn!("Cross-references file not found at {:?}, skipping", path);
        return CrossReferenceMap::new();
    }

    let result = Sheet::read(path, &SheetOptions::default())
        .and_then(|sheet| parse_cross_references(&sheet));

    match result {
        Ok((map, references)) => {
            info!(
                "{}: extracted {} naics codes with {} total references",
                file_label(path),
                map.len(),
                references
            );
            map
        }
        Err(e) => {
            warn!("Could not load cross-references from {:?}: {}", path, e);
            CrossReferenceMap::new()
        }
    }
}

/// Build the adjacency map.
///
/// Every 4-6 digit token in the reference text is padded to a key. Self
/// references are removed. Also returns the number of extracted references
/// before de-duplication.
pub fn parse_cross_references(sheet: &Sheet) -> CoreResult<(CrossReferenceMap, usize)> {
    let code_col = find_column(sheet, &["code"], 0)?;
    let text_col = find_column(sheet, &["cross", "refer"], 1)?;

    let mut grouped: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    let mut references = 0;

    for row in 0..sheet.len() {
        let Some(code) = zero_pad(sheet.cell(row, code_col)) else {
            continue;
        };

        for caps in REFERENCED_CODE.captures_iter(sheet.cell(row, text_col)) {
            let Some(referenced) = zero_pad(&caps[1]) else {
                continue;
            };
            references += 1;
            grouped.entry(code.clone()).or_default().insert(referenced);
        }
    }

    let map = grouped
        .into_iter()
        .map(|(code, refs)| {
            let related = refs.into_iter().filter(|r| *r != code).collect();
            (code, related)
        })
        .collect();

    Ok((map, references))
}
