//! 2-6 Digit Code List Loader
//!
//! Reference list used only to mark merged records as validated.
//! Columns: Seq. No. | 2022 NAICS US Code | 2022 NAICS US Title

use std::collections::BTreeSet;
use std::path::Path;
use tracing::{info, warn};

use super::file_label;
use crate::code::zero_pad;
use crate::columns::find_column;
use crate::error::CoreResult;
use crate::sheet::{Sheet, SheetOptions};

/// Load the set of valid code keys; a missing or unreadable file yields an
/// empty set.
pub fn load_valid_codes(path: &Path) -> BTreeSet<String> {
    if !path.exists() {
        warn!("2-6 digit codes file not found at {:?}, skipping", path);
        return BTreeSet::new();
    }

    let result = Sheet::read(path, &SheetOptions::default())
        .and_then(|sheet| parse_valid_codes(&sheet));

    match result {
        Ok(codes) => {
            info!("{}: loaded {} records", file_label(path), codes.len());
            codes
        }
        Err(e) => {
            warn!("Error processing 2-6 digit codes file {:?}: {}", path, e);
            BTreeSet::new()
        }
    }
}

/// Padded, de-duplicated code keys
pub fn parse_valid_codes(sheet: &Sheet) -> CoreResult<BTreeSet<String>> {
    let code_col = find_column(sheet, &["code"], 1)?;
    Ok(sheet.column(code_col).filter_map(zero_pad).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_codes() {
        let sheet = Sheet::new(
            vec!["Seq. No.".into(), "2022 NAICS US   Code".into(), "Title".into()],
            vec![
                vec!["1".into(), "11".into(), "Agriculture".into()],
                vec!["2".into(), "111".into(), "Crop".into()],
                vec!["3".into(), "11".into(), "Duplicate".into()],
                vec!["4".into(), "".into(), "Blank".into()],
            ],
        );
        let codes = parse_valid_codes(&sheet).unwrap();
        assert_eq!(
            codes.into_iter().collect::<Vec<_>>(),
            vec!["110000".to_string(), "111000".to_string()]
        );
    }

    #[test]
    fn test_missing_file_is_empty() {
        assert!(load_valid_codes(Path::new("/nonexistent/codes.xlsx")).is_empty());
    }
}
