//! Descriptions Loader
//!
//! Base table of the merge. Columns: Code | Title | Description.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

use super::file_label;
use crate::code::{zero_pad, Level};
use crate::columns::find_column;
use crate::error::CoreResult;
use crate::html::flatten_bullets;
use crate::sheet::{Sheet, SheetOptions};

static BLANK_LINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{2,}").expect("Invalid blank line regex"));

static HORIZONTAL_SPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t\r\x0C\x0B]+").expect("Invalid space regex"));

static REDIRECT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^see\s+industry\s+description\s+for\s+(\d{5,6})\.?$")
        .expect("Invalid redirect regex")
});

static CODE_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2})-(\d{2})$").expect("Invalid range regex"));

static CODE_DIGITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{2,6}").expect("Invalid code regex"));

/// One description row keyed by padded code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionRow {
    pub code: String,
    pub title: String,
    pub description: String,
    pub trilateral: bool,
    pub level: Level,
    pub source: String,
}

/// Load the descriptions workbook. The file is required.
pub fn load_descriptions(path: &Path, source: &str) -> CoreResult<Vec<DescriptionRow>> {
    let sheet = Sheet::read(path, &SheetOptions::default())?;
    let rows = parse_descriptions(&sheet, source)?;
    info!("{}: loaded {} records", file_label(path), rows.len());
    Ok(rows)
}

/// Normalize description rows.
///
/// Redirect-only descriptions are dropped and `NN-NN` ranges expand to one
/// row per code. Range rows come first in the output, so they win over a
/// plain row for the same code; otherwise the first occurrence wins.
pub fn parse_descriptions(sheet: &Sheet, source: &str) -> CoreResult<Vec<DescriptionRow>> {
    let code_col = find_column(sheet, &["code"], 0)?;
    let title_col = find_column(sheet, &["title"], 1)?;
    let desc_col = find_column(sheet, &["description"], 2)?;

    let (ranges, plain): (Vec<usize>, Vec<usize>) =
        (0..sheet.len()).partition(|&row| CODE_RANGE.is_match(sheet.cell(row, code_col).trim()));

    let mut seen = HashSet::new();
    let mut rows = Vec::new();

    for row in ranges.into_iter().chain(plain) {
        let description = clean_description(sheet.cell(row, desc_col));
        if REDIRECT.is_match(&description) {
            continue;
        }
        let description = flatten_bullets(&description);
        let (title, trilateral) = clean_title(sheet.cell(row, title_col));

        for digits in code_strings(sheet.cell(row, code_col)) {
            let Some(code) = zero_pad(&digits) else {
                continue;
            };
            if !seen.insert(code.clone()) {
                continue;
            }
            rows.push(DescriptionRow {
                code,
                title: title.clone(),
                description: description.clone(),
                trilateral,
                level: Level::from_digits(digits.len()),
                source: source.to_string(),
            });
        }
    }

    Ok(rows)
}

/// Strip the trailing trilateral `T` marker from a title
pub(crate) fn clean_title(raw: &str) -> (String, bool) {
    let trimmed = raw.trim();
    match trimmed.strip_suffix('T') {
        Some(title) => (title.trim().to_string(), true),
        None => (trimmed.to_string(), false),
    }
}

fn clean_description(raw: &str) -> String {
    let text = raw.replace("NULL", "");
    let text = BLANK_LINES.replace_all(&text, "\n");
    let text = HORIZONTAL_SPACE.replace_all(&text, " ");
    text.trim().to_string()
}

/// Unpadded code strings named by a code cell
fn code_strings(raw: &str) -> Vec<String> {
    let raw = raw.trim();
    if let Some(caps) = CODE_RANGE.captures(raw) {
        let start: u32 = caps[1].parse().unwrap_or(0);
        let end: u32 = caps[2].parse().unwrap_or(0);
        return (start..=end).map(|code| code.to_string()).collect();
    }
    CODE_DIGITS
        .find(raw)
        .map(|m| vec![m.as_str().to_string()])
        .unwrap_or_default()
}
