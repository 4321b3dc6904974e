//! Spreadsheet Model
//!
//! A loaded vendor spreadsheet reduced to a lowercased header row and
//! string cells. Excel/ODS workbooks are read with `calamine`, CSV exports
//! with the `csv` crate, so loaders never care which one they were given.

use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;
use tracing::warn;

use crate::error::{CoreError, CoreResult};

/// How to read a sheet from disk
#[derive(Debug, Clone, Default)]
pub struct SheetOptions {
    /// Worksheet name (workbooks only); the first worksheet is used when absent
    pub worksheet: Option<String>,
    /// Zero-based row index holding the column headers
    pub header_row: usize,
}

impl SheetOptions {
    /// Header on the given row of the first worksheet
    pub fn header_at(header_row: usize) -> Self {
        Self {
            worksheet: None,
            header_row,
        }
    }

    /// Header on the first row of a named worksheet
    pub fn worksheet(name: impl Into<String>) -> Self {
        Self {
            worksheet: Some(name.into()),
            header_row: 0,
        }
    }
}

/// A table of string cells with named columns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sheet {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Sheet {
    /// Build a sheet from headers and rows; header names are lowercased
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            headers: headers.into_iter().map(|h| h.to_lowercase()).collect(),
            rows,
        }
    }

    /// Read a sheet from disk, choosing the reader by file extension
    pub fn read(path: &Path, options: &SheetOptions) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::SourceMissing {
                path: path.to_path_buf(),
            });
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let grid = match extension.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => read_workbook_grid(path, options)?,
            "csv" => read_csv_grid(path)?,
            _ => {
                return Err(CoreError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        };

        Self::from_grid(grid, options.header_row).ok_or_else(|| CoreError::HeaderRowMissing {
            path: path.to_path_buf(),
            row: options.header_row,
        })
    }

    /// Split a raw grid into header and data rows.
    ///
    /// Rows above `header_row` are discarded. Returns `None` when the grid
    /// has no row at `header_row`.
    pub fn from_grid(mut grid: Vec<Vec<String>>, header_row: usize) -> Option<Self> {
        if header_row >= grid.len() {
            return None;
        }
        let rows = grid.split_off(header_row + 1);
        let headers = grid.pop().unwrap_or_default();
        Some(Self::new(headers, rows))
    }

    /// Column headers (lowercased)
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Rewrite every header name
    pub fn map_headers(&mut self, f: impl Fn(&str) -> String) {
        for header in &mut self.headers {
            *header = f(header);
        }
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the sheet has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell text; short rows read as empty cells
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Iterate the cells of one column, top to bottom
    pub fn column(&self, column: usize) -> impl Iterator<Item = &str> + '_ {
        (0..self.rows.len()).map(move |row| self.cell(row, column))
    }
}

fn read_workbook_grid(path: &Path, options: &SheetOptions) -> CoreResult<Vec<Vec<String>>> {
    let mut workbook = open_workbook_auto(path).map_err(|e| CoreError::workbook(path, e))?;
    let names = workbook.sheet_names();

    let name = match &options.worksheet {
        Some(wanted) if names.iter().any(|n| n == wanted) => wanted.clone(),
        Some(wanted) => {
            warn!(
                "Worksheet {:?} not found in {:?}, using the first worksheet",
                wanted, path
            );
            names
                .first()
                .cloned()
                .ok_or_else(|| CoreError::EmptyWorkbook {
                    path: path.to_path_buf(),
                })?
        }
        None => names
            .first()
            .cloned()
            .ok_or_else(|| CoreError::EmptyWorkbook {
                path: path.to_path_buf(),
            })?,
    };

    let range = workbook
        .worksheet_range(&name)
        .map_err(|e| CoreError::workbook(path, e))?;

    // calamine ranges start at the first used cell; pad back to A1 so header
    // rows and fallback column indexes line up with the sheet as authored.
    let (start_row, start_col) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));

    let mut grid: Vec<Vec<String>> = vec![Vec::new(); start_row];
    for row in range.rows() {
        let mut cells = vec![String::new(); start_col];
        cells.extend(row.iter().map(cell_to_string));
        grid.push(cells);
    }
    Ok(grid)
}

fn read_csv_grid(path: &Path) -> CoreResult<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut grid = Vec::new();
    for record in reader.records() {
        let record = record?;
        grid.push(record.iter().map(str::to_string).collect());
    }
    Ok(grid)
}

/// Render a workbook cell the way a string-typed read would see it.
///
/// Integral floats drop their fractional part so numeric code cells
/// (`111110.0`) read as `111110`.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => (*f as i64).to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_new_lowercases_headers() {
        let sheet = Sheet::new(vec!["Code".into(), "TITLE".into()], vec![]);
        assert_eq!(sheet.headers(), &["code".to_string(), "title".to_string()]);
        assert!(sheet.is_empty());
    }

    #[test]
    fn test_from_grid_skips_rows_above_header() {
        let sheet = Sheet::from_grid(
            grid(&[&["banner"], &[""], &["Seq", "Code"], &["1", "11"]]),
            2,
        )
        .unwrap();
        assert_eq!(sheet.headers(), &["seq".to_string(), "code".to_string()]);
        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet.cell(0, 1), "11");
    }

    #[test]
    fn test_from_grid_missing_header_row() {
        assert!(Sheet::from_grid(grid(&[&["only"]]), 3).is_none());
    }

    #[test]
    fn test_short_rows_read_as_empty() {
        let sheet = Sheet::new(
            vec!["a".into(), "b".into()],
            vec![vec!["1".into()]],
        );
        assert_eq!(sheet.cell(0, 1), "");
        assert_eq!(sheet.cell(5, 0), "");
        assert_eq!(sheet.column(0).collect::<Vec<_>>(), vec!["1"]);
    }

    #[test]
    fn test_map_headers() {
        let mut sheet = Sheet::new(vec!["NAICS\nCodes ".into()], vec![]);
        sheet.map_headers(|h| h.replace('\n', " ").trim().to_string());
        assert_eq!(sheet.headers(), &["naics codes".to_string()]);
    }

    #[test]
    fn test_cell_to_string_integral_float() {
        assert_eq!(cell_to_string(&Data::Float(111110.0)), "111110");
        assert_eq!(cell_to_string(&Data::Float(7.5)), "7.5");
        assert_eq!(cell_to_string(&Data::Int(42)), "42");
        assert_eq!(cell_to_string(&Data::Empty), "");
    }

    #[test]
    fn test_read_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("codes.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "Seq. No.,2022 NAICS US Code,Title").unwrap();
        writeln!(file, "1,11,Agriculture").unwrap();
        writeln!(file, "2,111").unwrap();

        let sheet = Sheet::read(&path, &SheetOptions::default()).unwrap();
        assert_eq!(sheet.column_count(), 3);
        assert_eq!(sheet.len(), 2);
        assert_eq!(sheet.cell(1, 1), "111");
        assert_eq!(sheet.cell(1, 2), "");
    }

    #[test]
    fn test_read_missing_file() {
        let err = Sheet::read(Path::new("/nonexistent/x.csv"), &SheetOptions::default())
            .unwrap_err();
        assert!(matches!(err, CoreError::SourceMissing { .. }));
    }

    #[test]
    fn test_read_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("codes.txt");
        std::fs::write(&path, "x").unwrap();
        let err = Sheet::read(&path, &SheetOptions::default()).unwrap_err();
        assert!(matches!(err, CoreError::UnsupportedFormat { .. }));
    }
}
