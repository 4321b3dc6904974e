//! Column Resolver
//!
//! Vendor spreadsheets rename headers between releases. Loaders ask for a
//! column by header fragments and name a positional fallback; a fallback
//! that does not exist is an error rather than a silently empty column.

use crate::error::{CoreError, CoreResult};
use crate::sheet::Sheet;

/// Resolve a column index by case-insensitive header substrings.
///
/// Fragments are tried in order; the first column containing the current
/// fragment wins. When nothing matches, `fallback` is returned if it is a
/// valid column index.
pub fn find_column(sheet: &Sheet, fragments: &[&str], fallback: usize) -> CoreResult<usize> {
    for fragment in fragments {
        let fragment = fragment.to_lowercase();
        if let Some(index) = sheet
            .headers()
            .iter()
            .position(|h| h.to_lowercase().contains(&fragment))
        {
            return Ok(index);
        }
    }

    if fallback >= sheet.column_count() {
        return Err(CoreError::column_out_of_bounds(
            fallback,
            sheet.column_count(),
        ));
    }
    Ok(fallback)
}
