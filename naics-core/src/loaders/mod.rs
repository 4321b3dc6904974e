//! Source Loaders
//!
//! One loader per vendor file. Each reads string cells, resolves its columns
//! by header fragments, normalizes codes to 6-character keys and keeps the
//! first row per key. Only the descriptions file is required; the others
//! degrade to empty tables when absent or unreadable.

pub mod codes;
pub mod cross_refs;
pub mod descriptions;
pub mod size_standards;
pub mod structure;

pub use codes::{load_valid_codes, parse_valid_codes};
pub use cross_refs::{load_cross_references, parse_cross_references, CrossReferenceMap};
pub use descriptions::{load_descriptions, parse_descriptions, DescriptionRow};
pub use size_standards::{load_size_standards, parse_size_standards, SizeStandard, SBA_WORKSHEET};
pub use structure::{load_structure, parse_structure, StructureRow, STRUCTURE_HEADER_ROW};

use std::path::Path;

/// File name for log lines
pub(crate) fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
