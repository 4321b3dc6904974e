//! NAICS Core - Reference Data Domain
//!
//! Pure, synchronous half of the NAICS reference service. It turns the five
//! vendor spreadsheets into one merged record per 6-digit code and derives
//! the cached lookup payload from them.
//!
//! # Pipeline
//!
//! ```text
//!  descriptions ─┐
//!  2-6 codes ────┤
//!  structure ────┼──▶ loaders ──▶ merge_sources ──▶ generate_lookups ──▶ NaicsLookups
//!  cross-refs ───┤    (Sheet,        (NaicsRecord)     (indexes, metadata,
//!  SBA sizes ────┘     find_column)                     relationship analysis)
//! ```
//!
//! # Core Types
//!
//! - [`Sheet`]: header row plus string cells read from xlsx or csv
//! - [`NaicsRecord`]: one merged code with joined and derived fields
//! - [`NaicsLookups`]: the payload every reader works from
//! - [`CodeFilter`]: AND-combined record filters
//!
//! Only the descriptions file is required. Every other source degrades to
//! an empty table and the merge still produces one record per description.

pub mod code;
pub mod columns;
pub mod defense;
pub mod error;
pub mod export;
pub mod html;
pub mod loaders;
pub mod lookups;
pub mod merge;
pub mod query;
pub mod record;
pub mod sectors;
pub mod sheet;

// Re-export commonly used types
pub use error::{CoreError, CoreResult};

pub use code::{sector_of, zero_pad, Level, CODE_WIDTH};
pub use columns::find_column;
pub use defense::{keyword_count, DEFENSE_KEYWORDS, HIGH_DEFENSE_THRESHOLD};
pub use export::{to_csv, CSV_HEADER};
pub use lookups::{
    analyze_relationships, generate_lookups, ConnectedCode, DefenseCluster, LookupIndexes,
    LookupMetadata, NaicsLookups, NetworkStats, RelationshipAnalysis, SectorConnectivity,
};
pub use merge::{merge_sources, SourceFile, SourcePaths, SourceTables};
pub use query::{
    relationships, search, CodeFilter, DirectMatch, RelatedCode, RelatedMatch, Relationships,
    SearchResults,
};
pub use record::{NaicsRecord, SizeMetric};
pub use sectors::{sector_name, SECTOR_NAMES};
pub use sheet::{Sheet, SheetOptions};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
