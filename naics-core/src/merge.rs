//! Source Merger
//!
//! Left-joins every normalized source onto the descriptions table and
//! derives sector, cross-reference and defense features. No description row
//! is ever dropped; a missing right-side match leaves the field empty.

use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;

use crate::code::sector_of;
use crate::defense::keyword_count;
use crate::error::CoreResult;
use crate::loaders::{
    load_cross_references, load_descriptions, load_size_standards, load_structure,
    load_valid_codes, CrossReferenceMap, DescriptionRow, SizeStandard, StructureRow,
};
use crate::record::NaicsRecord;

/// On-disk location and provenance of one source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Provenance recorded on loaded rows, usually the download URL
    pub origin: String,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, origin: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            origin: origin.into(),
        }
    }
}

/// The five vendor files of one build
#[derive(Debug, Clone)]
pub struct SourcePaths {
    pub descriptions: SourceFile,
    pub valid_codes: SourceFile,
    pub structure: SourceFile,
    pub cross_references: SourceFile,
    pub size_standards: SourceFile,
}

/// Every loaded source, ready to merge
#[derive(Debug, Clone, Default)]
pub struct SourceTables {
    /// Base table
    pub descriptions: Vec<DescriptionRow>,
    /// 2-6 digit reference codes; empty means "not available"
    pub valid_codes: BTreeSet<String>,
    pub structure: Vec<StructureRow>,
    pub size_standards: Vec<SizeStandard>,
    pub cross_references: CrossReferenceMap,
}

impl SourceTables {
    /// Load every source. Only a missing or unreadable descriptions file
    /// is an error.
    pub fn load(paths: &SourcePaths) -> CoreResult<Self> {
        Ok(Self {
            descriptions: load_descriptions(
                &paths.descriptions.path,
                &paths.descriptions.origin,
            )?,
            valid_codes: load_valid_codes(&paths.valid_codes.path),
            structure: load_structure(&paths.structure.path, &paths.structure.origin),
            size_standards: load_size_standards(&paths.size_standards.path),
            cross_references: load_cross_references(&paths.cross_references.path),
        })
    }
}

/// Merge all sources into one record per description row
pub fn merge_sources(tables: &SourceTables) -> Vec<NaicsRecord> {
    let structure: HashMap<&str, &StructureRow> = tables
        .structure
        .iter()
        .map(|row| (row.code.as_str(), row))
        .collect();
    let sizes: HashMap<&str, &SizeStandard> = tables
        .size_standards
        .iter()
        .map(|row| (row.code.as_str(), row))
        .collect();

    tables
        .descriptions
        .iter()
        .map(|row| {
            let structure_row = structure.get(row.code.as_str()).copied();
            let size = sizes.get(row.code.as_str()).copied();

            let title = if row.title.is_empty() {
                structure_row.map(|s| s.title.clone()).unwrap_or_default()
            } else {
                row.title.clone()
            };
            let description = if row.description.is_empty() {
                title.clone()
            } else {
                row.description.clone()
            };

            let related_codes: Vec<String> = tables
                .cross_references
                .get(&row.code)
                .map(|refs| refs.iter().filter(|r| **r != row.code).cloned().collect())
                .unwrap_or_default();

            let defense_keyword_count = keyword_count(&description);

            NaicsRecord {
                code: row.code.clone(),
                sector: sector_of(&row.code),
                level: row.level,
                trilateral: row.trilateral,
                size_standard_metric: size.map(|s| s.metric),
                size_standard_max: size.map(|s| s.max),
                cross_ref_count: related_codes.len(),
                related_codes,
                defense_related: defense_keyword_count > 0,
                defense_keyword_count,
                validated: tables.valid_codes.is_empty() || tables.valid_codes.contains(&row.code),
                change_indicator: structure_row.and_then(|s| s.change_indicator.clone()),
                source: Some(row.source.clone()),
                title,
                description,
            }
        })
        .collect()
}
