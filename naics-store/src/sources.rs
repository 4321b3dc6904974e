//! Upstream Source Catalog
//!
//! The five vendor files, where they are downloaded from and the file name
//! each one is stored under in the data directory.

use naics_core::{SourceFile, SourcePaths};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One of the five vendor files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Code, title and long description (required)
    Descriptions,
    /// 2-6 digit reference code list
    ValidCodes,
    /// Hierarchy structure with change indicators
    Structure,
    /// Free-text cross-references between codes
    CrossReferences,
    /// SBA table of size standards
    SizeStandards,
}

impl SourceKind {
    /// Every kind, in download order
    pub const ALL: [SourceKind; 5] = [
        SourceKind::ValidCodes,
        SourceKind::Descriptions,
        SourceKind::Structure,
        SourceKind::CrossReferences,
        SourceKind::SizeStandards,
    ];

    /// Key used in download status maps
    pub fn key(&self) -> &'static str {
        match self {
            SourceKind::Descriptions => "descriptions",
            SourceKind::ValidCodes => "2_6_digit_codes",
            SourceKind::Structure => "structure",
            SourceKind::CrossReferences => "cross_references",
            SourceKind::SizeStandards => "sba_size_standards",
        }
    }
}

/// A downloadable vendor file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpec {
    pub kind: SourceKind,
    pub url: String,
    /// File name inside the data directory
    pub file_name: String,
}

impl SourceSpec {
    pub fn new(kind: SourceKind, url: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            kind,
            url: url.into(),
            file_name: file_name.into(),
        }
    }
}

/// The set of files one build uses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCatalog {
    sources: Vec<SourceSpec>,
}

impl Default for SourceCatalog {
    fn default() -> Self {
        Self::census_2022()
    }
}

impl SourceCatalog {
    /// Catalog from explicit entries; later entries replace earlier ones of
    /// the same kind
    pub fn new(specs: impl IntoIterator<Item = SourceSpec>) -> Self {
        let mut sources: Vec<SourceSpec> = Vec::new();
        for spec in specs {
            match sources.iter_mut().find(|s| s.kind == spec.kind) {
                Some(existing) => *existing = spec,
                None => sources.push(spec),
            }
        }
        Self { sources }
    }

    /// Census 2022 NAICS files plus the SBA March 2023 size standards
    pub fn census_2022() -> Self {
        Self::new([
            SourceSpec::new(
                SourceKind::ValidCodes,
                "https://www.census.gov/naics/2022NAICS/2-6%20digit_2022_Codes.xlsx",
                "2-6 digit_2022_Codes.xlsx",
            ),
            SourceSpec::new(
                SourceKind::Descriptions,
                "https://www.census.gov/naics/2022NAICS/2022_NAICS_Descriptions.xlsx",
                "2022_NAICS_Descriptions.xlsx",
            ),
            SourceSpec::new(
                SourceKind::Structure,
                "https://www.census.gov/naics/2022NAICS/2022_NAICS_Structure.xlsx",
                "2022_NAICS_Structure.xlsx",
            ),
            SourceSpec::new(
                SourceKind::CrossReferences,
                "https://www.census.gov/naics/2022NAICS/2022_NAICS_Cross_References.xlsx",
                "2022_NAICS_Cross_References.xlsx",
            ),
            SourceSpec::new(
                SourceKind::SizeStandards,
                "https://data.sba.gov/dataset/c17e8870-fa85-48a4-8887-9a51b7503711/resource/2f56c7b6-715f-41f5-a470-2ee124af146a/download/sba-table-of-size-standards_effective-march-17-2023_v0.xlsx",
                "sba-table-of-size-standards_effective-march-17-2023_v0.xlsx",
            ),
        ])
    }

    pub fn sources(&self) -> &[SourceSpec] {
        &self.sources
    }

    pub fn get(&self, kind: SourceKind) -> Option<&SourceSpec> {
        self.sources.iter().find(|s| s.kind == kind)
    }

    /// Resolve every kind to a file inside `data_dir`.
    ///
    /// A kind missing from the catalog maps to its default Census file name,
    /// which the loaders then treat as absent.
    pub fn paths(&self, data_dir: &Path) -> SourcePaths {
        let file = |kind: SourceKind| {
            let spec = self
                .get(kind)
                .cloned()
                .or_else(|| Self::census_2022().get(kind).cloned());
            match spec {
                Some(spec) => SourceFile::new(data_dir.join(&spec.file_name), spec.url),
                None => SourceFile::new(data_dir.join(kind.key()), kind.key()),
            }
        };

        SourcePaths {
            descriptions: file(SourceKind::Descriptions),
            valid_codes: file(SourceKind::ValidCodes),
            structure: file(SourceKind::Structure),
            cross_references: file(SourceKind::CrossReferences),
            size_standards: file(SourceKind::SizeStandards),
        }
    }
}
