//! Lookup Generator
//!
//! Flattens merged records into the cached payload: the records themselves,
//! a few code indexes, summary metadata and the cross-reference
//! relationship analysis.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::defense::HIGH_DEFENSE_THRESHOLD;
use crate::record::NaicsRecord;
use crate::sectors::sector_map;

/// Codes kept in `most_connected_codes`
pub const TOP_CONNECTED_LIMIT: usize = 10;
/// Sectors kept in `sector_connectivity`
pub const SECTOR_CONNECTIVITY_LIMIT: usize = 15;
/// Sectors kept in `defense_partnership_clusters`
pub const DEFENSE_CLUSTER_LIMIT: usize = 5;

/// The cached lookup payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NaicsLookups {
    /// Every merged record, in merge order
    pub naics: Vec<NaicsRecord>,
    pub indexes: LookupIndexes,
    pub metadata: LookupMetadata,
    pub relationship_analysis: RelationshipAnalysis,
}

/// Precomputed code lists for fast filtering
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupIndexes {
    pub defense_codes: Vec<String>,
    pub codes_with_cross_refs: Vec<String>,
    pub high_defense_codes: Vec<String>,
}

/// Summary statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupMetadata {
    pub total_codes: usize,
    pub defense_count: usize,
    pub avg_cross_refs: f64,
    /// Sector prefix to sector title
    pub sectors: BTreeMap<String, String>,
    pub processed_at: DateTime<Utc>,
}

/// A heavily cross-referenced code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectedCode {
    pub naics_code: String,
    pub description: String,
    pub cross_ref_count: usize,
    pub defense_related: bool,
}

/// Cross-reference rollup for one sector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorConnectivity {
    pub sector: String,
    /// Mean cross-refs per code, rounded to two decimals
    pub avg_cross_refs: f64,
    pub total_cross_refs: usize,
    pub code_count: usize,
    pub defense_codes: usize,
}

/// Defense-related codes of one sector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefenseCluster {
    pub sector: String,
    pub defense_code_count: usize,
    /// Mean cross-refs over the sector's defense-related codes
    pub avg_cross_refs: f64,
}

/// Whole-dataset cross-reference statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkStats {
    pub total_relationships: usize,
    pub avg_connections_per_code: f64,
    pub max_connections: usize,
    pub codes_with_no_refs: usize,
}

/// Descriptive aggregation over the cross-reference graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipAnalysis {
    pub most_connected_codes: Vec<ConnectedCode>,
    pub sector_connectivity: Vec<SectorConnectivity>,
    pub defense_partnership_clusters: Vec<DefenseCluster>,
    pub network_stats: NetworkStats,
}

impl NaicsLookups {
    /// Record for an exact code key
    pub fn find(&self, code: &str) -> Option<&NaicsRecord> {
        self.naics.iter().find(|r| r.code == code)
    }

    /// Description for a code key
    pub fn description_of(&self, code: &str) -> Option<&str> {
        self.find(code).map(|r| r.description.as_str())
    }
}

/// Build the lookup payload from merged records
pub fn generate_lookups(records: Vec<NaicsRecord>, processed_at: DateTime<Utc>) -> NaicsLookups {
    let indexes = LookupIndexes {
        defense_codes: codes_where(&records, |r| r.defense_related),
        codes_with_cross_refs: codes_where(&records, NaicsRecord::has_cross_refs),
        high_defense_codes: codes_where(&records, |r| {
            r.defense_keyword_count >= HIGH_DEFENSE_THRESHOLD
        }),
    };

    let metadata = LookupMetadata {
        total_codes: records.len(),
        defense_count: indexes.defense_codes.len(),
        avg_cross_refs: mean(records.iter().map(|r| r.cross_ref_count)),
        sectors: sector_map(),
        processed_at,
    };

    let relationship_analysis = analyze_relationships(&records);

    NaicsLookups {
        naics: records,
        indexes,
        metadata,
        relationship_analysis,
    }
}

/// Aggregate the cross-reference graph
pub fn analyze_relationships(records: &[NaicsRecord]) -> RelationshipAnalysis {
    let mut by_count: Vec<&NaicsRecord> = records.iter().collect();
    // Stable sort keeps merge order among ties.
    by_count.sort_by(|a, b| b.cross_ref_count.cmp(&a.cross_ref_count));
    let most_connected_codes = by_count
        .into_iter()
        .take(TOP_CONNECTED_LIMIT)
        .map(|r| ConnectedCode {
            naics_code: r.code.clone(),
            description: r.description.clone(),
            cross_ref_count: r.cross_ref_count,
            defense_related: r.defense_related,
        })
        .collect();

    let mut sectors: BTreeMap<&str, Vec<&NaicsRecord>> = BTreeMap::new();
    for record in records {
        sectors.entry(record.sector.as_str()).or_default().push(record);
    }

    let mut sector_connectivity: Vec<SectorConnectivity> = sectors
        .iter()
        .map(|(sector, members)| SectorConnectivity {
            sector: sector.to_string(),
            avg_cross_refs: round2(mean(members.iter().map(|r| r.cross_ref_count))),
            total_cross_refs: members.iter().map(|r| r.cross_ref_count).sum(),
            code_count: members.len(),
            defense_codes: members.iter().filter(|r| r.defense_related).count(),
        })
        .collect();
    sector_connectivity.sort_by(|a, b| b.avg_cross_refs.total_cmp(&a.avg_cross_refs));
    sector_connectivity.truncate(SECTOR_CONNECTIVITY_LIMIT);

    let mut defense_partnership_clusters: Vec<DefenseCluster> = sectors
        .iter()
        .filter_map(|(sector, members)| {
            let defense: Vec<&&NaicsRecord> = members.iter().filter(|r| r.defense_related).collect();
            (!defense.is_empty()).then(|| DefenseCluster {
                sector: sector.to_string(),
                defense_code_count: defense.len(),
                avg_cross_refs: mean(defense.iter().map(|r| r.cross_ref_count)),
            })
        })
        .collect();
    defense_partnership_clusters.sort_by(|a, b| b.avg_cross_refs.total_cmp(&a.avg_cross_refs));
    defense_partnership_clusters.truncate(DEFENSE_CLUSTER_LIMIT);

    let network_stats = NetworkStats {
        total_relationships: records.iter().map(|r| r.cross_ref_count).sum(),
        avg_connections_per_code: mean(records.iter().map(|r| r.cross_ref_count)),
        max_connections: records.iter().map(|r| r.cross_ref_count).max().unwrap_or(0),
        codes_with_no_refs: records.iter().filter(|r| r.cross_ref_count == 0).count(),
    };

    RelationshipAnalysis {
        most_connected_codes,
        sector_connectivity,
        defense_partnership_clusters,
        network_stats,
    }
}

fn codes_where(records: &[NaicsRecord], keep: impl Fn(&NaicsRecord) -> bool) -> Vec<String> {
    records
        .iter()
        .filter(|r| keep(*r))
        .map(|r| r.code.clone())
        .collect()
}

/// Arithmetic mean; zero for an empty input so the payload stays valid JSON
fn mean(values: impl Iterator<Item = usize>) -> f64 {
    let (sum, count) = values.fold((0usize, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
