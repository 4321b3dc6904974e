//! Read-Only Queries
//!
//! Filtering, keyword search and relationship resolution over a lookup
//! payload. Nothing here mutates the payload.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::lookups::NaicsLookups;
use crate::record::NaicsRecord;

/// Description used for a code that is not in the payload
pub const UNKNOWN_DESCRIPTION: &str = "Unknown";
/// Description used for a related code that is not in the payload
pub const UNAVAILABLE_DESCRIPTION: &str = "Description not available";

/// AND-combined record filters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeFilter {
    #[serde(default)]
    pub defense_only: bool,
    pub sector: Option<String>,
    #[serde(default)]
    pub min_cross_refs: usize,
}

impl CodeFilter {
    /// True when the record passes every active filter
    pub fn matches(&self, record: &NaicsRecord) -> bool {
        if self.defense_only && !record.defense_related {
            return false;
        }
        if let Some(sector) = self.sector.as_deref().filter(|s| !s.is_empty()) {
            if record.sector != sector {
                return false;
            }
        }
        record.cross_ref_count >= self.min_cross_refs
    }

    /// Records passing the filter, in payload order
    pub fn apply<'a>(&self, lookups: &'a NaicsLookups) -> Vec<&'a NaicsRecord> {
        lookups.naics.iter().filter(|r| self.matches(r)).collect()
    }
}

/// Code whose description contains the search term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectMatch {
    pub description: String,
    pub match_type: String,
    pub related_codes: Vec<String>,
}

/// Code pulled in because it cross-references a direct match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedMatch {
    pub description: String,
    pub match_type: String,
    /// Direct match that caused the inclusion
    pub related_via: String,
}

/// Keyword search results keyed by code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    pub search_term: String,
    pub direct_matches: BTreeMap<String, DirectMatch>,
    pub related_matches: BTreeMap<String, RelatedMatch>,
    pub total_matches: usize,
}

/// Case-insensitive substring search over descriptions.
///
/// Related matches are codes whose `related_codes` contain a direct match
/// while not being direct matches themselves. When several direct matches
/// pull in the same code, the lowest direct match code is recorded.
pub fn search(lookups: &NaicsLookups, term: &str) -> SearchResults {
    let needle = term.to_lowercase();

    let direct_matches: BTreeMap<String, DirectMatch> = lookups
        .naics
        .iter()
        .filter(|r| r.description.to_lowercase().contains(&needle))
        .map(|r| {
            (
                r.code.clone(),
                DirectMatch {
                    description: r.description.clone(),
                    match_type: "direct".to_string(),
                    related_codes: r.related_codes.clone(),
                },
            )
        })
        .collect();

    let mut related_matches: BTreeMap<String, RelatedMatch> = BTreeMap::new();
    for matched_code in direct_matches.keys() {
        for record in &lookups.naics {
            if direct_matches.contains_key(&record.code)
                || !record.related_codes.contains(matched_code)
            {
                continue;
            }
            related_matches
                .entry(record.code.clone())
                .or_insert_with(|| RelatedMatch {
                    description: record.description.clone(),
                    match_type: "related".to_string(),
                    related_via: matched_code.clone(),
                });
        }
    }

    SearchResults {
        search_term: term.to_string(),
        total_matches: direct_matches.len() + related_matches.len(),
        direct_matches,
        related_matches,
    }
}

/// A related code with its resolved description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedCode {
    pub naics_code: String,
    pub description: String,
}

/// Cross-references of one code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationships {
    pub naics_code: String,
    pub description: String,
    pub related_codes: Vec<RelatedCode>,
    pub relationship_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Resolve the cross-references of `code`, with descriptions.
///
/// Unknown codes are not an error; they resolve to an empty relationship
/// list with a message.
pub fn relationships(lookups: &NaicsLookups, code: &str) -> Relationships {
    let record = lookups.find(code);
    let description = record
        .map(|r| r.description.clone())
        .unwrap_or_else(|| UNKNOWN_DESCRIPTION.to_string());

    let related_codes: Vec<RelatedCode> = record
        .map(|r| {
            r.related_codes
                .iter()
                .map(|related| RelatedCode {
                    naics_code: related.clone(),
                    description: lookups
                        .description_of(related)
                        .unwrap_or(UNAVAILABLE_DESCRIPTION)
                        .to_string(),
                })
                .collect()
        })
        .unwrap_or_default();

    let message = related_codes
        .is_empty()
        .then(|| "No cross-references found for this code".to_string());

    Relationships {
        naics_code: code.to_string(),
        description,
        relationship_count: related_codes.len(),
        related_codes,
        message,
    }
}
