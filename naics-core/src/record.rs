//! Merged NAICS Record

use serde::{Deserialize, Serialize};

use crate::code::Level;

/// Unit of an SBA size standard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeMetric {
    /// Average annual receipts, threshold in dollars
    Receipts,
    /// Number of employees
    Employees,
}

/// One NAICS code with every joined and derived field.
///
/// Built once per build pass by the merger; every derived field is a pure
/// function of the joined source rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NaicsRecord {
    /// 6-character zero-padded code key
    pub code: String,
    pub title: String,
    /// Cleaned description, or the title when the vendor gave none
    pub description: String,
    pub level: Level,
    /// Two-digit sector prefix
    pub sector: String,
    /// Title carried the trilateral (US/Canada/Mexico) marker
    pub trilateral: bool,
    pub size_standard_metric: Option<SizeMetric>,
    /// Dollars for receipts, headcount for employees
    pub size_standard_max: Option<i64>,
    /// Sorted cross-referenced code keys, never including `code`
    pub related_codes: Vec<String>,
    pub cross_ref_count: usize,
    pub defense_related: bool,
    pub defense_keyword_count: u32,
    /// Present in the 2-6 digit reference code list
    pub validated: bool,
    pub change_indicator: Option<String>,
    pub source: Option<String>,
}

impl NaicsRecord {
    /// True when this record has at least one cross-reference
    pub fn has_cross_refs(&self) -> bool {
        self.cross_ref_count > 0
    }
}
