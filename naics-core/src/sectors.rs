//! Sector Names
//!
//! Two-digit NAICS sectors and their published titles. Manufacturing,
//! retail and transportation span several two-digit prefixes.

use std::collections::BTreeMap;

/// Sector prefix to sector title
pub const SECTOR_NAMES: [(&str, &str); 24] = [
    ("11", "Agriculture, Forestry, Fishing and Hunting"),
    ("21", "Mining, Quarrying, and Oil and Gas Extraction"),
    ("22", "Utilities"),
    ("23", "Construction"),
    ("31", "Manufacturing"),
    ("32", "Manufacturing"),
    ("33", "Manufacturing"),
    ("42", "Wholesale Trade"),
    ("44", "Retail Trade"),
    ("45", "Retail Trade"),
    ("48", "Transportation and Warehousing"),
    ("49", "Transportation and Warehousing"),
    ("51", "Information"),
    ("52", "Finance and Insurance"),
    ("53", "Real Estate and Rental and Leasing"),
    ("54", "Professional, Scientific, and Technical Services"),
    ("55", "Management of Companies and Enterprises"),
    ("56", "Administrative and Support and Waste Management Services"),
    ("61", "Educational Services"),
    ("62", "Health Care and Social Assistance"),
    ("71", "Arts, Entertainment, and Recreation"),
    ("72", "Accommodation and Food Services"),
    ("81", "Other Services (except Public Administration)"),
    ("92", "Public Administration"),
];

/// Title of a sector prefix
pub fn sector_name(sector: &str) -> Option<&'static str> {
    SECTOR_NAMES
        .iter()
        .find(|(prefix, _)| *prefix == sector)
        .map(|(_, name)| *name)
}

/// The sector table as an owned map, for serialization
pub fn sector_map() -> BTreeMap<String, String> {
    SECTOR_NAMES
        .iter()
        .map(|(prefix, name)| (prefix.to_string(), name.to_string()))
        .collect()
}
