//! NAICS Code Keys
//!
//! Normalization of vendor code cells to the 6-character key every table is
//! joined on, plus the hierarchy level and sector derived from a code.

use serde::{Deserialize, Serialize};

/// Width of a normalized code key
pub const CODE_WIDTH: usize = 6;

/// Normalize a code cell to a 6-character key.
///
/// The cell is trimmed and right-padded with `'0'`. Empty cells, cells with
/// any non-digit character and cells wider than six digits have no key.
pub fn zero_pad(raw: &str) -> Option<String> {
    let code = raw.trim();
    if code.is_empty() || code.len() > CODE_WIDTH || !code.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let mut key = String::with_capacity(CODE_WIDTH);
    key.push_str(code);
    while key.len() < CODE_WIDTH {
        key.push('0');
    }
    Some(key)
}

/// Two-digit sector of a code key: trailing zeros stripped, then truncated
pub fn sector_of(code: &str) -> String {
    code.trim_end_matches('0').chars().take(2).collect()
}

/// Hierarchy level of a NAICS code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Sector,
    Subsector,
    IndustryGroup,
    NaicsIndustry,
    NationalIndustry,
    Unknown,
}

impl Level {
    /// Level from the number of digits in the unpadded code
    pub fn from_digits(digits: usize) -> Self {
        match digits {
            2 => Level::Sector,
            3 => Level::Subsector,
            4 => Level::IndustryGroup,
            5 => Level::NaicsIndustry,
            6 => Level::NationalIndustry,
            _ => Level::Unknown,
        }
    }

    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Sector => "sector",
            Level::Subsector => "subsector",
            Level::IndustryGroup => "industry_group",
            Level::NaicsIndustry => "naics_industry",
            Level::NationalIndustry => "national_industry",
            Level::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
