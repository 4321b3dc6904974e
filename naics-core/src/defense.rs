//! Defense-Relatedness Heuristic
//!
//! A description is defense-related when it mentions any of a fixed set of
//! keywords. This is a screening heuristic, not an official designation.

/// Keywords matched as substrings of the lowercased description
pub const DEFENSE_KEYWORDS: [&str; 35] = [
    "defense",
    "military",
    "aerospace",
    "aircraft",
    "missile",
    "radar",
    "cybersecurity",
    "security",
    "intelligence",
    "surveillance",
    "communication",
    "electronics",
    "computer",
    "software",
    "systems",
    "research",
    "development",
    "engineering",
    "consulting",
    "professional",
    "weapons",
    "ammunition",
    "naval",
    "marine",
    "aviation",
    "space",
    "technology",
    "manufacturing",
    "testing",
    "training",
    "logistics",
    "maintenance",
    "repair",
    "support",
    "services",
];

/// Keyword count at or above which a code lands in the high-defense index
pub const HIGH_DEFENSE_THRESHOLD: u32 = 3;

/// Number of distinct keywords present in `description`
pub fn keyword_count(description: &str) -> u32 {
    let lowered = description.to_lowercase();
    DEFENSE_KEYWORDS
        .iter()
        .filter(|keyword| lowered.contains(*keyword))
        .count() as u32
}
