//! Vendor HTML Flattening
//!
//! Some Census description cells carry HTML definition lists
//! (`<dl><dt>..</dt></dl>`). They are flattened to a single `"; "`-joined
//! line so every description is plain text.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").expect("Invalid entity regex")
});

static LINE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").expect("Invalid line break regex"));

static DEFINITION_TERM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<dt\b[^>]*>(.*?)</dt>").expect("Invalid dt regex"));

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("Invalid tag regex"));

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("Invalid space regex"));

/// Flatten HTML bullet markup to `"; "`-joined text.
///
/// Text without markup is returned unchanged. Markup without `<dt>` items
/// is reduced to its text content.
pub fn flatten_bullets(raw: &str) -> String {
    if !raw.contains('<') {
        return raw.to_string();
    }

    let unescaped = unescape_entities(raw);
    let html = LINE_BREAK.replace_all(&unescaped, "\n");

    let bullets: Vec<String> = DEFINITION_TERM
        .captures_iter(&html)
        .map(|caps| {
            let text = text_content(&caps[1], "\n");
            WHITESPACE
                .replace_all(&text, " ")
                .trim_end_matches([' ', ';'])
                .to_string()
        })
        .collect();

    if bullets.is_empty() {
        return text_content(&html, " ");
    }
    bullets.join("; ")
}

/// Text nodes, each trimmed, empties dropped, joined by `separator`
fn text_content(html: &str, separator: &str) -> String {
    TAG.split(html)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Decode named and numeric character references
fn unescape_entities(raw: &str) -> String {
    ENTITY
        .replace_all(raw, |caps: &Captures| {
            let entity = &caps[1];
            let decoded = if let Some(hex) = entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = entity.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                match entity {
                    "amp" => Some('&'),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "nbsp" => Some(' '),
                    "ndash" => Some('\u{2013}'),
                    "mdash" => Some('\u{2014}'),
                    _ => None,
                }
            };
            decoded
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
