//! Output Formatting
//!
//! Utilities for formatting CLI output.

use crate::commands::OutputFormat;
use chrono::{DateTime, Utc};
use naics_api::StatsResponse;
use naics_store::CacheEnvelope;
use serde::Serialize;

/// Print as JSON
fn print_json<T: Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error formatting JSON: {}", e),
    }
}

/// Render an epoch timestamp as RFC 3339
pub fn format_epoch(secs: f64) -> String {
    DateTime::<Utc>::from_timestamp(secs as i64, 0)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| format!("{secs}"))
}

/// Print the result of a build
pub fn print_build_summary(envelope: &CacheEnvelope, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&StatsResponse::from(envelope)),
        OutputFormat::Plain => {
            let metadata = &envelope.lookups.metadata;
            println!("NAICS Build");
            println!("===========");
            for (source, ok) in &envelope.download_status {
                println!("  {:<20} {}", source, if *ok { "ok" } else { "FAILED" });
            }
            println!("Codes:         {}", metadata.total_codes);
            println!("Defense codes: {}", metadata.defense_count);
            println!("Cached until:  {}", format_epoch(envelope.expires_at));
        }
    }
}

/// Print cache status
pub fn print_status(envelope: &CacheEnvelope, fresh: bool, format: OutputFormat) {
    let stats = StatsResponse::from(envelope);
    match format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "fresh": fresh,
            "stats": stats,
        })),
        OutputFormat::Plain => {
            println!("NAICS Cache Status");
            println!("==================");
            println!("Fresh:               {}", fresh);
            println!("Built at:            {}", format_epoch(stats.cache_timestamp));
            println!("Expires at:          {}", format_epoch(stats.cache_expires_at));
            println!("Total codes:         {}", stats.total_codes);
            println!("Defense codes:       {}", stats.defense_count);
            println!("High defense codes:  {}", stats.high_defense_count);
            println!("With cross-refs:     {}", stats.codes_with_cross_refs);
            println!("Avg cross-refs:      {:.2}", stats.avg_cross_refs);
            println!("Sectors:             {}", stats.sector_count);
            println!("Relationships:       {}", stats.total_relationships);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_epoch() {
        assert_eq!(format_epoch(0.0), "1970-01-01T00:00:00+00:00");
        assert_eq!(format_epoch(86_400.9), "1970-01-02T00:00:00+00:00");
    }
}
