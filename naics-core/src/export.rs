//! Flat CSV Export

use crate::error::{CoreError, CoreResult};
use crate::lookups::NaicsLookups;

/// Header row of the flat export
pub const CSV_HEADER: [&str; 7] = [
    "naics_code",
    "description",
    "sector",
    "level",
    "defense_related",
    "cross_reference_count",
    "related_codes",
];

/// Separator for the `related_codes` column
pub const RELATED_CODES_SEPARATOR: &str = "|";

/// Render every record as one CSV row.
///
/// `level` is the length of the code key and related codes are joined with
/// `|`. Row order follows the payload.
pub fn to_csv(lookups: &NaicsLookups) -> CoreResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for record in &lookups.naics {
        let level = record.code.len().to_string();
        let cross_refs = record.cross_ref_count.to_string();
        let related = record.related_codes.join(RELATED_CODES_SEPARATOR);
        writer.write_record([
            record.code.as_str(),
            record.description.as_str(),
            record.sector.as_str(),
            level.as_str(),
            if record.defense_related { "true" } else { "false" },
            cross_refs.as_str(),
            related.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CoreError::Io(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| CoreError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{sector_of, Level};
    use crate::lookups::generate_lookups;
    use crate::record::NaicsRecord;
    use chrono::Utc;

    fn record(code: &str, description: &str, refs: &[&str]) -> NaicsRecord {
        NaicsRecord {
            code: code.to_string(),
            title: String::new(),
            description: description.to_string(),
            level: Level::NationalIndustry,
            sector: sector_of(code),
            trilateral: false,
            size_standard_metric: None,
            size_standard_max: None,
            related_codes: refs.iter().map(|r| r.to_string()).collect(),
            cross_ref_count: refs.len(),
            defense_related: description.contains("defense"),
            defense_keyword_count: u32::from(description.contains("defense")),
            validated: true,
            change_indicator: None,
            source: None,
        }
    }

    #[test]
    fn test_csv_rows_match_records() {
        let lookups = generate_lookups(
            vec![
                record("541511", "Custom programming, defense", &["541512", "541519"]),
                record("111110", "Soybean farming", &[]),
                record("541512", "Systems \"design\"", &["541511"]),
            ],
            Utc::now(),
        );
        let csv = to_csv(&lookups).unwrap();

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), CSV_HEADER.to_vec());

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), lookups.naics.len());

        assert_eq!(&rows[0][0], "541511");
        assert_eq!(&rows[0][1], "Custom programming, defense");
        assert_eq!(&rows[0][2], "54");
        assert_eq!(&rows[0][3], "6");
        assert_eq!(&rows[0][4], "true");
        assert_eq!(&rows[0][5], "2");
        assert_eq!(&rows[0][6], "541512|541519");

        assert_eq!(&rows[1][6], "");
        assert_eq!(&rows[2][1], "Systems \"design\"");
    }

    #[test]
    fn test_empty_payload_is_header_only() {
        let lookups = generate_lookups(Vec::new(), Utc::now());
        let csv = to_csv(&lookups).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }
}
