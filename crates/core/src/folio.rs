//! Folio generation for sales notes.
//!
//! A folio is the human-facing identifier printed on the document and used
//! in the archive key, distinct from the note's internal UUID.

use crate::types::Timestamp;

/// Prefix carried by every sales-note folio.
pub const FOLIO_PREFIX: &str = "NV-";

/// Derive a folio from the creation instant: `NV-<unix milliseconds>`.
///
/// Two notes created within the same millisecond receive the same folio;
/// the scheme carries no uniqueness guarantee beyond that granularity.
pub fn generate(at: Timestamp) -> String {
    format!("{FOLIO_PREFIX}{}", at.timestamp_millis())
}

/// Whether a string looks like a generated folio (`NV-` followed by digits).
pub fn is_well_formed(folio: &str) -> bool {
    folio
        .strip_prefix(FOLIO_PREFIX)
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn generate_uses_millisecond_timestamp() {
        let at = chrono::Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(generate(at), "NV-1700000000123");
    }

    #[test]
    fn generated_folio_is_well_formed() {
        assert!(is_well_formed(&generate(chrono::Utc::now())));
    }

    #[test]
    fn rejects_malformed_folios() {
        assert!(!is_well_formed("NV-"));
        assert!(!is_well_formed("NV-12a4"));
        assert!(!is_well_formed("XX-1234"));
        assert!(!is_well_formed("1234"));
    }
}
