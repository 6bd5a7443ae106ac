//! The `.icona/release.md` changelog format.
//!
//! The release notes file is a running changelog: a top-level title written by
//! the setup workflow, followed by one second-level heading per deploy with an
//! ISO-8601 timestamp and a bullet list of changes. Deploys only ever append;
//! existing content is preserved byte for byte.

use chrono::{DateTime, SecondsFormat, Utc};

/// Repository-relative path of the release notes file.
pub const RELEASE_NOTES_PATH: &str = ".icona/release.md";

/// Content of a freshly initialized release notes file.
pub fn initial_release_notes() -> String {
    "# Release Note\n".to_string()
}

/// Append a dated deploy entry to existing release notes.
///
/// The existing content is kept as an exact prefix of the result.
pub fn append_release_entry(existing: &str, timestamp: DateTime<Utc>) -> String {
    format!(
        "{existing}\n## {}\n- Update Icons\n",
        timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_initial_release_notes() {
        assert_eq!(initial_release_notes(), "# Release Note\n");
    }

    #[test]
    fn test_append_preserves_prefix() {
        let existing = "# Release Note\n\n## 2024-01-01T00:00:00.000Z\n- Update Icons\n";
        let ts = Utc.with_ymd_and_hms(2024, 6, 15, 12, 30, 0).unwrap();
        let updated = append_release_entry(existing, ts);
        assert!(updated.starts_with(existing));
        assert!(updated.ends_with("## 2024-06-15T12:30:00.000Z\n- Update Icons\n"));
    }

    #[test]
    fn test_append_heading_format() {
        let ts = Utc.with_ymd_and_hms(2023, 3, 2, 8, 5, 9).unwrap();
        let updated = append_release_entry("# Release Note\n", ts);
        assert_eq!(
            updated,
            "# Release Note\n\n## 2023-03-02T08:05:09.000Z\n- Update Icons\n"
        );
    }
}
