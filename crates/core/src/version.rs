//! Version extraction from captured markup.
//!
//! The application's entry document references its asset manifest as
//! `manifest-<version>.json`; the version substring becomes the cache key
//! for the manifest payload captured alongside the snapshot.

use std::sync::LazyLock;

use regex::Regex;

/// Sentinel returned when the markup carries no manifest reference.
///
/// Still a valid cache key: an un-versioned capture is stored under it.
pub const DEFAULT_VERSION: &str = "default-version";

static MANIFEST_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"manifest-([\d.]+)\.json").unwrap());

/// Extract the manifest version referenced by the markup.
///
/// Takes the first `manifest-<version>.json` occurrence (version characters
/// restricted to digits and dots). Returns [`DEFAULT_VERSION`] when no
/// reference is present; never fails.
pub fn extract_version(markup: &str) -> String {
    MANIFEST_REF
        .captures(markup)
        .map(|c| c[1].to_string())
        .unwrap_or_else(|| DEFAULT_VERSION.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_version() {
        let markup = r#"<script src="manifest-2.3.json"></script>"#;
        assert_eq!(extract_version(markup), "2.3");
    }

    #[test]
    fn test_multi_part_version() {
        assert_eq!(extract_version("...manifest-2.2412.54.json..."), "2.2412.54");
    }

    #[test]
    fn test_no_reference_returns_sentinel() {
        assert_eq!(extract_version("<html><body>plain</body></html>"), DEFAULT_VERSION);
        assert_eq!(extract_version(""), DEFAULT_VERSION);
    }

    #[test]
    fn test_first_match_wins() {
        let markup = "manifest-1.0.json then manifest-2.0.json";
        assert_eq!(extract_version(markup), "1.0");
    }

    #[test]
    fn test_non_numeric_version_not_matched() {
        assert_eq!(extract_version("manifest-beta.json"), DEFAULT_VERSION);
    }
}
