//! Personal color codes
//!
//! Colors travel in three shapes:
//! - **Coarse**: a season alone (`spring`, `summer`, `autumn`, `winter`)
//! - **Detailed**: season plus sub-variant, hyphen-joined (`spring-light`)
//! - **Wire**: detailed with the first hyphen replaced by an underscore
//!   (`spring_light`), used only in outbound recommendation requests
//!
//! Manual selection yields detailed codes, image prediction may yield either,
//! so both shapes coexist in the wizard state.

use serde::{Deserialize, Serialize};

/// Separator between the detailed season and its sub-variant
pub const DETAIL_SEPARATOR: char = '-';

/// Separator used by the recommendation service for detailed codes
pub const WIRE_SEPARATOR: char = '_';

/// Separator between the reason and suggestions segments of a prediction note
pub const NOTE_SEPARATOR: &str = " | ";

/// Detailed code substituted for an unrecognized coarse prediction
pub const FALLBACK_DETAILED: &str = "spring-light";

/// Display names for every known code, detailed codes first
const DISPLAY_NAMES: &[(&str, &str)] = &[
    ("spring-light", "봄 라이트"),
    ("spring-bright", "봄 브라이트"),
    ("summer-light", "여름 라이트"),
    ("summer-mute", "여름 뮤트"),
    ("autumn-mute", "가을 뮤트"),
    ("autumn-deep", "가을 딥"),
    ("winter-bright", "겨울 브라이트"),
    ("winter-dark", "겨울 다크"),
    ("spring", "봄 웜톤"),
    ("summer", "여름 쿨톤"),
    ("autumn", "가을 웜톤"),
    ("winter", "겨울 쿨톤"),
];

/// Default detailed variant for each coarse season
const COARSE_DEFAULTS: &[(&str, &str)] = &[
    ("spring", "spring-light"),
    ("summer", "summer-light"),
    ("autumn", "autumn-mute"),
    ("winter", "winter-bright"),
];

/// Convert a coarse or detailed code to the recommendation wire format
///
/// Codes without `-` or `_` are coarse and pass through unchanged. Otherwise
/// only the first `-` becomes `_`; `spring-light-x` yields `spring_light-x`.
pub fn to_wire_format(code: &str) -> String {
    if !code.contains(DETAIL_SEPARATOR) && !code.contains(WIRE_SEPARATOR) {
        return code.to_string();
    }
    code.replacen(DETAIL_SEPARATOR, "_", 1)
}

/// Convert a predicted class to the app's detailed format
///
/// Anything already containing `-` is returned as-is. Coarse names are
/// matched case-insensitively against the season defaults; unknown names
/// fall back to [`FALLBACK_DETAILED`].
pub fn to_app_format(predicted_class: &str) -> String {
    if predicted_class.contains(DETAIL_SEPARATOR) {
        return predicted_class.to_string();
    }

    let lowered = predicted_class.to_lowercase();
    COARSE_DEFAULTS
        .iter()
        .find(|(coarse, _)| *coarse == lowered)
        .map(|(_, detailed)| *detailed)
        .unwrap_or(FALLBACK_DETAILED)
        .to_string()
}

/// Localized display name for a coarse or detailed code
///
/// Total: unknown codes are returned unchanged.
pub fn display_name(code: &str) -> &str {
    DISPLAY_NAMES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, name)| *name)
        .unwrap_or(code)
}

/// Tone name for a coarse predicted class, matched case-insensitively
///
/// Detailed or unknown classes are returned unchanged.
pub fn coarse_class_name(class: &str) -> &str {
    let lowered = class.to_lowercase();
    COARSE_DEFAULTS
        .iter()
        .find(|(coarse, _)| *coarse == lowered)
        .map(|(coarse, _)| display_name(coarse))
        .unwrap_or(class)
}

/// Whether `code` is one of the known coarse or detailed codes
pub fn is_known_code(code: &str) -> bool {
    DISPLAY_NAMES.iter().any(|(known, _)| *known == code)
}

/// Every known code paired with its display name
pub fn known_codes() -> &'static [(&'static str, &'static str)] {
    DISPLAY_NAMES
}

/// Prediction note split into its two segments
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedNote {
    /// Why the color was predicted
    pub reason: String,
    /// Styling suggestions for the color
    pub suggestions: String,
}

/// Split a prediction note on `" | "`
///
/// The first segment is the reason, the second the suggestions; further
/// segments are dropped. Missing segments are empty strings.
pub fn parse_note(note: Option<&str>) -> ParsedNote {
    let Some(note) = note else {
        return ParsedNote::default();
    };

    let mut parts = note.split(NOTE_SEPARATOR);
    ParsedNote {
        reason: parts.next().unwrap_or_default().to_string(),
        suggestions: parts.next().unwrap_or_default().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format_identity_for_coarse() {
        for code in ["spring", "summer", "autumn", "winter", "", "Weird Value"] {
            assert_eq!(to_wire_format(code), code);
        }
    }

    #[test]
    fn test_wire_format_replaces_first_hyphen_only() {
        assert_eq!(to_wire_format("spring-light"), "spring_light");
        assert_eq!(to_wire_format("spring-light-x"), "spring_light-x");
        assert_eq!(to_wire_format("-leading"), "_leading");
    }

    #[test]
    fn test_wire_format_leaves_underscored_codes() {
        assert_eq!(to_wire_format("summer_mute"), "summer_mute");
        assert_eq!(to_wire_format("summer_mute-x"), "summer_mute_x");
    }

    #[test]
    fn test_app_format_identity_for_detailed() {
        for code in ["spring-light", "WINTER-dark", "x-y-z", "-"] {
            assert_eq!(to_app_format(code), code);
        }
    }

    #[test]
    fn test_app_format_maps_coarse_case_insensitively() {
        assert_eq!(to_app_format("spring"), "spring-light");
        assert_eq!(to_app_format("Summer"), "summer-light");
        assert_eq!(to_app_format("AUTUMN"), "autumn-mute");
        assert_eq!(to_app_format("winter"), "winter-bright");
    }

    #[test]
    fn test_app_format_unknown_falls_back() {
        assert_eq!(to_app_format("monsoon"), FALLBACK_DETAILED);
        assert_eq!(to_app_format(""), FALLBACK_DETAILED);
        assert_eq!(to_app_format("summer_mute"), FALLBACK_DETAILED);
    }

    #[test]
    fn test_display_name_is_total() {
        assert_eq!(display_name("spring-light"), "봄 라이트");
        assert_eq!(display_name("winter"), "겨울 쿨톤");
        assert_eq!(display_name("unknown-code"), "unknown-code");
        assert_eq!(display_name(""), "");
        // Lookup is exact, not case-folded
        assert_eq!(display_name("SPRING"), "SPRING");
    }

    #[test]
    fn test_coarse_class_name() {
        assert_eq!(coarse_class_name("Summer"), "여름 쿨톤");
        assert_eq!(coarse_class_name("autumn"), "가을 웜톤");
        assert_eq!(coarse_class_name("spring-light"), "spring-light");
    }

    #[test]
    fn test_known_codes() {
        assert!(is_known_code("autumn-deep"));
        assert!(is_known_code("winter"));
        assert!(!is_known_code("autumn-light"));
        assert_eq!(known_codes().len(), 12);
    }

    #[test]
    fn test_parse_note_empty() {
        assert_eq!(parse_note(None), ParsedNote::default());
        assert_eq!(parse_note(Some("")), ParsedNote::default());
    }

    #[test]
    fn test_parse_note_segments() {
        let parsed = parse_note(Some("A | B"));
        assert_eq!(parsed.reason, "A");
        assert_eq!(parsed.suggestions, "B");

        let parsed = parse_note(Some("A"));
        assert_eq!(parsed.reason, "A");
        assert_eq!(parsed.suggestions, "");

        let parsed = parse_note(Some("A | B | C"));
        assert_eq!(parsed.reason, "A");
        assert_eq!(parsed.suggestions, "B");

        // Separator needs the surrounding spaces
        let parsed = parse_note(Some("A|B"));
        assert_eq!(parsed.reason, "A|B");
        assert_eq!(parsed.suggestions, "");
    }
}
