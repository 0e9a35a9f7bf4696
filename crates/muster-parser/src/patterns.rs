//! Lexical patterns of the roster layout
//!
//! Shared by the segmenter (what starts an entry) and the field rules
//! (what an entry's parts look like).

use regex::Regex;
use std::sync::LazyLock;

/// Phrases that stand in for a surname when an entry has no name
pub const UNNAMED_MARKERS: &[&str] = &[
    "AFRICAN AMERICAN MAN",
    "AFRICAN AMERICAN MEN",
    "NEGRO MAN",
    "NEGRO MEN",
    "PUBLIC NEGRO",
    "NEGRO FELLOW",
    "NEGRO SLAVE",
    "A NEGRO",
    "NEGRO",
    "SLAVE MAN",
    "SLAVE WOMAN",
    "SLAVE",
];

/// Archive source codes that open wrapped lines and look like surnames
pub const SOURCE_CODES: &[&str] = &["APALM", "VAPC", "WAR"];

/// Surnames that are racial placeholders rather than family names
const PLACEHOLDER_ROOTS: &[&str] = &["AFRICAN", "NEGRO", "BLACK", "COLORED", "MULATTO", "FREE BLACK"];

// Surname token sequence followed by a comma: "AARON,", "ACREY/ACRE/ACRY,", "O'BRIEN,"
pub(crate) static RECORD_START_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Z/'&.\- ]*[A-Z.]\s*,").unwrap());

pub(crate) static MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    let mut markers: Vec<&str> = UNNAMED_MARKERS.to_vec();
    // Alternation is leftmost-first, so longer phrases must come first.
    markers.sort_by_key(|m| std::cmp::Reverse(m.len()));
    let alternation = markers
        .iter()
        .map(|m| regex::escape(m))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"^(?:{alternation})\b")).unwrap()
});

pub(crate) static ROLE_KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:african american|negro|mulatto|black|colored|indian|other free|mixed descent|complexion|canawago|penobscot|micmac|maliseet|passam[ao]quoddy|mohawk|st\.? john[’']?s)\b",
    )
    .unwrap()
});

pub(crate) static ATTRIBUTION_HINT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:slaves? of|enslaved \w+ of|owned by|property of)\b").unwrap()
});

/// Whether `line` opens a surname-headed entry
///
/// A lone source code before the comma (`APALM, served 1777`) is a wrapped
/// citation, not a surname.
pub fn is_surname_header(line: &str) -> bool {
    RECORD_START_RE.find(line).is_some_and(|m| {
        let surname = m.as_str().trim_end_matches(',').trim();
        !is_source_code(surname)
    })
}

/// Whether `token` is a known archive source code
pub fn is_source_code(token: &str) -> bool {
    SOURCE_CODES.contains(&token)
}

/// Unnamed-person marker at the start of `line`, if any
pub fn unnamed_marker(line: &str) -> Option<&str> {
    MARKER_RE.find(line).map(|m| m.as_str())
}

/// Whether `text` carries a race, status or tribe keyword
pub fn has_role_keyword(text: &str) -> bool {
    ROLE_KEYWORD_RE.is_match(text)
}

/// Whether `text` contains enslaver-attribution wording
pub fn has_attribution(text: &str) -> bool {
    ATTRIBUTION_HINT_RE.is_match(text)
}

/// Whether an all-caps surname is a racial placeholder ("NEGRO", "AFRICAN AMERICAN")
pub fn is_placeholder_surname(surname: &str) -> bool {
    surname == surname.to_uppercase()
        && PLACEHOLDER_ROOTS.iter().any(|root| surname.starts_with(root))
}
