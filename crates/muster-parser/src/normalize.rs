//! OCR noise normalization shared by the segmenter and the extractor

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

/// Titles that head pages outside any single state's section
pub const SECTION_TITLES: &[&str] = &["Miscellaneous Naval and Military Records"];

static WRAP_HYPHEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\p{L})-[ \t]*\r?\n\s*(\p{Ll})").unwrap());
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static COMMA_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*,(?:\s*,)+\s*").unwrap());
static SPACE_BEFORE_PUNCT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+([,;])").unwrap());

/// Running page headers of one block
///
/// A running header is a known title followed by a page number, such as
/// `Virginia 509`. The known titles are the section titles plus the
/// block's state, so `March 1820` inside an entry is never taken for one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunningHeaders {
    titles: Vec<String>,
}

impl Default for RunningHeaders {
    fn default() -> Self {
        Self {
            titles: SECTION_TITLES.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl RunningHeaders {
    /// Section titles plus the name of `state`
    pub fn for_state(state: &str) -> Self {
        let mut headers = Self::default();
        let state = collapse_whitespace(state);
        if !state.is_empty() && !headers.titles.iter().any(|t| t.eq_ignore_ascii_case(&state)) {
            headers.titles.push(state);
        }
        headers
    }

    /// Whether a line is exactly a known title and a page number
    pub fn is_header(&self, line: &str) -> bool {
        let line = line.trim();
        self.title_and_number(line) == Some(line.len())
    }

    /// Length of a running header OCR inlined at the start of `line`
    ///
    /// Returns the byte length of the header and the whitespace after it.
    pub fn prefix_len(&self, line: &str) -> Option<usize> {
        let end = self.title_and_number(line)?;
        whitespace_after(line, end)
    }

    /// End of "<title> <number>" at the start of `line`
    fn title_and_number(&self, line: &str) -> Option<usize> {
        self.titles.iter().find_map(|title| {
            let head = line.get(..title.len())?;
            if !head.eq_ignore_ascii_case(title) {
                return None;
            }
            let after = &line[title.len()..];
            let number = after.trim_start();
            if number.len() == after.len() {
                return None;
            }
            let digits = leading_digits(number);
            (1..=4)
                .contains(&digits)
                .then(|| line.len() - number.len() + digits)
        })
    }
}

/// Whether a trimmed line is nothing but a page number
///
/// Only meaningful at the top or bottom of a block; inside an entry a
/// wrapped year looks the same.
pub fn is_page_number(line: &str) -> bool {
    let line = line.trim();
    (1..=4).contains(&line.len()) && leading_digits(line) == line.len()
}

/// Length of a page number OCR inlined at the start of `line`
pub fn page_number_prefix_len(line: &str) -> Option<usize> {
    let digits = leading_digits(line);
    if !(1..=4).contains(&digits) {
        return None;
    }
    whitespace_after(line, digits)
}

fn leading_digits(text: &str) -> usize {
    text.bytes().take_while(u8::is_ascii_digit).count()
}

/// `end` plus the whitespace run after it, if there is any
fn whitespace_after(line: &str, end: usize) -> Option<usize> {
    let rest = &line[end..];
    let gap = rest.len() - rest.trim_start().len();
    (gap > 0).then_some(end + gap)
}

/// Collapse whitespace runs into single spaces and trim
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").trim().to_string()
}

/// Normalize the raw text of one entry
///
/// Cuts out the artifact ranges (relative to `text`), merges words split
/// by a hyphen at a line wrap, then collapses all whitespace.
pub fn normalize_entry(
    text: &str,
    artifacts: impl IntoIterator<Item = Range<usize>>,
    merge_hyphens: bool,
) -> String {
    let mut kept = String::with_capacity(text.len());
    let mut cursor = 0;
    for range in artifacts {
        if range.start < cursor || range.end > text.len() {
            continue;
        }
        kept.push_str(&text[cursor..range.start]);
        kept.push('\n');
        cursor = range.end;
    }
    kept.push_str(&text[cursor..]);

    let joined = if merge_hyphens {
        WRAP_HYPHEN_RE.replace_all(&kept, "$1$2").into_owned()
    } else {
        kept
    };

    collapse_whitespace(&joined)
}

/// Tidy the unconsumed remainder of an entry
///
/// Rules cut fields out of the middle of the text and leave comma debris
/// behind; this folds repeated commas and trims separators at the ends.
pub fn clean_remainder(text: &str) -> String {
    let text = collapse_whitespace(text);
    let text = COMMA_RUN_RE.replace_all(&text, ", ");
    let text = SPACE_BEFORE_PUNCT_RE.replace_all(&text, "$1");
    text.trim_matches(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_headers() {
        let headers = RunningHeaders::for_state("New Hampshire");
        assert!(headers.is_header("  New Hampshire 52 "));
        assert!(headers.is_header("new hampshire 52"));
        assert!(headers.is_header("Miscellaneous Naval and Military Records 700"));
        assert!(!headers.is_header("Virginia 509"));
        assert!(!headers.is_header("New Hampshire 12345"));
        assert!(!headers.is_header("New Hampshire"));
        assert!(!headers.is_header("AARON, JOHN, Boston"));
        assert!(!headers.is_header(""));
    }

    #[test]
    fn test_dates_are_not_running_headers() {
        let headers = RunningHeaders::for_state("Maine");
        assert!(!headers.is_header("March 1820"));
        assert!(!headers.is_header("Boston 1776"));
        assert!(headers.is_header("Maine 23"));
    }

    #[test]
    fn test_page_numbers() {
        assert!(is_page_number("414"));
        assert!(is_page_number(" 7 "));
        assert!(!is_page_number("12345"));
        assert!(!is_page_number("served 3 years"));
        assert!(!is_page_number(""));
    }

    #[test]
    fn test_artifact_prefix() {
        let headers = RunningHeaders::for_state("Virginia");
        assert_eq!(headers.prefix_len("Virginia 509 AARON, JOHN"), Some(13));
        assert_eq!(headers.prefix_len("Virginia 509"), None);
        assert_eq!(headers.prefix_len("AARON, JOHN"), None);
        assert_eq!(page_number_prefix_len("509  AARON, JOHN"), Some(5));
        assert_eq!(page_number_prefix_len("AARON, JOHN"), None);
    }

    #[test]
    fn test_hyphen_merge_at_wrap() {
        let text = "Penobscot, Passamaquod-\ndy tribe";
        assert_eq!(normalize_entry(text, [], true), "Penobscot, Passamaquoddy tribe");
        assert_eq!(
            normalize_entry(text, [], false),
            "Penobscot, Passamaquod- dy tribe"
        );
    }

    #[test]
    fn test_hyphen_before_capital_is_kept() {
        let text = "ACREY-\nSMITH, JOHN";
        assert_eq!(normalize_entry(text, [], true), "ACREY- SMITH, JOHN");
    }

    #[test]
    fn test_artifacts_are_cut() {
        let text = "AARON, JOHN, served\nVirginia 509\nin the navy";
        let start = text.find("Virginia").unwrap();
        let artifact = start..start + "Virginia 509\n".len();
        assert_eq!(
            normalize_entry(text, [artifact], true),
            "AARON, JOHN, served in the navy"
        );
    }

    #[test]
    fn test_clean_remainder() {
        assert_eq!(clean_remainder(" , , VAPC:1:338 ,, Richmond , "), "VAPC:1:338, Richmond");
        assert_eq!(clean_remainder("; slave of John Smith;"), "slave of John Smith");
        assert_eq!(clean_remainder(""), "");
    }
}
