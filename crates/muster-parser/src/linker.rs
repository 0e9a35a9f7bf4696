//! Ownership linking for attribution states
//!
//! Finds an enslaver named in an entry's remarks ("slave of John Smith"),
//! tags the entry with `enslaved_by` and emits a synthetic `enslaver_of`
//! record for the owner.

use muster_domain::{FieldRecord, LinkedOwnerRecord, RelationType};
use regex::Regex;
use std::sync::LazyLock;

// An owner name runs to the next comma, semicolon, bracket or line end.
const OWNER: &str = r"(?P<owner>[^,;()\[\]\n]+)";

/// Name particles that may appear in lowercase inside an owner's name
const NAME_PARTICLES: &[&str] = &["de", "van", "von", "du", "la", "le", "del", "der"];

/// One attribution phrase
#[derive(Debug, Clone)]
pub struct AttributionPattern {
    label: &'static str,
    regex: Regex,
}

impl AttributionPattern {
    /// Compile a pattern; it must have a named `owner` group
    pub fn new(label: &'static str, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            label,
            regex: Regex::new(pattern)?,
        })
    }

    /// Label for logs
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Owner named by the first occurrence of this phrase in `text`
    pub fn capture(&self, text: &str) -> Option<String> {
        self.regex
            .captures_iter(text)
            .filter_map(|caps| caps.name("owner").map(|m| clean_owner(m.as_str())))
            .find(|owner| !owner.is_empty())
    }
}

static STANDARD_PATTERNS: LazyLock<Vec<AttributionPattern>> = LazyLock::new(|| {
    [
        ("the_slave_of_paren", format!(r"(?i)\(\s*the slave of\s*\)\s*{OWNER}")),
        ("the_slave_of", r"(?i)\(\s*the slave of\s+(?P<owner>[^()]+?)\s*\)".to_string()),
        (
            "enslaved_person_of",
            format!(r"(?i)\benslaved (?:man|woman|men|women|person|people|boy|girl) of\s+{OWNER}"),
        ),
        ("slave_of", format!(r"(?i)\bslaves? of\s+{OWNER}")),
        ("owned_by", format!(r"(?i)\bowned by\s+{OWNER}")),
        ("property_of", format!(r"(?i)\bproperty of\s+{OWNER}")),
    ]
    .into_iter()
    .map(|(label, pattern)| AttributionPattern::new(label, &pattern).unwrap())
    .collect()
});

/// Detects owner attributions and builds the linked records
///
/// Patterns are tried in priority order and the first one that yields a
/// name wins, so an entry links to at most one owner. An entry naming
/// several owners links only the first; the rest stay in its remarks.
#[derive(Debug, Clone)]
pub struct OwnershipLinker {
    patterns: Vec<AttributionPattern>,
}

impl Default for OwnershipLinker {
    fn default() -> Self {
        Self::standard()
    }
}

impl OwnershipLinker {
    /// Linker with the standard attribution phrases
    pub fn standard() -> Self {
        Self {
            patterns: STANDARD_PATTERNS.clone(),
        }
    }

    /// Linker with custom patterns, in priority order
    pub fn new(patterns: Vec<AttributionPattern>) -> Self {
        Self { patterns }
    }

    /// Owner named in `remarks`, with the label of the pattern that found it
    pub fn find_owner(&self, remarks: &str) -> Option<(&'static str, String)> {
        self.patterns
            .iter()
            .find_map(|p| p.capture(remarks).map(|owner| (p.label(), owner)))
    }

    /// Link one record
    ///
    /// On a match the record gains `owner_name` and `relation_type =
    /// enslaved_by` and a linked owner record is returned; its remarks are
    /// left untouched. Records that are already linked, or whose remarks
    /// name nobody, come back unchanged.
    pub fn link(&self, mut record: FieldRecord) -> (FieldRecord, Option<LinkedOwnerRecord>) {
        if !record.relation_type.is_empty() {
            return (record, None);
        }
        let Some((_, owner)) = self.find_owner(&record.remarks) else {
            return (record, None);
        };

        record.owner_name = owner.clone();
        record.relation_type = RelationType::EnslavedBy.as_str().to_string();
        let linked = LinkedOwnerRecord::new(&owner, &record);
        (record, Some(linked))
    }
}

/// Trim a captured owner name down to the name itself
///
/// Stops at a conjunction (" and ", " or ", " & ") and at the first
/// lowercase word that is not a name particle, then drops trailing periods.
fn clean_owner(raw: &str) -> String {
    let mut words = Vec::new();
    for word in raw.split_whitespace() {
        let lower = word.to_lowercase();
        if matches!(lower.as_str(), "and" | "or" | "&") {
            break;
        }
        let starts_lower = word.chars().next().is_some_and(char::is_lowercase);
        if starts_lower && !NAME_PARTICLES.contains(&lower.as_str()) {
            break;
        }
        words.push(word);
    }
    while words
        .last()
        .is_some_and(|w| NAME_PARTICLES.contains(&w.to_lowercase().as_str()))
    {
        words.pop();
    }
    words.join(" ").trim_end_matches('.').trim().to_string()
}
