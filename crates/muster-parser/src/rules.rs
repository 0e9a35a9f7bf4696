//! Field extraction rules
//!
//! Each rule recognizes one kind of field in the normalized text of an
//! entry and cuts it out, handing the rest to the next rule. Rules are
//! tried in a fixed order by [`FieldExtractor`](crate::FieldExtractor);
//! whatever no rule claims ends up in the remarks.

use crate::normalize::clean_remainder;
use crate::patterns::{
    has_attribution, has_role_keyword, is_placeholder_surname, MARKER_RE, ROLE_KEYWORD_RE,
};
use muster_domain::Field;
use regex::Regex;
use std::sync::LazyLock;

/// A value a rule wants written into the record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignment {
    /// Fill an empty field
    Set(Field, String),
    /// Add to a field, separated by a space when it already holds text
    Append(Field, String),
}

impl Assignment {
    /// Field the assignment targets
    pub fn field(&self) -> Field {
        match self {
            Assignment::Set(field, _) | Assignment::Append(field, _) => *field,
        }
    }
}

/// Outcome of a successful rule attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    /// Values to write
    pub assignments: Vec<Assignment>,

    /// Text left for later rules
    pub rest: String,
}

/// One field recognizer
pub trait FieldRule: Send + Sync {
    /// Rule name for logs
    fn name(&self) -> &'static str;

    /// Fields the rule fills with [`Assignment::Set`]
    ///
    /// The extractor skips the rule once any of these is populated, so a
    /// rule never consumes text it cannot store.
    fn fills(&self) -> &'static [Field];

    /// Try the rule against the remaining text of an entry
    fn attempt(&self, input: &str) -> Option<RuleMatch>;
}

/// Standard rule order
pub fn standard_rules(unnamed_markers: bool) -> Vec<Box<dyn FieldRule>> {
    let mut rules: Vec<Box<dyn FieldRule>> = Vec::new();
    if unnamed_markers {
        rules.push(Box::new(UnnamedMarkerRule));
    }
    rules.push(Box::new(SurnameRule));
    rules.push(Box::new(AliasRule));
    rules.push(Box::new(RoleRule));
    rules.push(Box::new(LocalityRule));
    rules
}

// ---------------------------------------------------------------------------
// Name
// ---------------------------------------------------------------------------

/// Entries headed by a marker phrase (`NEGRO MAN`, `SLAVE`) instead of a surname
#[derive(Debug, Clone, Copy, Default)]
pub struct UnnamedMarkerRule;

impl FieldRule for UnnamedMarkerRule {
    fn name(&self) -> &'static str {
        "unnamed_marker"
    }

    fn fills(&self) -> &'static [Field] {
        &[Field::Name, Field::RankOrRole]
    }

    fn attempt(&self, input: &str) -> Option<RuleMatch> {
        let marker = MARKER_RE.find(input)?;
        Some(RuleMatch {
            assignments: vec![
                Assignment::Set(Field::Name, marker.as_str().to_string()),
                Assignment::Set(Field::RankOrRole, "African American".to_string()),
            ],
            rest: trim_separators(&input[marker.end()..]).to_string(),
        })
    }
}

static SURNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<surname>[A-Z][A-Z/'&.\- ]*[A-Z.])\s*,\s*").unwrap());
static GIVEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z](?:[A-Z .'\-]*[A-Z.])?$").unwrap());

/// `SURNAME, GIVEN` header
///
/// The given name is the next comma-separated chunk when it is written in
/// capitals like the surname. Racial placeholder surnames take no given
/// name.
#[derive(Debug, Clone, Copy, Default)]
pub struct SurnameRule;

impl FieldRule for SurnameRule {
    fn name(&self) -> &'static str {
        "surname"
    }

    fn fills(&self) -> &'static [Field] {
        &[Field::Name]
    }

    fn attempt(&self, input: &str) -> Option<RuleMatch> {
        let caps = SURNAME_RE.captures(input)?;
        let surname = caps.name("surname")?.as_str().trim();
        let after = &input[caps.get(0)?.end()..];

        let (chunk, tail) = match after.find(',') {
            Some(idx) => (&after[..idx], &after[idx + 1..]),
            None => (after, ""),
        };
        let given = chunk.trim();

        let takes_given = !is_placeholder_surname(surname)
            && GIVEN_RE.is_match(given)
            && !has_role_keyword(given)
            && MARKER_RE.find(given).is_none();

        let (name, rest) = if takes_given {
            (format!("{surname}, {given}"), tail)
        } else {
            (surname.to_string(), after)
        };

        Some(RuleMatch {
            assignments: vec![Assignment::Set(Field::Name, name)],
            rest: trim_separators(rest).to_string(),
        })
    }
}

static ALIAS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:\b(?i:alias|aka)\b\.?|\b(?i:a\.k\.a)\.?)\s+(?P<alias>[A-Z][A-Za-z'\-]*(?:\s+[A-Z][A-Za-z'\-]*)*)",
    )
    .unwrap()
});

/// `alias JACK` / `aka JACK` / `a.k.a. JACK`, appended to the name
#[derive(Debug, Clone, Copy, Default)]
pub struct AliasRule;

impl FieldRule for AliasRule {
    fn name(&self) -> &'static str {
        "alias"
    }

    fn fills(&self) -> &'static [Field] {
        &[]
    }

    fn attempt(&self, input: &str) -> Option<RuleMatch> {
        let aliases: Vec<&str> = ALIAS_RE
            .captures_iter(input)
            .filter_map(|caps| caps.name("alias").map(|m| m.as_str()))
            .collect();
        if aliases.is_empty() {
            return None;
        }

        let rest = ALIAS_RE.replace_all(input, "");
        Some(RuleMatch {
            assignments: vec![Assignment::Append(
                Field::Name,
                format!("(alias {})", aliases.join("; ")),
            )],
            rest: clean_remainder(&rest),
        })
    }
}

// ---------------------------------------------------------------------------
// Descriptors
// ---------------------------------------------------------------------------

static BRACKETED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((?P<paren>[^()]*)\)|\[(?P<square>[^\[\]]*)\]").unwrap());

/// Race, status and tribe descriptors
///
/// Picks up bracketed notes and comma-separated chunks carrying a role
/// keyword. Chunks that also name an enslaver are left for the linker.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleRule;

impl FieldRule for RoleRule {
    fn name(&self) -> &'static str {
        "role"
    }

    fn fills(&self) -> &'static [Field] {
        &[Field::RankOrRole]
    }

    fn attempt(&self, input: &str) -> Option<RuleMatch> {
        let mut roles: Vec<String> = Vec::new();

        let without_brackets = BRACKETED_RE.replace_all(input, |caps: &regex::Captures| {
            let inner = caps
                .name("paren")
                .or_else(|| caps.name("square"))
                .map_or("", |m| m.as_str())
                .trim();
            if has_role_keyword(inner) && !has_attribution(inner) {
                roles.push(inner.to_string());
                String::new()
            } else {
                caps[0].to_string()
            }
        });

        let mut kept = Vec::new();
        for chunk in without_brackets.split(',') {
            let chunk = chunk.trim();
            if chunk.is_empty() {
                continue;
            }
            if ROLE_KEYWORD_RE.is_match(chunk) && !has_attribution(chunk) {
                roles.push(chunk.to_string());
            } else {
                kept.push(chunk);
            }
        }

        if roles.is_empty() {
            return None;
        }

        Some(RuleMatch {
            assignments: vec![Assignment::Set(Field::RankOrRole, roles.join("; "))],
            rest: clean_remainder(&kept.join(", ")),
        })
    }
}

const PLACE_CONNECTORS: &[&str] = &["of", "and", "the", "on", "upon", "de", "la", "le", "du"];

/// Residence or town: the last comma-separated chunk when it reads like a place
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalityRule;

impl LocalityRule {
    fn looks_like_place(chunk: &str) -> bool {
        let lower = chunk.to_lowercase();
        if lower == "no residence given" {
            return true;
        }
        let chunk = ["res. ", "residence "]
            .into_iter()
            .find_map(|prefix| {
                lower
                    .starts_with(prefix)
                    .then(|| chunk.get(prefix.len()..).unwrap_or_default().trim())
            })
            .unwrap_or(chunk);

        if chunk.is_empty()
            || has_attribution(chunk)
            || has_role_keyword(chunk)
            || chunk.chars().any(|c| c.is_ascii_digit() || "():;[]".contains(c))
        {
            return false;
        }
        // All capitals reads as a source code ("APALM"), not a town
        if !chunk.chars().any(|c| c.is_lowercase()) {
            return false;
        }

        let words: Vec<&str> = chunk.split_whitespace().collect();
        words.len() <= 5
            && words.first().is_some_and(|w| starts_upper(w))
            && words
                .iter()
                .all(|w| starts_upper(w) || PLACE_CONNECTORS.contains(w))
    }
}

impl FieldRule for LocalityRule {
    fn name(&self) -> &'static str {
        "locality"
    }

    fn fills(&self) -> &'static [Field] {
        &[Field::Locality]
    }

    fn attempt(&self, input: &str) -> Option<RuleMatch> {
        let chunks: Vec<&str> = input
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .collect();
        let (last, before) = chunks.split_last()?;
        let last = last.trim_end_matches('.');
        if !Self::looks_like_place(last) {
            return None;
        }

        Some(RuleMatch {
            assignments: vec![Assignment::Set(Field::Locality, last.to_string())],
            rest: before.join(", "),
        })
    }
}

fn starts_upper(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

fn trim_separators(text: &str) -> &str {
    text.trim_matches(|c: char| c == ',' || c == ';' || c.is_whitespace())
}
