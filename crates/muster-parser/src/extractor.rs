//! Field extraction: one span in, one fixed-schema record out

use crate::normalize::{clean_remainder, normalize_entry};
use crate::rules::{standard_rules, Assignment, FieldRule};
use muster_domain::{FieldRecord, RecordSpan};
use tracing::trace;

/// Turns a [`RecordSpan`] into a [`FieldRecord`]
///
/// The span text is normalized, then each rule is tried in order against
/// what the previous rules left. A field is written at most once; a rule
/// whose fields are already filled is skipped. The final remainder is the
/// record's remarks. Extraction never fails: an unparsed span becomes a
/// record with only remarks and source page set.
pub struct FieldExtractor {
    rules: Vec<Box<dyn FieldRule>>,
    merge_hyphens: bool,
}

impl FieldExtractor {
    /// Extractor with an explicit rule list
    pub fn new(rules: Vec<Box<dyn FieldRule>>) -> Self {
        Self {
            rules,
            merge_hyphens: true,
        }
    }

    /// Extractor for surname-headed entries
    pub fn general() -> Self {
        Self::new(standard_rules(false))
    }

    /// Extractor that also reads unnamed-person markers
    pub fn with_unnamed_markers() -> Self {
        Self::new(standard_rules(true))
    }

    /// Toggle merging of words hyphenated across a line wrap
    pub fn merge_hyphens(mut self, enabled: bool) -> Self {
        self.merge_hyphens = enabled;
        self
    }

    /// Names of the rules in the order they run
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Extract the fields of one span
    pub fn extract(&self, span: &RecordSpan, source_page: u32) -> FieldRecord {
        let mut record = FieldRecord::for_page(source_page);
        let text = normalize_entry(&span.text, span.local_artifacts(), self.merge_hyphens);

        if span.unparsed {
            record.remarks = text;
            return record;
        }

        let mut rest = text;
        for rule in &self.rules {
            if rule.fills().iter().any(|&f| !record.get(f).is_empty()) {
                continue;
            }
            let Some(found) = rule.attempt(&rest) else {
                continue;
            };
            trace!(rule = rule.name(), "Rule matched");
            for assignment in found.assignments {
                apply(&mut record, assignment);
            }
            rest = found.rest;
        }

        record.remarks = clean_remainder(&rest);
        record
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::general()
    }
}

impl std::fmt::Debug for FieldExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldExtractor")
            .field("rules", &self.rule_names())
            .field("merge_hyphens", &self.merge_hyphens)
            .finish()
    }
}

fn apply(record: &mut FieldRecord, assignment: Assignment) {
    match assignment {
        Assignment::Set(field, value) => {
            let slot = record.get_mut(field);
            if slot.is_empty() {
                *slot = value;
            }
        }
        Assignment::Append(field, value) => {
            let slot = record.get_mut(field);
            if !slot.is_empty() {
                slot.push(' ');
            }
            slot.push_str(&value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Segmenter;

    fn extract_one(raw: &str, markers: bool) -> FieldRecord {
        let segmenter = Segmenter::new()
            .with_state("Virginia")
            .with_unnamed_markers(markers);
        let extractor = if markers {
            FieldExtractor::with_unnamed_markers()
        } else {
            FieldExtractor::general()
        };
        let spans = segmenter.segment(raw);
        assert_eq!(spans.len(), 1);
        extractor.extract(&spans[0], 245)
    }

    #[test]
    fn test_basic_entry() {
        let record = extract_one("AARON, JOHN, Boston\n", false);
        assert_eq!(record.name, "AARON, JOHN");
        assert_eq!(record.locality, "Boston");
        assert_eq!(record.remarks, "");
        assert_eq!(record.source_page, "245");
        assert!(record.owner_name.is_empty());
        assert!(record.relation_type.is_empty());
    }

    #[test]
    fn test_wrapped_entry() {
        let record = extract_one(
            "ACREY/ACRE/ACRY, AMBROSE, African American,\nVAPC:1:338, served in the\nnavy, Richmond\n",
            false,
        );
        assert_eq!(record.name, "ACREY/ACRE/ACRY, AMBROSE");
        assert_eq!(record.rank_or_role, "African American");
        assert_eq!(record.locality, "Richmond");
        assert_eq!(record.remarks, "VAPC:1:338, served in the navy");
    }

    #[test]
    fn test_running_header_and_hyphen_wrap() {
        let record = extract_one(
            "SOCKALEXIS, JOSEPH, Penobscot, served under Capt. Lane in the re-\nVirginia 509\ngiment\n",
            false,
        );
        assert_eq!(record.rank_or_role, "Penobscot");
        assert_eq!(record.remarks, "served under Capt. Lane in the regiment");
    }

    #[test]
    fn test_unnamed_marker_entry() {
        let record = extract_one("NEGRO MAN, slave of John Smith, Norfolk\n", true);
        assert_eq!(record.name, "NEGRO MAN");
        assert_eq!(record.rank_or_role, "African American");
        assert_eq!(record.locality, "Norfolk");
        assert_eq!(record.remarks, "slave of John Smith");
    }

    #[test]
    fn test_alias_appended_to_name() {
        let record = extract_one("BROWN, CUFF, alias CUFF TROOP, Hartford\n", false);
        assert_eq!(record.name, "BROWN, CUFF (alias CUFF TROOP)");
        assert_eq!(record.locality, "Hartford");
    }

    #[test]
    fn test_unparsed_span_keeps_text_in_remarks() {
        let span = RecordSpan::unparsed("continued narrative\nmore", 0, 24);
        let record = FieldExtractor::general().extract(&span, 12);
        assert_eq!(record.name, "");
        assert_eq!(record.remarks, "continued narrative more");
        assert_eq!(record.source_page, "12");
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let raw = "AARON, JOHN, African American, VAPC:1:338, Richmond\n";
        let span = &Segmenter::new().segment(raw)[0];
        let extractor = FieldExtractor::general();
        assert_eq!(extractor.extract(span, 9), extractor.extract(span, 9));
    }

    #[test]
    fn test_debug_lists_rules() {
        let debug = format!("{:?}", FieldExtractor::general());
        assert!(debug.contains("surname"));
        assert!(!debug.contains("unnamed_marker"));
    }
}
