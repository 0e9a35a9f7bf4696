//! Span module - the raw text region of one roster entry

use std::ops::Range;

/// A contiguous slice of a raw block believed to hold one person's entry
///
/// Offsets are byte offsets into the block text, `start_offset..end_offset`.
/// Spans produced for one block are in document order and do not overlap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSpan {
    /// Byte offset where the span starts (the header line's start)
    pub start_offset: usize,

    /// Byte offset one past the span's last byte
    pub end_offset: usize,

    /// Header line with any inlined page artifact removed
    pub header_line: String,

    /// The raw text of the span, `raw[start_offset..end_offset]`
    pub text: String,

    /// No record header was found for this text
    pub unparsed: bool,

    /// Block-relative ranges of running headers/footers inside the span
    pub artifacts: Vec<Range<usize>>,
}

impl RecordSpan {
    /// Create a span over `raw[start..end]`
    pub fn new(raw: &str, start: usize, end: usize, header_line: impl Into<String>) -> Self {
        Self {
            start_offset: start,
            end_offset: end,
            header_line: header_line.into(),
            text: raw[start..end].to_string(),
            unparsed: false,
            artifacts: Vec::new(),
        }
    }

    /// Create a span that no header pattern claimed
    pub fn unparsed(raw: &str, start: usize, end: usize) -> Self {
        let header_line = raw[start..end]
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or_default()
            .to_string();
        Self {
            unparsed: true,
            ..Self::new(raw, start, end, header_line)
        }
    }

    /// Byte range of the span within the block
    pub fn range(&self) -> Range<usize> {
        self.start_offset..self.end_offset
    }

    /// Length of the span in bytes
    pub fn len(&self) -> usize {
        self.end_offset - self.start_offset
    }

    /// Whether the span covers no text
    pub fn is_empty(&self) -> bool {
        self.start_offset == self.end_offset
    }

    /// Artifact ranges relative to the span's own text
    pub fn local_artifacts(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        self.artifacts
            .iter()
            .map(move |r| (r.start - self.start_offset)..(r.end - self.start_offset))
    }
}
