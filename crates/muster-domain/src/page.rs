//! Page module - printed/source page anchors and raw text blocks

use std::ops::RangeInclusive;

/// Where a state's printed page numbering begins in the source file
///
/// A state's section is printed with its own page numbers; the extracted
/// text source numbers pages physically. One anchor pins the two together
/// and every later page in the section follows at the same offset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageAnchor {
    /// State (section) name as printed, e.g. "Pennsylvania"
    pub state: String,

    /// First printed page covered by the anchor
    pub printed_start: u32,

    /// Source page holding `printed_start`
    pub source_start: u32,
}

impl PageAnchor {
    /// Create a new anchor
    pub fn new(state: impl Into<String>, printed_start: u32, source_start: u32) -> Self {
        Self {
            state: state.into(),
            printed_start,
            source_start,
        }
    }

    /// Signed distance from printed numbering to source numbering
    pub fn offset(&self) -> i64 {
        i64::from(self.source_start) - i64::from(self.printed_start)
    }

    /// Check that both page numbers are at least 1
    pub fn validate(&self) -> Result<(), String> {
        if self.state.trim().is_empty() {
            return Err("anchor state cannot be empty".to_string());
        }
        if self.printed_start == 0 {
            return Err(format!("anchor '{}': printed_start must be >= 1", self.state));
        }
        if self.source_start == 0 {
            return Err(format!("anchor '{}': source_start must be >= 1", self.state));
        }
        Ok(())
    }
}

/// Raw extracted text for one state's section
///
/// Produced by the text-extraction collaborator, consumed once by the
/// segmenter and never retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock {
    /// State the text belongs to
    pub state: String,

    /// Extracted text
    pub text: String,

    /// Source page the text was read from
    pub source_page: u32,

    /// Printed pages the block nominally covers, when known
    pub printed_pages: Option<RangeInclusive<u32>>,
}

impl RawBlock {
    /// Create a block read from a single source page
    pub fn new(state: impl Into<String>, text: impl Into<String>, source_page: u32) -> Self {
        Self {
            state: state.into(),
            text: text.into(),
            source_page,
            printed_pages: None,
        }
    }

    /// Record the printed page range this block covers
    pub fn with_printed_pages(mut self, pages: RangeInclusive<u32>) -> Self {
        self.printed_pages = Some(pages);
        self
    }
}
