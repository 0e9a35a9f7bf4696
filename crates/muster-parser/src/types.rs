//! Result types for block parsing

use muster_domain::FieldRecord;
use serde::Serialize;

/// How a state's entries are read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StateProfile {
    /// Surname-headed entries, no owner linking
    General,

    /// Entries may be headed by unnamed-person markers and name enslavers;
    /// the ownership linker runs
    Attributed,
}

impl StateProfile {
    /// Profile name for logs and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            StateProfile::General => "general",
            StateProfile::Attributed => "attributed",
        }
    }

    /// Whether unnamed-person markers start entries
    pub fn unnamed_markers(&self) -> bool {
        matches!(self, StateProfile::Attributed)
    }

    /// Whether the ownership linker runs
    pub fn links_owners(&self) -> bool {
        matches!(self, StateProfile::Attributed)
    }
}

impl std::fmt::Display for StateProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counts for one parsed block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockReport {
    /// State the block belongs to
    pub state: String,

    /// Source page of the block
    pub source_page: u32,

    /// Profile the block was parsed with
    pub profile: StateProfile,

    /// Spans the segmenter produced
    pub spans: usize,

    /// Spans that yielded a named record
    pub parsed: usize,

    /// Spans with no recognizable header or name
    pub unparsed: usize,

    /// Linked owner records emitted
    pub linked: usize,

    /// First line of every unparsed span, for the parse log
    pub unparsed_headers: Vec<String>,
}

impl BlockReport {
    /// Empty report for a block
    pub fn new(state: impl Into<String>, source_page: u32, profile: StateProfile) -> Self {
        Self {
            state: state.into(),
            source_page,
            profile,
            spans: 0,
            parsed: 0,
            unparsed: 0,
            linked: 0,
            unparsed_headers: Vec::new(),
        }
    }

    /// Text was found but nothing parsed
    ///
    /// Usually means the page offset is wrong and the text belongs to a
    /// different layout (an index page, another state's section).
    pub fn is_suspect_offset(&self) -> bool {
        self.spans > 0 && self.parsed == 0
    }
}

/// Records and report for one block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockOutput {
    /// Records in emission order: each linked owner record directly follows
    /// the record it came from
    pub records: Vec<FieldRecord>,

    /// Counts for the block
    pub report: BlockReport,
}
