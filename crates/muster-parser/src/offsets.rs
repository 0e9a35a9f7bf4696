//! Printed page → source page resolution

use crate::error::ParserError;
use muster_domain::PageAnchor;
use std::collections::BTreeMap;

/// Immutable per-state table of page anchors
///
/// Built once at startup and only read afterwards. States are matched
/// case-insensitively after trimming.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnchorTable {
    anchors: BTreeMap<String, PageAnchor>,
}

impl AnchorTable {
    /// Build a table, rejecting invalid anchors and duplicate states
    pub fn new(anchors: impl IntoIterator<Item = PageAnchor>) -> Result<Self, ParserError> {
        let mut table = BTreeMap::new();
        for anchor in anchors {
            anchor.validate().map_err(ParserError::Config)?;
            let key = state_key(&anchor.state);
            if table.contains_key(&key) {
                return Err(ParserError::Config(format!(
                    "duplicate page anchor for state '{}'",
                    anchor.state.trim()
                )));
            }
            table.insert(key, anchor);
        }
        Ok(Self { anchors: table })
    }

    /// A table with no anchors: every state maps pages to themselves
    pub fn empty() -> Self {
        Self::default()
    }

    /// Map a printed page of `state` to its source page
    ///
    /// States without an anchor map every page to itself. A page before
    /// the state's anchor, or page 0, is an [`ParserError::InvalidPage`].
    pub fn resolve(&self, state: &str, printed_page: u32) -> Result<u32, ParserError> {
        let anchor = self.get(state);

        if printed_page == 0 {
            return Err(ParserError::InvalidPage {
                state: state.trim().to_string(),
                printed_page,
                printed_start: anchor.map_or(1, |a| a.printed_start),
            });
        }

        let Some(anchor) = anchor else {
            return Ok(printed_page);
        };

        let invalid = || ParserError::InvalidPage {
            state: anchor.state.clone(),
            printed_page,
            printed_start: anchor.printed_start,
        };

        printed_page
            .checked_sub(anchor.printed_start)
            .and_then(|delta| anchor.source_start.checked_add(delta))
            .ok_or_else(invalid)
    }

    /// Anchor for `state`, if one is known
    pub fn get(&self, state: &str) -> Option<&PageAnchor> {
        self.anchors.get(&state_key(state))
    }

    /// Anchors ordered by printed start page
    pub fn anchors(&self) -> Vec<&PageAnchor> {
        let mut anchors: Vec<_> = self.anchors.values().collect();
        anchors.sort_by_key(|a| (a.printed_start, a.state.clone()));
        anchors
    }

    /// Number of anchored states
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    /// Whether no state is anchored
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }
}

fn state_key(state: &str) -> String {
    state.trim().to_lowercase()
}
