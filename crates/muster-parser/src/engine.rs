//! Core roster parser: resolve → segment → extract → link

use crate::config::ParserConfig;
use crate::error::ParserError;
use crate::extractor::FieldExtractor;
use crate::linker::OwnershipLinker;
use crate::offsets::AnchorTable;
use crate::segmenter::Segmenter;
use crate::types::{BlockOutput, BlockReport, StateProfile};
use muster_domain::{RawBlock, RecordSpan};
use rayon::prelude::*;
use tracing::{debug, info, warn};

/// Segmenter and extractor configured for one profile
#[derive(Debug)]
struct Pipeline {
    segmenter: Segmenter,
    extractor: FieldExtractor,
}

impl Pipeline {
    fn new(profile: StateProfile, config: &ParserConfig) -> Self {
        let segmenter = Segmenter::new()
            .with_unnamed_markers(profile.unnamed_markers())
            .with_header_stripping(config.strip_running_headers);
        let extractor = if profile.unnamed_markers() {
            FieldExtractor::with_unnamed_markers()
        } else {
            FieldExtractor::general()
        }
        .merge_hyphens(config.merge_hyphens);
        Self {
            segmenter,
            extractor,
        }
    }

    /// Segmenter that knows the running headers and page numbers of `block`
    fn segmenter_for(&self, block: &RawBlock) -> Segmenter {
        let segmenter = self.segmenter.clone().with_state(&block.state);
        match &block.printed_pages {
            Some(pages) => segmenter.with_printed_pages(pages.clone()),
            None => segmenter,
        }
    }
}

/// Turns raw page text into ordered roster records
///
/// Holds only immutable state after construction, so one parser can be
/// shared across threads; [`RosterParser::parse_blocks`] fans blocks out
/// with rayon.
#[derive(Debug)]
pub struct RosterParser {
    config: ParserConfig,
    anchors: AnchorTable,
    general: Pipeline,
    attributed: Pipeline,
    linker: OwnershipLinker,
}

impl RosterParser {
    /// Create a parser, validating the configuration
    pub fn new(config: ParserConfig) -> Result<Self, ParserError> {
        config.validate()?;
        let anchors = config.anchor_table()?;

        info!(
            anchors = anchors.len(),
            linked_states = ?config.linked_states,
            "Roster parser ready"
        );

        Ok(Self {
            general: Pipeline::new(StateProfile::General, &config),
            attributed: Pipeline::new(StateProfile::Attributed, &config),
            linker: OwnershipLinker::standard(),
            anchors,
            config,
        })
    }

    /// Configuration the parser was built from
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Page anchor table
    pub fn anchors(&self) -> &AnchorTable {
        &self.anchors
    }

    /// Map a printed page of `state` to its source page
    pub fn resolve(&self, state: &str, printed_page: u32) -> Result<u32, ParserError> {
        self.anchors.resolve(state, printed_page)
    }

    /// Profile used for `state`
    pub fn profile_for(&self, state: &str) -> StateProfile {
        if self.config.links_state(state) {
            StateProfile::Attributed
        } else {
            StateProfile::General
        }
    }

    fn pipeline(&self, profile: StateProfile) -> &Pipeline {
        match profile {
            StateProfile::General => &self.general,
            StateProfile::Attributed => &self.attributed,
        }
    }

    /// Split a block into entry spans without extracting fields
    pub fn segment(&self, block: &RawBlock) -> Vec<RecordSpan> {
        let profile = self.profile_for(&block.state);
        self.pipeline(profile)
            .segmenter_for(block)
            .segment(&block.text)
    }

    /// Parse one block
    ///
    /// Records come back in span order. For attribution states each linked
    /// owner record is placed directly after the record that named the
    /// owner.
    pub fn parse_block(&self, block: &RawBlock) -> BlockOutput {
        let profile = self.profile_for(&block.state);
        let pipeline = self.pipeline(profile);
        let spans = pipeline.segmenter_for(block).segment(&block.text);

        let mut report = BlockReport::new(block.state.clone(), block.source_page, profile);
        report.spans = spans.len();
        let mut records = Vec::with_capacity(spans.len());

        for span in &spans {
            let record = pipeline.extractor.extract(span, block.source_page);

            if span.unparsed || !record.has_name() {
                report.unparsed += 1;
                report.unparsed_headers.push(span.header_line.clone());
            } else {
                report.parsed += 1;
            }

            if profile.links_owners() {
                let (record, linked) = self.linker.link(record);
                records.push(record);
                if let Some(linked) = linked {
                    debug!(
                        owner = %linked.record.name,
                        enslaved = %linked.enslaved_name,
                        "Linked owner record"
                    );
                    report.linked += 1;
                    records.push(linked.into_record());
                }
            } else {
                records.push(record);
            }
        }

        if report.is_suspect_offset() {
            warn!(
                state = %block.state,
                source_page = block.source_page,
                spans = report.spans,
                "No entries parsed; page offset may be wrong"
            );
        }

        info!(
            state = %block.state,
            source_page = block.source_page,
            spans = report.spans,
            parsed = report.parsed,
            unparsed = report.unparsed,
            linked = report.linked,
            "Parsed page"
        );

        BlockOutput { records, report }
    }

    /// Parse the text of a printed page, resolving its source page first
    pub fn parse_printed_page(
        &self,
        state: &str,
        printed_page: u32,
        text: &str,
    ) -> Result<BlockOutput, ParserError> {
        let source_page = self.resolve(state, printed_page)?;
        let block = RawBlock::new(state, text, source_page)
            .with_printed_pages(printed_page..=printed_page);
        Ok(self.parse_block(&block))
    }

    /// Parse many blocks in parallel
    ///
    /// Output order matches input order regardless of scheduling.
    pub fn parse_blocks(&self, blocks: &[RawBlock]) -> Vec<BlockOutput> {
        let outputs: Vec<BlockOutput> = blocks.par_iter().map(|b| self.parse_block(b)).collect();

        let records: usize = outputs.iter().map(|o| o.records.len()).sum();
        debug!(blocks = blocks.len(), records, "Parsed blocks");
        outputs
    }
}
