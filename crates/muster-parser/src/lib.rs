//! Muster Parser
//!
//! Turns OCR text of printed roster pages into fixed-schema records.
//!
//! # Overview
//!
//! Roster volumes list one person per entry: an all-caps surname header
//! followed by descriptors, source codes, narrative and a residence, all
//! wrapped across lines and interrupted by running page headers. This
//! crate finds where each entry starts, reads the structured fields out of
//! it, and for states whose entries name enslavers, emits a linked record
//! for each owner.
//!
//! # Architecture
//!
//! ```text
//! printed page → AnchorTable → source page
//! RawBlock → Segmenter → RecordSpan → FieldExtractor → FieldRecord
//!                                                    → OwnershipLinker → FieldRecord + LinkedOwnerRecord
//! ```
//!
//! # Key Features
//!
//! - **Page offset resolution**: printed page numbers map to source pages through per-state anchors
//! - **Record segmentation**: surname headers and unnamed-person markers start entries; running headers are skipped
//! - **Ordered field rules**: name, alias, role and locality rules each consume part of the entry
//! - **Ownership linking**: attribution phrases yield an `enslaved_by`/`enslaver_of` record pair
//! - **Parallel blocks**: independent pages are parsed on rayon with order preserved
//!
//! # Example Usage
//!
//! ```
//! use muster_domain::RawBlock;
//! use muster_parser::{ParserConfig, RosterParser};
//!
//! # fn example() -> Result<(), muster_parser::ParserError> {
//! let parser = RosterParser::new(ParserConfig::default())?;
//!
//! let source_page = parser.resolve("Pennsylvania", 414)?;
//! assert_eq!(source_page, 245);
//!
//! let block = RawBlock::new(
//!     "Pennsylvania",
//!     "AARON, JOHN, Philadelphia\nABBOT, EZRA, served 3 years, Chester\n",
//!     source_page,
//! );
//! let output = parser.parse_block(&block);
//!
//! assert_eq!(output.records.len(), 2);
//! assert_eq!(output.records[0].name, "AARON, JOHN");
//! assert_eq!(output.report.parsed, 2);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]

mod config;
mod engine;
mod error;
mod extractor;
mod linker;
mod offsets;
mod segmenter;
mod types;

pub mod normalize;
pub mod patterns;
pub mod rules;


pub use config::{AnchorConfig, ParserConfig};
pub use engine::RosterParser;
pub use error::ParserError;
pub use extractor::FieldExtractor;
pub use linker::{AttributionPattern, OwnershipLinker};
pub use offsets::AnchorTable;
pub use rules::{Assignment, FieldRule, RuleMatch};
pub use segmenter::Segmenter;
pub use types::{BlockOutput, BlockReport, StateProfile};
