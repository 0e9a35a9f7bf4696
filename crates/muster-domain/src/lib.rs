//! Muster Domain Layer
//!
//! This crate holds the data model shared by the roster parser and its
//! collaborators. It has no external dependencies and defines the value
//! types and trait seams that the other crates build on.
//!
//! ## Key Concepts
//!
//! - **Page anchor**: where a state's printed page numbering starts in the source file
//! - **Raw block**: extracted text for one page of one state's section
//! - **Record span**: the slice of a raw block believed to hold one person's entry
//! - **Field record**: the fixed seven-column output row
//! - **Linked owner record**: a synthetic row for an enslaver named in another entry
//!
//! ## Architecture
//!
//! ```text
//! RawBlock → segment → RecordSpan → extract → FieldRecord → link → RecordSink
//! ```
//!
//! Parsing logic lives in `muster-parser`; writers implement [`RecordSink`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod page;
pub mod record;
pub mod relation;
pub mod span;
pub mod traits;

// Re-exports for convenience
pub use page::{PageAnchor, RawBlock};
pub use record::{Field, FieldRecord, LinkedOwnerRecord};
pub use relation::RelationType;
pub use span::RecordSpan;
pub use traits::RecordSink;
