//! Command implementations.

pub mod anchors;
pub mod parse;
pub mod resolve;

pub use self::anchors::execute_anchors;
pub use self::parse::execute_parse;
pub use self::resolve::execute_resolve;
