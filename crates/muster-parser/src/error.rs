//! Error types for the roster parser

use thiserror::Error;

/// Errors that can occur while resolving pages or loading configuration
///
/// Segmentation, extraction and linking never fail: an entry they cannot
/// read comes back as an unparsed record instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParserError {
    /// Printed page precedes the state's anchor (or is zero)
    #[error("Invalid page: printed page {printed_page} is before the first known page {printed_start} for '{state}'")]
    InvalidPage {
        /// State the lookup was for
        state: String,
        /// Requested printed page
        printed_page: u32,
        /// First printed page the state's anchor covers
        printed_start: u32,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML parsing or serialization error
    #[error("TOML error: {0}")]
    Toml(String),
}

impl From<toml::de::Error> for ParserError {
    fn from(e: toml::de::Error) -> Self {
        ParserError::Toml(e.to_string())
    }
}

impl From<toml::ser::Error> for ParserError {
    fn from(e: toml::ser::Error) -> Self {
        ParserError::Toml(e.to_string())
    }
}
