//! Anchors command implementation.

use crate::error::Result;
use crate::output::Formatter;
use muster_parser::RosterParser;

/// Execute the anchors command.
pub fn execute_anchors(parser: &RosterParser, formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.format_anchors(&parser.anchors().anchors())?);
    Ok(())
}
