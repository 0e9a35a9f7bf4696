//! Resolve command implementation.

use crate::cli::ResolveArgs;
use crate::error::Result;
use crate::output::Formatter;
use muster_parser::RosterParser;

/// Execute the resolve command.
pub fn execute_resolve(args: ResolveArgs, parser: &RosterParser, formatter: &Formatter) -> Result<()> {
    println!("{}", resolve_page(&args, parser, formatter)?);
    Ok(())
}

fn resolve_page(args: &ResolveArgs, parser: &RosterParser, formatter: &Formatter) -> Result<String> {
    let source_page = parser.resolve(&args.state, args.page)?;
    formatter.format_resolution(&args.state, args.page, source_page)
}
