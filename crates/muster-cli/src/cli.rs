//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Muster - Extract structured records from OCR'd roster pages.
#[derive(Debug, Parser)]
#[command(name = "muster")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "MUSTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (paths and numbers only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse a page text file, or a directory of them, into record files
    Parse(ParseArgs),

    /// Map a printed page number to its source page
    Resolve(ResolveArgs),

    /// List the configured page anchors
    Anchors,
}

/// Arguments for the parse command.
#[derive(Debug, Parser)]
pub struct ParseArgs {
    /// Text file, or directory of .txt files (one page per file)
    pub input: PathBuf,

    /// State section the pages belong to
    #[arg(short, long)]
    pub state: String,

    /// Page number for inputs whose file name is not a number
    #[arg(short, long)]
    pub page: Option<u32>,

    /// Page numbers are printed pages; resolve them to source pages
    #[arg(long)]
    pub printed: bool,

    /// Directory for record files and the parse log
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Comma-delimited output
    #[arg(long, conflicts_with = "psv")]
    pub csv: bool,

    /// Pipe-delimited output
    #[arg(long)]
    pub psv: bool,

    /// Write a column header row
    #[arg(long)]
    pub header: bool,

    /// Skip writing the parse log
    #[arg(long)]
    pub no_log: bool,
}

/// Arguments for the resolve command.
#[derive(Debug, Parser)]
pub struct ResolveArgs {
    /// State section
    pub state: String,

    /// Printed page number
    pub page: u32,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        let cli = Cli::parse_from([
            "muster",
            "parse",
            "pages/",
            "--state",
            "Virginia",
            "--printed",
            "--csv",
            "-o",
            "out",
        ]);
        match cli.command {
            Command::Parse(args) => {
                assert_eq!(args.state, "Virginia");
                assert!(args.printed);
                assert!(args.csv);
                assert!(!args.psv);
                assert_eq!(args.output, PathBuf::from("out"));
                assert!(args.page.is_none());
            }
            _ => panic!("Expected Parse command"),
        }
    }

    #[test]
    fn test_csv_and_psv_conflict() {
        let result = Cli::try_parse_from([
            "muster", "parse", "p.txt", "-s", "Maine", "--csv", "--psv",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_command_with_global_flags() {
        let cli = Cli::parse_from(["muster", "resolve", "Pennsylvania", "414", "-f", "json", "-v"]);
        assert!(cli.verbose);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        match cli.command {
            Command::Resolve(args) => {
                assert_eq!(args.state, "Pennsylvania");
                assert_eq!(args.page, 414);
            }
            _ => panic!("Expected Resolve command"),
        }
    }

    #[test]
    fn test_format_conversion() {
        let format: crate::config::OutputFormat = CliFormat::Quiet.into();
        assert_eq!(format, crate::config::OutputFormat::Quiet);
    }
}
