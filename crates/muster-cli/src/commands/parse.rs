//! Parse command implementation.

use crate::cli::ParseArgs;
use crate::config::Settings;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::writer::{DelimitedWriter, Delimiter};
use muster_domain::{FieldRecord, RawBlock, RecordSink};
use muster_parser::{BlockReport, RosterParser};
use serde::Serialize;
use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{info, warn};

/// Outcome for one input file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// Page text file that was read
    pub input: PathBuf,

    /// Record file that was written
    pub output: PathBuf,

    /// Printed page, when pages were given as printed numbers
    pub printed_page: Option<u32>,

    /// Rows written, linked owner rows included
    pub records: usize,

    /// Parser counts for the page
    #[serde(flatten)]
    pub report: BlockReport,
}

/// An input that was not parsed.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedInput {
    /// Page text file
    pub input: PathBuf,

    /// Why it was skipped
    pub reason: String,
}

struct LoadedPage {
    input: PathBuf,
    printed_page: Option<u32>,
    block: RawBlock,
}

/// Execute the parse command.
///
/// A single file that cannot be read or resolved fails the command; in a
/// directory run such files are skipped and reported so the other pages
/// still get written.
pub fn execute_parse(
    args: ParseArgs,
    parser: &RosterParser,
    settings: &Settings,
    formatter: &Formatter,
) -> Result<()> {
    let delimiter = if args.csv {
        Delimiter::Comma
    } else if args.psv {
        Delimiter::Pipe
    } else {
        settings.delimiter
    };
    let header = args.header || settings.header;

    let batch = args.input.is_dir();
    let inputs = collect_inputs(&args.input)?;
    fs::create_dir_all(&args.output)?;

    let mut loaded = Vec::with_capacity(inputs.len());
    let mut skipped = Vec::new();
    for input in inputs {
        match load_page(&input, &args, parser) {
            Ok(page) => loaded.push(page),
            Err(e) if batch => {
                warn!(input = %input.display(), error = %e, "Skipping input");
                skipped.push(SkippedInput {
                    input,
                    reason: e.to_string(),
                });
            }
            Err(e) => return Err(e),
        }
    }

    let (pages, blocks): (Vec<_>, Vec<_>) = loaded
        .into_iter()
        .map(|p| ((p.input, p.printed_page), p.block))
        .unzip();
    let outputs = parser.parse_blocks(&blocks);

    let mut reports = Vec::with_capacity(outputs.len());
    for ((input, printed_page), output) in pages.into_iter().zip(outputs) {
        let out_path = args.output.join(format!("{}.csv", file_stem(&input)));
        let records = write_records(&out_path, &output.records, delimiter, header)?;
        reports.push(FileReport {
            input,
            output: out_path,
            printed_page,
            records,
            report: output.report,
        });
    }

    if !args.no_log {
        let log_path = write_parse_log(&args.output, &reports, &skipped)?;
        info!(path = %log_path.display(), "Wrote parse log");
    }

    println!("{}", formatter.format_reports(&reports, &skipped)?);
    Ok(())
}

/// The file itself, or the `.txt` files of a directory sorted by name.
fn collect_inputs(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !input.is_dir() {
        return Err(CliError::InvalidInput(format!(
            "input '{}' does not exist",
            input.display()
        )));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(input)? {
        let path = entry?.path();
        let is_txt = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));
        if is_txt && path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    if files.is_empty() {
        return Err(CliError::InvalidInput(format!(
            "no .txt files in '{}'",
            input.display()
        )));
    }
    Ok(files)
}

/// Page number taken from a numeric file name (`509.txt` → 509).
fn page_from_name(path: &Path) -> Option<u32> {
    path.file_stem()?.to_str()?.trim().parse().ok()
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "records".to_string())
}

fn load_page(input: &Path, args: &ParseArgs, parser: &RosterParser) -> Result<LoadedPage> {
    let page = page_from_name(input).or(args.page).ok_or_else(|| {
        CliError::InvalidInput(format!(
            "cannot tell the page of '{}'; name the file after its page or pass --page",
            input.display()
        ))
    })?;

    let text = fs::read_to_string(input)?;

    let (source_page, printed_page) = if args.printed {
        (parser.resolve(&args.state, page)?, Some(page))
    } else {
        (page, None)
    };

    let mut block = RawBlock::new(args.state.as_str(), text, source_page);
    if let Some(printed) = printed_page {
        block = block.with_printed_pages(printed..=printed);
    }

    Ok(LoadedPage {
        input: input.to_path_buf(),
        printed_page,
        block,
    })
}

fn write_records(
    path: &Path,
    records: &[FieldRecord],
    delimiter: Delimiter,
    header: bool,
) -> Result<usize> {
    let mut writer = DelimitedWriter::new(BufWriter::new(File::create(path)?), delimiter);
    if header {
        writer.write_header()?;
    }
    writer.write_all(records)?;
    writer.finish()?;
    Ok(writer.rows_written())
}

/// Human-readable summary of a run.
pub fn render_parse_log(reports: &[FileReport], skipped: &[SkippedInput]) -> String {
    let mut log = String::new();
    let _ = writeln!(log, "muster parse log");
    let _ = writeln!(log);

    for entry in reports {
        let report = &entry.report;
        let page = match entry.printed_page {
            Some(printed) => format!("printed page {} -> source page {}", printed, report.source_page),
            None => format!("source page {}", report.source_page),
        };
        let _ = writeln!(
            log,
            "{} -> {}: {} records ({} parsed, {} unparsed, {} linked), {} {}",
            entry.input.display(),
            entry.output.display(),
            entry.records,
            report.parsed,
            report.unparsed,
            report.linked,
            report.state,
            page,
        );
        if report.is_suspect_offset() {
            let _ = writeln!(log, "  WARNING: nothing parsed; check the page offset");
        }
        for header in &report.unparsed_headers {
            let _ = writeln!(log, "  unparsed: {}", header);
        }
    }

    for skip in skipped {
        let _ = writeln!(log, "{}: skipped ({})", skip.input.display(), skip.reason);
    }

    let total: usize = reports.iter().map(|r| r.records).sum();
    let _ = writeln!(log);
    let _ = writeln!(
        log,
        "{} file(s), {} record(s), {} skipped",
        reports.len(),
        total,
        skipped.len()
    );
    log
}

fn write_parse_log(dir: &Path, reports: &[FileReport], skipped: &[SkippedInput]) -> Result<PathBuf> {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    let path = dir.join(format!("parse_log_{}.txt", timestamp));
    fs::write(&path, render_parse_log(reports, skipped))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use muster_parser::ParserConfig;
    use tempfile::TempDir;

    fn args(input: &Path, output: &Path, state: &str) -> ParseArgs {
        ParseArgs {
            input: input.to_path_buf(),
            state: state.to_string(),
            page: None,
            printed: false,
            output: output.to_path_buf(),
            csv: false,
            psv: false,
            header: false,
            no_log: false,
        }
    }

    fn parser() -> RosterParser {
        RosterParser::new(ParserConfig::default()).unwrap()
    }

    fn quiet() -> Formatter {
        Formatter::new(OutputFormat::Quiet, false)
    }

    #[test]
    fn test_single_file_with_page_flag() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("maine.txt");
        fs::write(&input, "AARON, JOHN, Portland\nABBOT, EZRA, Saco\n").unwrap();
        let out = dir.path().join("out");

        let mut args = args(&input, &out, "Maine");
        args.page = Some(25);
        args.no_log = true;
        execute_parse(args, &parser(), &Settings::default(), &quiet()).unwrap();

        let written = fs::read_to_string(out.join("maine.csv")).unwrap();
        assert_eq!(
            written,
            "AARON, JOHN||Portland||25||\nABBOT, EZRA||Saco||25||\n"
        );
    }

    #[test]
    fn test_single_file_without_page_fails() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("notes.txt");
        fs::write(&input, "AARON, JOHN").unwrap();

        let result = execute_parse(
            args(&input, dir.path(), "Maine"),
            &parser(),
            &Settings::default(),
            &quiet(),
        );
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn test_printed_page_before_anchor_fails() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("400.txt");
        fs::write(&input, "AARON, JOHN").unwrap();

        let mut args = args(&input, dir.path(), "Pennsylvania");
        args.printed = true;
        let result = execute_parse(args, &parser(), &Settings::default(), &quiet());
        assert!(matches!(result, Err(CliError::Parser(_))));
    }

    #[test]
    fn test_directory_run() {
        let dir = TempDir::new().unwrap();
        let pages = dir.path().join("pages");
        fs::create_dir(&pages).unwrap();
        fs::write(pages.join("414.txt"), "Pennsylvania 414\nAARON, JOHN, Philadelphia\n").unwrap();
        fs::write(pages.join("415.txt"), "ABBOT, EZRA, Chester\n").unwrap();
        fs::write(pages.join("readme.txt"), "notes").unwrap();
        fs::write(pages.join("416.pdf"), "binary").unwrap();
        let out = dir.path().join("out");

        let mut args = args(&pages, &out, "Pennsylvania");
        args.printed = true;
        args.csv = true;
        args.header = true;
        execute_parse(args, &parser(), &Settings::default(), &quiet()).unwrap();

        let first = fs::read_to_string(out.join("414.csv")).unwrap();
        let mut lines = first.lines();
        assert_eq!(
            lines.next().unwrap(),
            "name,rank_or_role,locality,remarks,source_page,owner_name,relation_type"
        );
        assert_eq!(lines.next().unwrap(), "\"AARON, JOHN\",,Philadelphia,,245,,");

        let second = fs::read_to_string(out.join("415.csv")).unwrap();
        assert!(second.contains(",246,"));
        assert!(!out.join("readme.csv").exists());

        let logs: Vec<_> = fs::read_dir(&out)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with("parse_log_"))
            .collect();
        assert_eq!(logs.len(), 1);
        let log = fs::read_to_string(logs[0].path()).unwrap();
        assert!(log.contains("printed page 414 -> source page 245"));
        assert!(log.contains("readme.txt: skipped"));
    }

    #[test]
    fn test_empty_directory() {
        let dir = TempDir::new().unwrap();
        let result = collect_inputs(dir.path());
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn test_page_from_name() {
        assert_eq!(page_from_name(Path::new("pages/509.txt")), Some(509));
        assert_eq!(page_from_name(Path::new("page-509.txt")), None);
    }

    #[test]
    fn test_parse_log_lists_unparsed_entries() {
        let mut report = BlockReport::new("Maine", 25, muster_parser::StateProfile::General);
        report.spans = 1;
        report.unparsed = 1;
        report.unparsed_headers.push("INDEX OF NAMES".to_string());
        let reports = [FileReport {
            input: PathBuf::from("25.txt"),
            output: PathBuf::from("25.csv"),
            printed_page: None,
            records: 1,
            report,
        }];

        let log = render_parse_log(&reports, &[]);
        assert!(log.contains("1 records (0 parsed, 1 unparsed, 0 linked), Maine source page 25"));
        assert!(log.contains("WARNING: nothing parsed"));
        assert!(log.contains("  unparsed: INDEX OF NAMES"));
        assert!(log.contains("1 file(s), 1 record(s), 0 skipped"));
    }
}
