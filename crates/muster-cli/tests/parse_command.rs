//! Integration tests for the parse command
//!
//! These tests drive the command through its public entry point and check
//! the record files it leaves behind.

use muster_cli::cli::ParseArgs;
use muster_cli::commands::execute_parse;
use muster_cli::config::{OutputFormat, Settings};
use muster_cli::{Delimiter, Formatter};
use muster_parser::{ParserConfig, RosterParser};
use std::fs;
use tempfile::TempDir;

fn parse_args(input: &std::path::Path, output: &std::path::Path, state: &str) -> ParseArgs {
    ParseArgs {
        input: input.to_path_buf(),
        state: state.to_string(),
        page: None,
        printed: false,
        output: output.to_path_buf(),
        csv: false,
        psv: false,
        header: false,
        no_log: true,
    }
}

#[test]
fn test_virginia_page_writes_linked_rows() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("509.txt");
    fs::write(
        &input,
        "Virginia 509\nCAESAR, African American, slave of John Smith, Norfolk\nAARON, JOHN, VAPC:1:338, Richmond\n",
    )
    .unwrap();
    let out = dir.path().join("out");

    let parser = RosterParser::new(ParserConfig::default()).unwrap();
    let formatter = Formatter::new(OutputFormat::Quiet, false);
    execute_parse(
        parse_args(&input, &out, "Virginia"),
        &parser,
        &Settings::default(),
        &formatter,
    )
    .unwrap();

    let written = fs::read_to_string(out.join("509.csv")).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(
        lines,
        vec![
            "CAESAR|African American|Norfolk|slave of John Smith|509|John Smith|enslaved_by",
            "John Smith|||Enslaver of CAESAR|509||enslaver_of",
            "AARON, JOHN||Richmond|VAPC:1:338|509||",
        ]
    );
}

#[test]
fn test_settings_supply_delimiter_and_header() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("25.txt");
    fs::write(&input, "AARON, JOHN, Portland\n").unwrap();
    let out = dir.path().join("out");

    let settings = Settings {
        delimiter: Delimiter::Comma,
        header: true,
        ..Settings::default()
    };
    let parser = RosterParser::new(ParserConfig::default()).unwrap();
    let formatter = Formatter::new(OutputFormat::Quiet, false);
    execute_parse(parse_args(&input, &out, "Maine"), &parser, &settings, &formatter).unwrap();

    let written = fs::read_to_string(out.join("25.csv")).unwrap();
    assert_eq!(
        written,
        "name,rank_or_role,locality,remarks,source_page,owner_name,relation_type\n\"AARON, JOHN\",,Portland,,25,,\n"
    );
}

#[test]
fn test_psv_flag_overrides_settings() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("25.txt");
    fs::write(&input, "AARON, JOHN, Portland\n").unwrap();
    let out = dir.path().join("out");

    let settings = Settings {
        delimiter: Delimiter::Comma,
        ..Settings::default()
    };
    let mut args = parse_args(&input, &out, "Maine");
    args.psv = true;

    let parser = RosterParser::new(ParserConfig::default()).unwrap();
    let formatter = Formatter::new(OutputFormat::Quiet, false);
    execute_parse(args, &parser, &settings, &formatter).unwrap();

    let written = fs::read_to_string(out.join("25.csv")).unwrap();
    assert_eq!(written, "AARON, JOHN||Portland||25||\n");
}
