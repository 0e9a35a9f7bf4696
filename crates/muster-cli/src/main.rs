//! Muster CLI - Extract structured records from OCR'd roster pages.

use clap::Parser;
use muster_cli::commands;
use muster_cli::{Cli, Command, Config, Formatter};
use muster_parser::RosterParser;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> muster_cli::Result<()> {
    let cli = Cli::parse();

    // Log to stderr so record output on stdout stays clean
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let parser = RosterParser::new(config.parser.clone())?;

    match cli.command {
        Command::Parse(args) => commands::execute_parse(args, &parser, &config.settings, &formatter)?,
        Command::Resolve(args) => commands::execute_resolve(args, &parser, &formatter)?,
        Command::Anchors => commands::execute_anchors(&parser, &formatter)?,
    }

    Ok(())
}
