//! Command-line interface for the converter.

use std::path::PathBuf;

use clap::Parser;
use console::style;

use crate::config::{ConvertOptions, DEFAULT_MAX_DEPTH};
use crate::converter::convert_file;
use crate::error::Result;
use crate::output::write_json;

/// Convert repeating XML records into JSON using a YAML field mapping.
#[derive(Parser)]
#[command(name = "xml2json")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// YAML mapping specification
    pub mapping: PathBuf,

    /// XML document to convert
    pub input: PathBuf,

    /// Write JSON to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Maximum element nesting depth inside a record
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Emit compact JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    convert_command(&cli)
}

/// Execute a conversion.
fn convert_command(cli: &Cli) -> Result<()> {
    let options = ConvertOptions::default().with_max_depth(cli.max_depth);
    let output = convert_file(&cli.mapping, &cli.input, options)?;

    write_json(&output, cli.output.as_deref(), !cli.compact)?;

    // Stdout may carry the JSON itself, so the summary only goes out when
    // writing to a file.
    if let Some(path) = &cli.output {
        let records = output
            .as_object()
            .and_then(|wrapper| wrapper.values().next())
            .and_then(|records| records.as_array())
            .map_or(0, Vec::len);
        eprintln!(
            "{} {} records to {}",
            style("Converted").green().bold(),
            style(records).cyan(),
            path.display()
        );
    }

    Ok(())
}
