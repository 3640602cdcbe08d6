//! errxml - LabVIEW error-code XML generator
//!
//! Scans the LabVIEW wrapper's C source for error-code `case` labels and
//! emits a C program that prints the matching `<nierror>` XML document.

#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use errxml_common::config::DEFAULT_INPUT;
use errxml_common::{
    ConfigOverrides, Extractor, GeneratorConfig, LogConfig, ResolvedConfig, ResolvedEntry,
    init_logging, read_lines, resolve_entries, write_program,
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "errxml")]
#[command(
    author,
    version,
    about = "Emit a C program that prints LabVIEW error-code XML"
)]
struct Cli {
    /// C source to scan for error-code case labels
    #[arg(default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Write output to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "program")]
    format: OutputFormat,

    /// Marker text preceding the offset (e.g. "NN_HAUSNUMERO+")
    #[arg(long)]
    marker: Option<String>,

    /// Base added to each offset to form the published code
    #[arg(long)]
    code_base: Option<u64>,

    /// C function that maps an error constant to its description
    #[arg(long)]
    lookup_fn: Option<String>,

    /// Header included by the generated program
    #[arg(long)]
    include: Option<String>,

    /// Text of the <nicomment> element
    #[arg(long)]
    comment: Option<String>,

    /// Allow whitespace around '+' in the marker (ERROR_BASE + 14)
    #[arg(long)]
    loose_spacing: bool,

    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the effective configuration and exit
    #[arg(long)]
    show_config: bool,

    /// Enable verbose output
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// C source of the generator program
    Program,
    /// Extracted entries with their codes
    Json,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            marker: self.marker.clone(),
            code_base: self.code_base,
            lookup_fn: self.lookup_fn.clone(),
            include: self.include.clone(),
            comment: self.comment.clone(),
            loose_spacing: self.loose_spacing.then_some(true),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let mut log_config = LogConfig::from_env("info");
    if cli.verbose {
        log_config = log_config.with_level("debug");
    } else if cli.quiet {
        log_config = log_config.with_level("error");
    }
    let _logging_guards = init_logging(&log_config)?;

    let resolved = ResolvedConfig::load(cli.config.as_deref())
        .context("Failed to resolve configuration")?
        .with_overrides(cli.overrides());

    if cli.show_config {
        return show_config(&resolved, cli.format);
    }

    run(&cli, &resolved.config())
}

fn run(cli: &Cli, config: &GeneratorConfig) -> Result<()> {
    let extractor = Extractor::new(&config.extract_config())?;
    let lines = read_lines(&cli.input)?;
    info!("Scanning {} ({} lines)", cli.input.display(), lines.len());

    let mut writer = open_output(cli.output.as_deref())?;
    match cli.format {
        OutputFormat::Program => {
            write_program(&mut writer, &extractor, &config.template(), &lines)
                .context("Failed to write generated program")?;
        }
        OutputFormat::Json => {
            let entries: Vec<ResolvedEntry> =
                resolve_entries(&extractor, config.code_base, &lines).collect();
            debug!("Extracted {} entries", entries.len());
            serde_json::to_writer_pretty(&mut writer, &entries)?;
            writeln!(writer)?;
            writer.flush().context("Failed to write entries")?;
        }
    }

    if let Some(path) = &cli.output {
        info!("Wrote {}", path.display());
    }
    Ok(())
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

fn show_config(resolved: &ResolvedConfig, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(resolved)?);
        }
        OutputFormat::Program => {
            for (key, value, source) in resolved.report() {
                println!("{key:<14} = {value:<32} # {source}");
            }
        }
    }
    Ok(())
}
