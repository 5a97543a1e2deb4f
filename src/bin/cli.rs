//! sectionstore CLI
//!
//! Command-line interface for inspecting and editing a section container.
//!
//! Exit codes: 0 on success, 1 on error, 2 when `exists` finds no file.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use sectionstore::{SaveMode, SaveOutcome, SectionContainer, SectionStore, StoreConfig, StoreError};
use tracing_subscriber::{fmt, EnvFilter};

/// Exit code for an `exists` check that found nothing
const EXIT_ABSENT: i32 = 2;

/// sectionstore CLI
#[derive(Parser, Debug)]
#[command(name = "sectionstore-cli")]
#[command(about = "Inspect and edit named-section container files")]
#[command(version)]
struct Args {
    /// Container file
    #[arg(short, long)]
    file: PathBuf,

    /// Refuse to append a duplicate header when a name exists with another size
    #[arg(long)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List every section header
    List,

    /// Print a section payload
    Get {
        /// Section name
        name: String,

        /// Write the raw payload to this file instead of a hex dump
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Store a section payload
    Put {
        /// Section name
        name: String,

        /// Payload as hex digits
        #[arg(long, conflicts_with = "input", required_unless_present = "input")]
        hex: Option<String>,

        /// Read the payload from this file
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Check whether the container file exists (exit code 2 if not)
    Exists,

    /// Report truncated payloads and trailing garbage
    Verify,

    /// Remove the container file
    Delete,
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,sectionstore=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let stdout = io::stdout();
    match run(args, &mut stdout.lock()) {
        Ok(0) => {}
        Ok(code) => process::exit(code),
        Err(e) => {
            tracing::error!("{}", e);
            process::exit(1);
        }
    }
}

/// Execute one command, writing its report to `out`; returns the exit code
fn run<W: Write>(args: Args, out: &mut W) -> sectionstore::Result<i32> {
    let save_mode = if args.strict {
        SaveMode::Strict
    } else {
        SaveMode::Compatible
    };

    // Read-only commands must not create the file as a side effect
    let create = matches!(args.command, Commands::Put { .. });

    let config = StoreConfig::builder()
        .path(&args.file)
        .save_mode(save_mode)
        .create_if_missing(create)
        .build()?;
    let mut store = SectionStore::new(config);

    match args.command {
        Commands::List => {
            for section in store.sections()? {
                let crc = section
                    .crc32
                    .map(|c| format!("{:08x}", c))
                    .unwrap_or_else(|| "-".to_string());
                let mut flags = String::new();
                if section.shadowed {
                    flags.push_str(" shadowed");
                }
                if !section.is_complete() {
                    flags.push_str(" truncated");
                }
                writeln!(
                    out,
                    "{:>8}  {:<24} {:>5} bytes  crc={}{}",
                    section.offset, section.name, section.declared_len, crc, flags
                )?;
            }
        }
        Commands::Get { name, output } => {
            let payload = store
                .load(&name)?
                .ok_or_else(|| StoreError::SectionNotFound(name.clone()))?;
            match output {
                Some(path) => fs::write(path, &payload)?,
                None => writeln!(out, "{}", hex_dump(&payload))?,
            }
        }
        Commands::Put { name, hex, input } => {
            let payload = match (hex, input) {
                (Some(hex), _) => parse_hex(&hex)?,
                (None, Some(path)) => fs::read(path)?,
                (None, None) => Vec::new(),
            };
            let outcome = store.save(&name, &payload)?;
            store.hard_flush()?;
            let verb = match outcome {
                SaveOutcome::Appended => "appended",
                SaveOutcome::Existing => "overwrote",
            };
            writeln!(out, "{} {:?} ({} bytes)", verb, name, payload.len())?;
        }
        Commands::Exists => {
            let exists = store.exists();
            writeln!(out, "{}", exists)?;
            if !exists {
                return Ok(EXIT_ABSENT);
            }
        }
        Commands::Verify => {
            let report = store.verify()?;
            for section in report.truncated() {
                writeln!(
                    out,
                    "truncated: {:?} at {} ({} of {} bytes)",
                    section.name, section.offset, section.available_len, section.declared_len
                )?;
            }
            for section in report.shadowed() {
                writeln!(out, "shadowed: {:?} at {}", section.name, section.offset)?;
            }
            if report.trailing_bytes > 0 {
                writeln!(out, "trailing: {} bytes", report.trailing_bytes)?;
            }
            writeln!(
                out,
                "{} sections, {} bytes, {}",
                report.sections.len(),
                report.file_len,
                if report.is_clean() { "clean" } else { "DAMAGED" }
            )?;
            if !report.is_clean() {
                return Err(StoreError::Inconsistent(format!(
                    "{} failed verification",
                    args.file.display()
                )));
            }
        }
        Commands::Delete => {
            store.delete_container()?;
            writeln!(out, "deleted {}", args.file.display())?;
        }
    }

    Ok(0)
}

/// Offset-prefixed hex dump, 16 bytes per row
fn hex_dump(bytes: &[u8]) -> String {
    bytes
        .chunks(16)
        .enumerate()
        .map(|(row, chunk)| {
            let hex: Vec<String> = chunk.iter().map(|b| hex::encode([*b])).collect();
            format!("{:08x}  {}", row * 16, hex.join(" "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn parse_hex(text: &str) -> sectionstore::Result<Vec<u8>> {
    let digits: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(&digits).map_err(|e| StoreError::Config(format!("invalid hex payload: {}", e)))
}
