//! `bsondump` — a small demo binary exercising the `bson` library end to
//! end from the command line.
//!
//! This is ambient tooling, not a new core module: it carries no codec
//! semantics beyond calling into the library, the same role the teacher's
//! `src/main.rs` plays relative to its `lz4` library crate. `anyhow` is
//! used at this top-level boundary only, never inside library code,
//! mirroring the teacher's own restriction of `anyhow` to its CLI.

use std::fs;
use std::io::{self, Write};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};

use bson::{displaylevel, Bson, Buffer, DecodeMode, DecodeOptions, Document, NoopRegistry, ObjectIdGenerator};

#[derive(Parser)]
#[command(name = "bsondump", about = "Encode, decode, and generate BSON primitives")]
struct Cli {
    /// Raise verbosity (progress messages on stderr).
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Lower verbosity to errors only.
    #[arg(short = 'q', long)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Reads a tiny internal fixture file (NOT JSON — see `encode --help`)
    /// and writes its BSON encoding to stdout.
    ///
    /// Fixture format: one field per line, `key type value`, where `type`
    /// is one of `str`, `i32`, `i64`, `double`, `bool`. Blank lines and
    /// lines starting with `#` are ignored.
    Encode {
        /// Path to the fixture file.
        fixture: String,
    },
    /// Reads a BSON byte stream and prints a debug representation of the
    /// decoded document.
    Decode {
        /// Path to the BSON file.
        file: String,
        /// Decode mode: `default` or `bson` (§4.8).
        #[arg(long, default_value = "default")]
        mode: String,
    },
    /// Emits one ObjectId's 12 bytes as hex.
    Oid,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.quiet {
        bson::cli::set_display_level(1);
    } else if cli.verbose > 0 {
        bson::cli::set_display_level(2 + cli.verbose as u32);
    }

    match cli.command {
        Command::Encode { fixture } => run_encode(&fixture),
        Command::Decode { file, mode } => run_decode(&file, &mode),
        Command::Oid => run_oid(),
    }
}

fn run_encode(fixture_path: &str) -> Result<()> {
    let text = fs::read_to_string(fixture_path)
        .with_context(|| format!("reading fixture {:?}", fixture_path))?;
    let doc = parse_fixture(&text)?;

    let mut buf = Buffer::new();
    buf.put_hash(&doc, true).map_err(|e| anyhow!("{}", e))?;
    let bytes = buf.to_bytes();

    displaylevel!(3, "encoded {} field(s) into {} bytes", doc.len(), bytes.len());
    io::stdout().write_all(&bytes).context("writing encoded bytes to stdout")?;
    Ok(())
}

fn parse_fixture(text: &str) -> Result<Document> {
    let mut doc = Document::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut parts = line.splitn(3, char::is_whitespace);
        let key = parts.next().ok_or_else(|| anyhow!("line {}: missing key", lineno + 1))?;
        let ty = parts.next().ok_or_else(|| anyhow!("line {}: missing type", lineno + 1))?;
        let value = parts
            .next()
            .ok_or_else(|| anyhow!("line {}: missing value", lineno + 1))?
            .trim();
        let field: Bson = match ty {
            "str" => Bson::String(value.to_string()),
            "i32" => Bson::Int32(value.parse().with_context(|| format!("line {}: invalid i32", lineno + 1))?),
            "i64" => Bson::from_i64(value.parse().with_context(|| format!("line {}: invalid i64", lineno + 1))?),
            "double" => Bson::Double(value.parse().with_context(|| format!("line {}: invalid double", lineno + 1))?),
            "bool" => Bson::Boolean(value.parse().with_context(|| format!("line {}: invalid bool", lineno + 1))?),
            other => bail!("line {}: unknown fixture type {:?}", lineno + 1, other),
        };
        doc.insert(key.to_string(), field);
    }
    Ok(doc)
}

fn run_decode(path: &str, mode: &str) -> Result<()> {
    let bytes = fs::read(path).with_context(|| format!("reading {:?}", path))?;
    let decode_mode = DecodeMode::parse(if mode == "default" { None } else { Some(mode) })
        .map_err(|e| anyhow!("{}", e))?;
    let opts = DecodeOptions::new(decode_mode);

    let mut buf = Buffer::from_bytes(&bytes);
    let value = buf.get_document(&NoopRegistry, &opts).map_err(|e| anyhow!("{}", e))?;

    displaylevel!(3, "decoded {} bytes", bytes.len());
    println!("{:#?}", value);
    Ok(())
}

fn run_oid() -> Result<()> {
    let id = ObjectIdGenerator::new().next(None);
    let hex: String = id.iter().map(|b| format!("{:02x}", b)).collect();
    println!("{}", hex);
    Ok(())
}
