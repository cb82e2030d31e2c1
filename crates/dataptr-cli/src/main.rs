//! `dataptr` CLI: typed path lookups in JSON and YAML documents.
//!
//! ## Usage
//!
//! ```sh
//! # Print the sub-tree at /y/map as pretty JSON (stdin → stdout)
//! echo '{"y":{"map":{"a":1}}}' | dataptr get y map
//!
//! # Read a YAML file and extract a typed value
//! dataptr get -i config.yaml --as duration server timeout
//!
//! # Fall back to a default when the path is absent
//! dataptr get -i config.yaml --as int --default 8080 server port
//!
//! # List the keys of a mapping
//! dataptr keys -i config.yaml server
//! ```
//!
//! Set `RUST_LOG=debug` (or pass `-v`) to see how paths are resolved.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use dataptr::{DataPtr, Format};
use std::io::{self, Read};
use std::path::Path;

#[derive(Parser)]
#[command(
    name = "dataptr",
    version,
    about = "Typed path lookups in JSON and YAML documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log path resolution details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the value at a path
    Get {
        #[command(flatten)]
        source: Source,
        /// Extract the value as this type instead of printing it as JSON
        #[arg(long = "as", value_enum)]
        kind: Option<Kind>,
        /// Value to print when the path does not exist (requires --as)
        #[arg(long, requires = "kind")]
        default: Option<String>,
        /// Path segments, e.g. `server port` or `items 0 name`
        path: Vec<String>,
    },
    /// List the keys of the mapping at a path
    Keys {
        #[command(flatten)]
        source: Source,
        /// Path segments
        path: Vec<String>,
    },
}

#[derive(clap::Args)]
struct Source {
    /// Input file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Input format (guessed from the file extension, JSON otherwise)
    #[arg(short, long)]
    format: Option<Format>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Bool,
    Int,
    String,
    Duration,
    Map,
    Seq,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Get {
            source,
            kind,
            default,
            path,
        } => {
            let dp = load(&source)?;
            let path: Vec<&str> = path.iter().map(String::as_str).collect();
            let out = match kind {
                None => {
                    let (pointer, sub) = dp.resolve(&path).context("Failed to resolve path")?;
                    log::debug!("printing value at {pointer}");
                    serde_json::to_string_pretty(sub.value())?
                }
                Some(kind) => extract(&dp, kind, default.as_deref(), &path)?,
            };
            println!("{out}");
        }
        Commands::Keys { source, path } => {
            let dp = load(&source)?;
            let path: Vec<&str> = path.iter().map(String::as_str).collect();
            let map = dp.as_mapping(&path).context("Failed to read mapping")?;
            for key in map.keys() {
                println!("{key}");
            }
        }
    }

    Ok(())
}

/// `RUST_LOG` wins; `--verbose` raises dataptr's own targets to debug.
fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_module("dataptr", log::LevelFilter::Debug);
    }
    builder.init();
}

/// Run the typed accessor for `kind`, or its defaulted variant when a
/// default was given, and render the result as text.
fn extract(dp: &DataPtr, kind: Kind, default: Option<&str>, path: &[&str]) -> Result<String> {
    let rendered = match (kind, default) {
        (Kind::Bool, None) => dp.as_bool(path)?.to_string(),
        (Kind::Bool, Some(d)) => {
            let d: bool = d
                .parse()
                .with_context(|| format!("Invalid bool default: '{d}'"))?;
            dp.as_bool_or(d, path)?.to_string()
        }
        (Kind::Int, None) => dp.as_int(path)?.to_string(),
        (Kind::Int, Some(d)) => {
            let d: i64 = d
                .parse()
                .with_context(|| format!("Invalid int default: '{d}'"))?;
            dp.as_int_or(d, path)?.to_string()
        }
        (Kind::String, None) => dp.as_string(path)?,
        (Kind::String, Some(d)) => dp.as_string_or(d, path)?,
        (Kind::Duration, None) => dp.as_duration(path)?.to_string(),
        (Kind::Duration, Some(d)) => {
            let d = dataptr::parse_duration(d)
                .with_context(|| format!("Invalid duration default: '{d}'"))?;
            dp.as_duration_or(d, path)?.to_string()
        }
        (Kind::Map | Kind::Seq, Some(_)) => {
            anyhow::bail!("--default is only supported for scalar types")
        }
        (Kind::Map, None) => {
            let map = dp.as_mapping(path)?;
            let object: serde_json::Map<String, serde_json::Value> = map
                .into_iter()
                .map(|(k, v)| (k, v.into_value()))
                .collect();
            serde_json::to_string_pretty(&object)?
        }
        (Kind::Seq, None) => {
            let items: Vec<serde_json::Value> = dp
                .as_sequence(path)?
                .into_iter()
                .map(DataPtr::into_value)
                .collect();
            serde_json::to_string_pretty(&items)?
        }
    };
    Ok(rendered)
}

fn load(source: &Source) -> Result<DataPtr> {
    let bytes = read_input(source.input.as_deref())?;
    let format = source
        .format
        .or_else(|| source.input.as_deref().and_then(|p| Format::from_path(Path::new(p))))
        .unwrap_or_default();
    log::debug!("decoding input as {format}");
    DataPtr::parse(&bytes, format).with_context(|| format!("Failed to parse {format} input"))
}

fn read_input(path: Option<&str>) -> Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path).with_context(|| format!("Failed to read file: {}", path)),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
