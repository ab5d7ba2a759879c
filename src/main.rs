//! Quickfort - Entry Point
//!
//! Loads a blueprint file, parses it and prints the header and layers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use quickfort::blueprints::{BlueprintKind, BlueprintParser, Dig, Layer};
use quickfort::core::config::ParserConfig;
use quickfort::core::error::Result;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Parse a layered CSV blueprint and print its layers
#[derive(Parser, Debug)]
#[command(name = "quickfort")]
#[command(about = "Parse layered CSV blueprints into per-layer cell commands")]
struct Args {
    /// Blueprint file to parse
    file: PathBuf,

    /// Require the header keyword of this blueprint kind
    #[arg(long, value_enum)]
    kind: Option<Kind>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Parser config (TOML)
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Exit status when the header keyword does not match `--kind`
const KIND_MISMATCH: u8 = 2;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Kind {
    Dig,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Text,
}

#[derive(Serialize)]
struct Output<'a> {
    header: &'a quickfort::blueprints::Header,
    layers: &'a [Layer],
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quickfort=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(status) => ExitCode::from(status),
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<u8> {
    let config = match &args.config {
        Some(path) => ParserConfig::load(path)?,
        None => ParserConfig::default(),
    };

    let parser = BlueprintParser::from_file(&args.file, config)?;
    tracing::info!(
        file = %args.file.display(),
        layers = parser.layers().len(),
        "loaded blueprint"
    );

    if let Some(Kind::Dig) = args.kind {
        let dig = Dig::from(parser.clone());
        if !dig.check_header() {
            tracing::error!(
                found = parser.header().command.as_deref().unwrap_or("<none>"),
                expected = Dig::KEYWORD,
                "blueprint header does not match kind"
            );
            return Ok(KIND_MISMATCH);
        }
    }

    match args.format {
        Format::Json => {
            let output = Output {
                header: parser.header(),
                layers: parser.layers(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Format::Text => print!("{}", render_text(parser.layers())),
    }

    Ok(0)
}

/// One line per row with blank gaps, layers separated by `#>` lines
fn render_text(layers: &[Layer]) -> String {
    let mut out = String::new();

    for (idx, layer) in layers.iter().enumerate() {
        if idx > 0 {
            out.push_str("#>\n");
        }
        for row in layer {
            let width = row.keys().next_back().map_or(0, |last| last + 1);
            let cells: Vec<&str> = (0..width)
                .map(|column| row.get(&column).map_or("", String::as_str))
                .collect();
            out.push_str(&cells.join(","));
            out.push('\n');
        }
    }

    out
}
