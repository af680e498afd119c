use anyhow::{Context, Result};
use clap::Parser;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use jsog::Jsog;

/// jsog - query JSON documents with path expressions
#[derive(Parser)]
#[command(name = "jsog")]
#[command(version)]
#[command(about = "Query JSON documents with path expressions", long_about = None)]
struct Cli {
    /// JSON file to read (stdin if omitted; .gz files are decompressed)
    file: Option<String>,

    /// Path expression to evaluate against the document root
    #[arg(short, long, default_value = "$")]
    path: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let input = match &cli.file {
        Some(file) => load_input(file)?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    let root = Jsog::parse(&input).context("Failed to parse input")?;
    let result = root
        .path(&cli.path)
        .with_context(|| format!("Failed to evaluate `{}`", cli.path))?;

    println!("{result}");

    Ok(())
}

/// Reads a file into a string, transparently decompressing `.gz` input.
fn load_input<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();

    let is_gzipped = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let mut content = String::new();
    let mut file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    if is_gzipped {
        GzDecoder::new(file)
            .read_to_string(&mut content)
            .with_context(|| format!("Failed to decompress {}", path.display()))?;
    } else {
        file.read_to_string(&mut content)
            .with_context(|| format!("Failed to read {}", path.display()))?;
    }

    Ok(content)
}
