//! Command-line interface for the phonid library.
//!
//! Validates configuration files, generates preflight suggestions, and
//! performs one-off encode/decode runs through the full
//! shuffle-then-encode pipeline.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;

use phonid::codec::PhoneticEncoder;
use phonid::preflight::{self, FormatterRegistry, OutputFormat};
use phonid::rcfile;
use phonid::shuffle::FeistelShuffler;

#[derive(Parser)]
#[command(name = "phonid")]
#[command(about = "Bijective phonetic identifiers", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (discovered in the working directory if omitted)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a configuration file, including its preflight checks
    Validate,

    /// Generate preflight check suggestions for a configuration
    Suggest {
        /// Output format
        #[arg(short = 'f', long, default_value = "toml")]
        format: String,
    },

    /// Encode a number as a word
    Encode {
        /// The number to encode
        number: u64,
    },

    /// Decode a word back to its number
    Decode {
        /// The word to decode
        word: String,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("{} {err:#}", "error:".red().bold());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let path = resolve_config_path(cli.config)?;

    match cli.command {
        Commands::Validate => validate(&path),
        Commands::Suggest { format } => suggest(&path, &format),
        Commands::Encode { number } => encode(&path, number),
        Commands::Decode { word } => decode(&path, &word),
    }
}

fn resolve_config_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    let cwd = std::env::current_dir().context("could not determine working directory")?;
    match rcfile::find_rc_file(&cwd)? {
        Some(path) => Ok(path),
        None => bail!(
            "no configuration file found in {} (expected .phonidrc or .phonidrc.toml); \
             pass one with --config",
            cwd.display()
        ),
    }
}

fn validate(path: &Path) -> Result<()> {
    let rc = rcfile::load_strict(path)
        .with_context(|| format!("failed to load {}", path.display()))?;

    let (encoder, shuffler) = rc.config.build().context("configuration is invalid")?;
    encoder
        .validate_preflight(&rc.preflight)
        .context("preflight checks failed")?;

    println!(
        "{} {} ({} preflight {}, {} bits)",
        "ok:".green().bold(),
        path.display(),
        rc.preflight.len(),
        if rc.preflight.len() == 1 { "check" } else { "checks" },
        shuffler.bit_width(),
    );
    Ok(())
}

fn suggest(path: &Path, format: &str) -> Result<()> {
    let rc = rcfile::load_lenient(path)
        .with_context(|| format!("failed to load {}", path.display()))?;

    let (encoder, _) = rc.config.build().context("configuration is invalid")?;
    let suggestions = preflight::generate_suggestions(&encoder)?;

    let format: OutputFormat = format.parse()?;
    let registry = FormatterRegistry::new();
    let mut stdout = std::io::stdout().lock();
    registry.get(format)?.format(&mut stdout, &suggestions)?;
    Ok(())
}

fn load_pipeline(path: &Path) -> Result<(PhoneticEncoder, FeistelShuffler)> {
    let rc = rcfile::load_strict(path)
        .with_context(|| format!("failed to load {}", path.display()))?;
    let (encoder, shuffler) = rc.config.build().context("configuration is invalid")?;
    encoder
        .validate_preflight(&rc.preflight)
        .context("preflight checks failed")?;
    Ok((encoder, shuffler))
}

fn encode(path: &Path, number: u64) -> Result<()> {
    let (encoder, shuffler) = load_pipeline(path)?;
    let shuffled = shuffler.encode(number)?;
    let word = encoder.encode(shuffled)?;
    println!("{word}");
    Ok(())
}

fn decode(path: &Path, word: &str) -> Result<()> {
    let (encoder, shuffler) = load_pipeline(path)?;
    let shuffled = encoder.decode(word)?;
    let number = shuffler.decode(shuffled)?;
    println!("{number}");
    Ok(())
}
