// src/main.rs
//
// readmore: cut an HTML fragment file down to a read-more preview
//
// - Reads the fragment, keeps the first N words with their markup, appends the ellipsis
//   to the last kept word and drops everything after it.
// - A fragment that already fits is written back unchanged.
// - Malformed markup is an error; nothing is written.
//
// CLI flags:
//   --words N       : word budget (default 100)
//   --ellipsis S    : suffix for the last kept word (default "...")
//   --report        : log the word total and whether the fragment was cut
// Logging goes to stderr; RUST_LOG overrides the default level.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use readmore::{Config, Truncator, DEFAULT_ELLIPSIS, DEFAULT_WORD_LIMIT};
use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// CLI flags
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Number of words to keep
    #[arg(long, short = 'w', default_value_t = DEFAULT_WORD_LIMIT as i64, allow_negative_numbers = true)]
    words: i64,

    /// Suffix appended to the last kept word
    #[arg(long, default_value = DEFAULT_ELLIPSIS)]
    ellipsis: String,

    /// Log the word total and whether truncation happened
    #[arg(long, action = ArgAction::SetTrue)]
    report: bool,

    /// Input file
    input: PathBuf,

    /// Output file (default: stdout)
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.report { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();

    let config = Config::with_word_limit(cli.words)?.ellipsis(cli.ellipsis);
    let truncator = Truncator::from_config(&config);

    let src = fs::read_to_string(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;
    let out = truncator
        .truncate(&src)
        .with_context(|| format!("truncating {}", cli.input.display()))?;

    if cli.report {
        tracing::info!(
            input = %cli.input.display(),
            total_words = out.total_words,
            limit = config.word_limit,
            truncated = out.truncated,
            "done"
        );
    }

    match &cli.output {
        Some(path) => {
            fs::write(path, &out.html).with_context(|| format!("writing {}", path.display()))?
        }
        None => io::stdout()
            .write_all(out.html.as_bytes())
            .context("writing to stdout")?,
    }
    Ok(())
}
