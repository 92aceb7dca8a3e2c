//! magc-drv - The magicate command-line driver.
//!
//! Orchestrates one run of the pipeline:
//!
//! 1. read the input file into a single buffer;
//! 2. load and prepare the dialect grammar;
//! 3. parse, plan and emit via `magc-rw`;
//! 4. write the image bytes to stdout, untouched.
//!
//! Status lines ("Reading ...", preimage/image sizes) go to stderr
//! through `tracing`, keeping stdout byte-exact for redirection. Errors
//! are rendered as diagnostics with the offending line and a caret
//! under the column.
//!
//! Exit codes: 0 on success, 1 on I/O or parse failure, 2 on usage
//! errors (from argument parsing).

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;

use magc_par::ParseError;
use magc_util::diagnostic::{Diagnostic, SourceSnippet};

/// Rewrite a source file from the extended dialect to the base dialect.
///
/// Occurrences of the extended operators (U+2295, U+2297 and their
/// compound-assignment forms) are replaced by method-call encodings;
/// every other byte is passed through unchanged.
#[derive(Parser, Debug)]
#[command(name = "magicate")]
#[command(version)]
#[command(about = "Rewrite extended-dialect source into the base dialect")]
pub struct Cli {
    /// Input source file
    pub input: PathBuf,
}

/// Run the driver with arguments from the process command line.
///
/// Returns the process exit code.
pub fn run() -> i32 {
    let cli = Cli::parse();
    init_tracing();
    match run_file(&cli.input) {
        Ok(()) => 0,
        Err(failure) => {
            report(&failure);
            1
        }
    }
}

/// A failure the driver turns into a diagnostic and exit code 1.
pub enum Failure {
    /// Reading the input failed
    Io(anyhow::Error),
    /// The pipeline rejected the input
    Parse { path: PathBuf, error: ParseError },
}

/// Transform one file and write the image to stdout.
pub fn run_file(path: &Path) -> Result<(), Failure> {
    let source = std::fs::read(path)
        .with_context(|| format!("cannot read {}", path.display()))
        .map_err(Failure::Io)?;
    tracing::info!(path = %path.display(), bytes = source.len(), "reading input");

    let grammar = magc_par::dialect::grammar();
    let image = magc_rw::magicate(&source, &grammar).map_err(|error| Failure::Parse {
        path: path.to_owned(),
        error,
    })?;
    tracing::info!(
        preimage = source.len(),
        image = image.len(),
        "rewrite complete"
    );

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(&image)
        .and_then(|()| stdout.flush())
        .context("cannot write image to stdout")
        .map_err(Failure::Io)?;
    Ok(())
}

fn report(failure: &Failure) {
    match failure {
        Failure::Io(error) => eprintln!("error: {error:#}"),
        Failure::Parse { path, error } => {
            let mut diag = Diagnostic::error(format!(
                "{}: {} ({})",
                path.display(),
                error.code,
                error.code.name()
            ))
            .at(error.lineno, error.offset);
            if let Some(line) = &error.text {
                diag = diag.with_snippet(SourceSnippet::new(
                    line.clone(),
                    error.lineno,
                    Some(error.offset),
                ));
            }
            if let Some(expected) = &error.expected {
                diag.message.push_str(&format!(", expected {}", expected));
            }
            eprint!("{diag}");
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
