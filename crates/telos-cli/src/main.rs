//! Telos block document editor (line-oriented).
//!
//! Reads commands from stdin (or a script file) and prints the document after
//! every change. The document lives only for the session.
//!
//! Usage:
//!   telos
//!   telos --config ~/.config/telos/config.ron --no-welcome
//!   telos --script demo.telos
//!   RUST_LOG=telos_blocks=debug telos

use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

mod config;
mod render;
mod session;

use config::Config;
use render::render_document;
use session::{Outcome, Session};

/// Compose a document out of text, to-do, image, code, and table blocks.
#[derive(Parser, Debug)]
#[command(name = "telos")]
#[command(about = "Block document editor for Telos")]
struct Args {
    /// Config file (RON). Defaults to the user config dir if present.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Start from an empty document instead of the welcome blocks
    #[arg(long)]
    no_welcome: bool,

    /// Read commands from a file instead of stdin
    #[arg(short, long)]
    script: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Config first: it carries the default log filter.
    let (mut config, config_path) = match Config::resolve(args.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("telos: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Logs go to stderr; stdout carries the document.
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match &config_path {
        Some(path) => tracing::info!(path = %path.display(), "loaded config"),
        None => tracing::debug!("no config file, using defaults"),
    }

    if args.no_welcome {
        config.welcome = false;
    }

    match run(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, config: &Config) -> Result<()> {
    let input: Box<dyn BufRead> = match &args.script {
        Some(path) => Box::new(BufReader::new(
            std::fs::File::open(path)
                .with_context(|| format!("cannot open script {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    let mut session = Session::new(config);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write!(out, "{}", render_document(&config.title, &session.snapshot()))?;

    for (lineno, line) in input.lines().enumerate() {
        let line = line.context("reading input")?;
        match session.execute_line(&line, &mut out) {
            Ok(Outcome::Continue) => {}
            Ok(Outcome::Quit) => break,
            // A bad command does not end the session.
            Err(e) => {
                tracing::warn!(line = lineno + 1, "{e:#}");
                eprintln!("error: {e:#}");
            }
        }
        out.flush()?;
    }

    tracing::info!("session ended");
    Ok(())
}
