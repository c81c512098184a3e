use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use serde::Serialize;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use lexicon::cli::{Cli, Command};
use lexicon::{LexicalEngine, SubjectMatch, load_vocabulary};

#[derive(Serialize)]
struct DocumentResult<'a> {
    document: &'a str,
    matches: &'a [SubjectMatch],
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build {
            vocab,
            output,
            analyzer,
        } => build(&vocab, &output, &analyzer),
        Command::Suggest { model, files } => suggest(&model, &files),
    }
}

fn build(vocab_path: &Path, output: &Path, analyzer: &str) -> Result<()> {
    let vocab = load_vocabulary(vocab_path)?;
    let engine = LexicalEngine::build(vocab, analyzer)?;
    engine.save(output)?;
    Ok(())
}

fn suggest(model: &Path, files: &[PathBuf]) -> Result<()> {
    let engine = LexicalEngine::load(model)?;

    let documents = if files.is_empty() {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read document from stdin")?;
        vec![("-".to_string(), text)]
    } else {
        files
            .iter()
            .map(|path| {
                fs::read_to_string(path)
                    .with_context(|| format!("Failed to read document {:?}", path))
                    .map(|text| (path.display().to_string(), text))
            })
            .collect::<Result<Vec<_>>>()?
    };

    let texts: Vec<&str> = documents.iter().map(|(_, text)| text.as_str()).collect();
    let results = engine.search_batch(&texts);
    info!("Analyzed {} documents", documents.len());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for ((name, _), matches) in documents.iter().zip(&results) {
        let line = serde_json::to_string(&DocumentResult {
            document: name,
            matches,
        })?;
        writeln!(out, "{}", line)?;
    }
    Ok(())
}
