use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a lexical model from a vocabulary file
    Build {
        /// Tab-separated vocabulary: URI, preferred label, `|`-separated alternate labels
        #[arg(short, long)]
        vocab: PathBuf,

        /// Model file to write
        #[arg(short, long, default_value = "lexical.model")]
        output: PathBuf,

        /// Analyzer specification, e.g. "simple" or "ascii(token_min_length=2)"
        #[arg(short, long, default_value = "simple")]
        analyzer: String,
    },

    /// Suggest subjects for documents
    Suggest {
        /// Model file written by `build`
        #[arg(short, long, default_value = "lexical.model")]
        model: PathBuf,

        /// Documents to analyze (reads stdin when none are given)
        files: Vec<PathBuf>,
    },
}
