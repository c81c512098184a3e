//! Text analyzers.
//!
//! An analyzer turns raw text into normalized word tokens: it splits text
//! into sentences and words, drops tokens that are too short or contain no
//! letters, and maps each remaining word to a canonical form. Labels and
//! documents must go through the same analyzer for their tokens to line up.

mod ascii;
mod simple;

use anyhow::{Context, Result, anyhow, bail};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::Debug;

pub use ascii::AsciiAnalyzer;
pub use simple::SimpleAnalyzer;

/// Default minimum length, in characters, of an acceptable token.
pub const DEFAULT_TOKEN_MIN_LENGTH: usize = 3;

const KEY_TOKEN_MIN_LENGTH: &str = "token_min_length";

/// Word-like runs: letters and digits, excluding underscores.
static WORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^_\W]+").expect("Invalid word pattern"));

/// Sentence-final punctuation followed by whitespace, or a blank line.
static SENTENCE_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+\s+|\n\s*\n").expect("Invalid sentence pattern"));

/// `name` or `name(key=value,...)`
static ANALYZER_SPEC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\w+)\s*(?:\((.*)\))?\s*$").expect("Invalid analyzer spec pattern")
});

/// Settings shared by all analyzers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzerConfig {
    pub token_min_length: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            token_min_length: DEFAULT_TOKEN_MIN_LENGTH,
        }
    }
}

impl AnalyzerConfig {
    /// Parse a comma separated `key=value` parameter list.
    fn from_params(params: &str) -> Result<Self> {
        let mut config = Self::default();

        for param in params.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = param
                .split_once('=')
                .ok_or_else(|| anyhow!("Analyzer parameter must be key=value: {}", param))?;
            match key.trim() {
                KEY_TOKEN_MIN_LENGTH => {
                    config.token_min_length = value
                        .trim()
                        .parse()
                        .with_context(|| format!("Invalid {}: {}", KEY_TOKEN_MIN_LENGTH, value))?;
                }
                other => bail!("Unknown analyzer parameter: {}", other),
            }
        }

        Ok(config)
    }
}

/// Splits text into normalized word tokens.
///
/// Implementations provide `normalize_word`; the other methods may be
/// overridden when a language needs different segmentation.
pub trait Analyzer: Debug + Send + Sync {
    /// Short name used in analyzer specs.
    fn name(&self) -> &'static str;

    fn config(&self) -> &AnalyzerConfig;

    /// Normalize a word form into its canonical form.
    fn normalize_word(&self, word: &str) -> String;

    /// Split a piece of text (e.g. a document) into sentences.
    fn tokenize_sentences(&self, text: &str) -> Vec<String> {
        SENTENCE_BOUNDARY
            .split(text)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Return true if the word is an acceptable token.
    fn is_valid_token(&self, word: &str) -> bool {
        if word.chars().count() < self.config().token_min_length {
            return false;
        }
        word.chars().any(char::is_alphabetic)
    }

    /// Split a piece of text (e.g. a sentence) into normalized words.
    ///
    /// With `filter`, only valid tokens are kept (no numbers, no very short
    /// words).
    fn tokenize_words(&self, text: &str, filter: bool) -> Vec<String> {
        WORD_PATTERN
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(|word| !filter || self.is_valid_token(word))
            .map(|word| self.normalize_word(word))
            .collect()
    }
}

/// Create an analyzer from a spec such as `simple` or
/// `ascii(token_min_length=2)`.
pub fn get_analyzer(spec: &str) -> Result<Box<dyn Analyzer>> {
    let caps = ANALYZER_SPEC
        .captures(spec)
        .ok_or_else(|| anyhow!("Invalid analyzer specification: {:?}", spec))?;
    let name = &caps[1];
    let config = match caps.get(2) {
        Some(params) => AnalyzerConfig::from_params(params.as_str())
            .with_context(|| format!("Invalid parameters for analyzer {}", name))?,
        None => AnalyzerConfig::default(),
    };

    match name {
        "simple" => Ok(Box::new(SimpleAnalyzer::new(config))),
        "ascii" => Ok(Box::new(AsciiAnalyzer::new(config))),
        other => bail!("Unsupported analyzer: {}", other),
    }
}
