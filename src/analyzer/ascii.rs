//! Analyzer that folds words to ASCII.

use super::{Analyzer, AnalyzerConfig};

/// Transliterates words to ASCII and lowercases them, so that accented and
/// unaccented spellings of a label produce the same token.
#[derive(Debug, Clone, Default)]
pub struct AsciiAnalyzer {
    config: AnalyzerConfig,
}

impl AsciiAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }
}

impl Analyzer for AsciiAnalyzer {
    fn name(&self) -> &'static str {
        "ascii"
    }

    fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    fn normalize_word(&self, word: &str) -> String {
        deunicode::deunicode(word).to_lowercase()
    }
}
