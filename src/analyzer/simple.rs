//! Unicode-preserving analyzer.

use unicode_normalization::UnicodeNormalization;

use super::{Analyzer, AnalyzerConfig};

/// Normalizes words with NFKC compatibility composition and lowercasing.
#[derive(Debug, Clone, Default)]
pub struct SimpleAnalyzer {
    config: AnalyzerConfig,
}

impl SimpleAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }
}

impl Analyzer for SimpleAnalyzer {
    fn name(&self) -> &'static str {
        "simple"
    }

    fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    fn normalize_word(&self, word: &str) -> String {
        word.nfkc().collect::<String>().to_lowercase()
    }
}
