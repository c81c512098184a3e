//! Lexical subject matching.
//!
//! The engine ties together an analyzer, the token dictionary, the subject
//! vocabulary and the token set index. Documents are analyzed into a single
//! query token set and matched against every label token set it contains.

pub mod index;
mod persist;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use log::{debug, info, warn};
use rayon::prelude::*;
use serde::Serialize;

use crate::analyzer::{Analyzer, get_analyzer};
use crate::lexical::index::builder::build_index;
use crate::lexical::index::dictionary::TokenDictionary;
use crate::lexical::index::{Match, SubjectId, TokenSet, TokenSetIndex};
use crate::utils::atomic_save;
use crate::vocab::Vocabulary;

pub use persist::FORMAT_VERSION;

/// One subject whose label tokens were all found in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectMatch {
    pub subject_id: SubjectId,
    pub uri: String,
    pub label: String,
    pub notation: String,
    /// Whether the preferred label (rather than an alternate one) matched
    pub is_pref: bool,
    /// Number of other matched subjects with an equal or more specific
    /// token pattern; higher means a less discriminative match
    pub ambiguity: usize,
}

/// Lexical matching engine over one vocabulary.
///
/// Building and loading are the only mutating phases. Afterwards the engine
/// is read-only and can be shared between threads.
#[derive(Debug)]
pub struct LexicalEngine {
    analyzer_spec: String,
    analyzer: Box<dyn Analyzer>,
    dictionary: TokenDictionary,
    vocab: Vocabulary,
    index: Arc<TokenSetIndex>,
}

impl LexicalEngine {
    /// Build an engine by indexing all labels of `vocab`.
    ///
    /// # Arguments
    /// * `vocab` - The subjects to match against
    /// * `analyzer_spec` - Analyzer specification, e.g. `simple(token_min_length=2)`
    pub fn build(vocab: Vocabulary, analyzer_spec: &str) -> Result<Self> {
        let analyzer = get_analyzer(analyzer_spec)?;
        let mut dictionary = TokenDictionary::new();
        let index = build_index(&vocab, analyzer.as_ref(), &mut dictionary);

        Ok(Self {
            analyzer_spec: analyzer_spec.to_string(),
            analyzer,
            dictionary,
            vocab,
            index: Arc::new(index),
        })
    }

    /// Load an engine from a model file written by [`LexicalEngine::save`].
    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open model {:?}", path))?;
        let data = persist::read_model(std::io::BufReader::new(file))
            .with_context(|| format!("Failed to load model {:?}", path))?;

        let analyzer = get_analyzer(&data.analyzer)?;
        let mut index = TokenSetIndex::new();
        for tset in data.token_sets {
            index.add(tset);
        }

        info!(
            "Loaded model {:?}: {} subjects, {} token sets",
            path,
            data.vocab.len(),
            index.token_set_count()
        );

        Ok(Self {
            analyzer_spec: data.analyzer,
            analyzer,
            dictionary: data.dictionary,
            vocab: data.vocab,
            index: Arc::new(index),
        })
    }

    /// Save the engine to `path`, replacing any existing file atomically.
    pub fn save(&self, path: &Path) -> Result<PathBuf> {
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| anyhow!("Model path has no file name: {:?}", path))?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let model = persist::ModelRef {
            analyzer: &self.analyzer_spec,
            dictionary: &self.dictionary,
            vocab: &self.vocab,
            token_sets: self.index.token_sets().map(Arc::as_ref).collect(),
        };
        let saved = atomic_save(dir, filename, |writer| persist::write_model(writer, &model))?;
        info!("Saved model to {:?}", saved);
        Ok(saved)
    }

    pub fn analyzer_spec(&self) -> &str {
        &self.analyzer_spec
    }

    pub fn index(&self) -> &TokenSetIndex {
        &self.index
    }

    pub fn dictionary(&self) -> &TokenDictionary {
        &self.dictionary
    }

    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Analyze a document into a query token set.
    ///
    /// Words the vocabulary never uses are dropped since they cannot take
    /// part in a containment match.
    pub fn query_token_set(&self, text: &str) -> TokenSet {
        let tids: Vec<_> = self
            .analyzer
            .tokenize_sentences(text)
            .iter()
            .flat_map(|sentence| self.analyzer.tokenize_words(sentence, true))
            .filter_map(|word| self.dictionary.get(&word))
            .collect();
        TokenSet::from_tokens(&tids)
    }

    /// Find the subjects whose labels are contained in `text`, ordered by
    /// subject id.
    pub fn search(&self, text: &str) -> Vec<SubjectMatch> {
        let query = self.query_token_set(text);
        let matches = self.index.search(&query);
        debug!(
            "Query of {} known tokens matched {} subjects",
            query.len(),
            matches.len()
        );

        let mut results: Vec<_> = matches
            .into_iter()
            .filter_map(|m| self.to_subject_match(m))
            .collect();
        results.sort_by_key(|m| m.subject_id);
        results
    }

    /// Search several documents in parallel.
    pub fn search_batch<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Vec<Vec<SubjectMatch>> {
        texts
            .par_iter()
            .map(|text| self.search(text.as_ref()))
            .collect()
    }

    fn to_subject_match(&self, (tset, ambiguity): Match) -> Option<SubjectMatch> {
        let subject_id = tset.subject_id()?;
        let Some(subject) = self.vocab.get(subject_id) else {
            warn!("Matched token set refers to unknown subject {}", subject_id);
            return None;
        };

        Some(SubjectMatch {
            subject_id,
            uri: subject.uri.clone(),
            label: subject.pref_label.clone(),
            notation: subject.notation().to_string(),
            is_pref: tset.is_pref(),
            ambiguity,
        })
    }
}
