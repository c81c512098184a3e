//! Token set index builder.
//!
//! Turns every label of a vocabulary into a [`TokenSet`] and collects them
//! into a [`TokenSetIndex`].

use log::{debug, info};

use crate::analyzer::Analyzer;
use crate::lexical::index::TokenSetIndex;
use crate::lexical::index::dictionary::TokenDictionary;
use crate::lexical::index::token_set::{SubjectId, TokenId, TokenSet};
use crate::vocab::Vocabulary;

/// Tokenize a label and assign ids to its words, keeping label order so the
/// first word becomes the token set key.
fn label_token_ids(
    label: &str,
    analyzer: &dyn Analyzer,
    dictionary: &mut TokenDictionary,
) -> Vec<TokenId> {
    analyzer
        .tokenize_words(label, true)
        .iter()
        .map(|word| dictionary.get_or_assign(word))
        .collect()
}

fn add_label(
    index: &mut TokenSetIndex,
    label: &str,
    subject_id: SubjectId,
    is_pref: bool,
    analyzer: &dyn Analyzer,
    dictionary: &mut TokenDictionary,
) {
    let tids = label_token_ids(label, analyzer, dictionary);
    if tids.is_empty() {
        debug!(
            "Label {:?} of subject {} has no valid tokens and cannot be matched",
            label, subject_id
        );
    }
    index.add(TokenSet::new(&tids, Some(subject_id), is_pref));
}

/// Build an index over the preferred and alternate labels of all subjects.
///
/// New words are registered in `dictionary` as they are encountered.
pub fn build_index(
    vocab: &Vocabulary,
    analyzer: &dyn Analyzer,
    dictionary: &mut TokenDictionary,
) -> TokenSetIndex {
    let mut index = TokenSetIndex::new();

    for (subject_id, subject) in vocab.iter() {
        add_label(
            &mut index,
            &subject.pref_label,
            subject_id,
            true,
            analyzer,
            dictionary,
        );
        for alt_label in &subject.alt_labels {
            add_label(&mut index, alt_label, subject_id, false, analyzer, dictionary);
        }
    }

    info!(
        "Indexed {} token sets under {} keys ({} distinct tokens)",
        index.token_set_count(),
        index.len(),
        dictionary.len()
    );

    index
}
