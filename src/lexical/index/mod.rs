//! Token set index construction and containment search.
//!
//! The index buckets every vocabulary [`TokenSet`] under its key token. A
//! search only visits the buckets of tokens present in the query, so the
//! cost follows the query size and bucket density rather than the size of
//! the vocabulary.

pub mod builder;
pub mod dictionary;
pub mod token_set;

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

pub use token_set::{SubjectId, TokenId, TokenSet, Tokens};

/// A search hit: the winning token set of one subject and its ambiguity.
pub type Match = (Arc<TokenSet>, usize);

/// A searchable index of [`TokenSet`]s representing vocabulary terms.
///
/// The index is built once and then only read. `search` takes `&self` and
/// the index is `Send + Sync`, so a built index can be shared across
/// threads behind an `Arc` without locking.
#[derive(Debug, Clone, Default)]
pub struct TokenSetIndex {
    /// Token sets bucketed by their key token.
    ///
    /// Buckets hold distinct token sets by identity; two sets with equal
    /// tokens are both kept.
    index: HashMap<TokenId, Vec<Arc<TokenSet>>>,
}

impl TokenSetIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of populated keys (not the number of token sets).
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Total number of token sets across all buckets.
    pub fn token_set_count(&self) -> usize {
        self.index.values().map(Vec::len).sum()
    }

    /// Add a token set into this index.
    ///
    /// Sets without a key (built from an empty sequence) are ignored. Adding
    /// the same `Arc` twice is a no-op.
    pub fn add(&mut self, tset: impl Into<Arc<TokenSet>>) {
        let tset = tset.into();
        let Some(key) = tset.key() else {
            return;
        };

        let bucket = self.index.entry(key).or_default();
        if !bucket.iter().any(|existing| Arc::ptr_eq(existing, &tset)) {
            bucket.push(tset);
        }
    }

    /// Iterate over every indexed token set once, in unspecified order.
    pub fn token_sets(&self) -> impl Iterator<Item = &Arc<TokenSet>> + '_ {
        self.index.values().flatten()
    }

    /// Return the token sets contained in the given query token set.
    ///
    /// One match is returned per subject, paired with its ambiguity: the
    /// number of other matched subjects whose tokens equal or include the
    /// winning tokens. Output order is unspecified.
    pub fn search(&self, query: &TokenSet) -> Vec<Match> {
        let subj_tsets = self.find_subject_token_sets(query);
        let subj_ambiguity = find_subject_ambiguity(subj_tsets.values().map(Arc::as_ref));

        subj_tsets
            .into_iter()
            .map(|(subject_id, ts)| {
                let ambiguity = subj_ambiguity.get(&subject_id).copied().unwrap_or(0);
                (ts, ambiguity)
            })
            .collect()
    }

    /// Map each subject to its winning token set among those contained in
    /// `query`.
    ///
    /// A preferred-label set beats an alternate-label set. Between equally
    /// preferred sets the last one seen wins, which depends on hash order.
    fn find_subject_token_sets(
        &self,
        query: &TokenSet,
    ) -> HashMap<Option<SubjectId>, Arc<TokenSet>> {
        let mut subj_tsets: HashMap<Option<SubjectId>, Arc<TokenSet>> = HashMap::new();

        for token in query.iter() {
            let Some(bucket) = self.index.get(&token) else {
                continue;
            };
            for ts in bucket {
                if !query.contains(ts) {
                    continue;
                }
                match subj_tsets.entry(ts.subject_id()) {
                    Entry::Occupied(mut entry) => {
                        if !entry.get().is_pref() {
                            entry.insert(Arc::clone(ts));
                        }
                    }
                    Entry::Vacant(entry) => {
                        entry.insert(Arc::clone(ts));
                    }
                }
            }
        }

        subj_tsets
    }
}

/// Compute the ambiguity of each winning token set.
///
/// Winners with identical tokens are grouped first. Every subject then
/// accumulates, for each group whose tokens include its own (its own group
/// included), the number of subjects in that group other than itself.
/// Subjects missing from the returned map have an ambiguity of zero.
fn find_subject_ambiguity<'a>(
    tsets: impl IntoIterator<Item = &'a TokenSet>,
) -> HashMap<Option<SubjectId>, usize> {
    let mut groups: HashMap<&Tokens, HashSet<Option<SubjectId>>> = HashMap::new();
    for ts in tsets {
        groups.entry(ts.tokens()).or_default().insert(ts.subject_id());
    }

    let mut subj_ambiguity: HashMap<Option<SubjectId>, usize> = HashMap::new();

    for (tokens1, subjs1) in &groups {
        for (tokens2, subjs2) in &groups {
            if !tokens2.is_superset(tokens1) {
                continue;
            }
            for subj in subjs1 {
                *subj_ambiguity.entry(*subj).or_insert(0) +=
                    subjs2.len() - usize::from(subjs2.contains(subj));
            }
        }
    }

    subj_ambiguity
}
