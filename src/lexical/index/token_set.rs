//! Immutable token sets and the containment predicate.
//!
//! A [`TokenSet`] is the unit the lexical index works with: vocabulary labels
//! are turned into one token set each at build time, and every document is
//! turned into a single token set at query time.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

/// Integer identifier of one normalized word form.
pub type TokenId = u32;

/// Integer identifier of one vocabulary subject.
pub type SubjectId = u32;

/// Distinct token identifiers of a [`TokenSet`], compared and hashed by content.
///
/// `HashSet` has no `Hash` impl of its own, so the hash here is an
/// order-independent combination of the mixed token ids. Collisions are
/// resolved by the derived set equality.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tokens(HashSet<TokenId>);

impl Tokens {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = TokenId> + '_ {
        self.0.iter().copied()
    }

    #[inline]
    pub fn contains_token(&self, token: TokenId) -> bool {
        self.0.contains(&token)
    }

    /// True iff every token of `other` is also in `self`.
    pub fn is_superset(&self, other: &Tokens) -> bool {
        if other.len() > self.len() {
            return false;
        }
        other.0.iter().all(|tid| self.0.contains(tid))
    }
}

impl Hash for Tokens {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut sum: u64 = 0;
        let mut xor: u64 = 0;
        for &tid in &self.0 {
            let mixed = (u64::from(tid) ^ 0x5bd1_e995).wrapping_mul(0x9e37_79b9_7f4a_7c15);
            sum = sum.wrapping_add(mixed);
            xor ^= mixed.rotate_left(17);
        }
        state.write_usize(self.0.len());
        state.write_u64(sum);
        state.write_u64(xor);
    }
}

impl FromIterator<TokenId> for Tokens {
    fn from_iter<I: IntoIterator<Item = TokenId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A set of token ids that can be matched against another set of token ids,
/// optionally tied to a vocabulary subject.
///
/// The tokens never change after construction. `key` is the first token of
/// the sequence the set was built from and decides which index bucket the
/// set lands in; callers should pass tokens in label order so the key is
/// meaningful.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenSet {
    tokens: Tokens,
    key: Option<TokenId>,
    subject_id: Option<SubjectId>,
    is_pref: bool,
}

impl TokenSet {
    /// Build a token set for a vocabulary label.
    pub fn new(tokens: &[TokenId], subject_id: Option<SubjectId>, is_pref: bool) -> Self {
        Self {
            tokens: tokens.iter().copied().collect(),
            key: tokens.first().copied(),
            subject_id,
            is_pref,
        }
    }

    /// Build an ad-hoc token set with no subject, e.g. for a document.
    pub fn from_tokens(tokens: &[TokenId]) -> Self {
        Self::new(tokens, None, false)
    }

    /// Reassemble a token set from stored parts.
    ///
    /// Used when upgrading older model artifacts, where the key was stored
    /// next to the raw token list instead of being derived from it.
    pub(crate) fn from_parts(
        tokens: Tokens,
        key: Option<TokenId>,
        subject_id: Option<SubjectId>,
        is_pref: bool,
    ) -> Self {
        Self {
            tokens,
            key,
            subject_id,
            is_pref,
        }
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterate over the distinct tokens in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = TokenId> + '_ {
        self.tokens.iter()
    }

    pub fn tokens(&self) -> &Tokens {
        &self.tokens
    }

    pub fn key(&self) -> Option<TokenId> {
        self.key
    }

    pub fn subject_id(&self) -> Option<SubjectId> {
        self.subject_id
    }

    pub fn is_pref(&self) -> bool {
        self.is_pref
    }

    /// Returns true iff all tokens of `other` are included in this set.
    pub fn contains(&self, other: &TokenSet) -> bool {
        self.tokens.is_superset(&other.tokens)
    }
}
