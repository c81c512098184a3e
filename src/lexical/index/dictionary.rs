//! Token string to integer ID mapping.
//!
//! TokenDictionary maps normalized token strings to unique integer IDs so
//! that labels and documents can be compared as sets of integers.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::lexical::index::token_set::TokenId;

/// Token dictionary mapping normalized token strings to unique integer IDs.
///
/// IDs are assigned densely from zero in first-seen order while the
/// vocabulary is indexed. Documents only look tokens up: a word that no
/// label contains cannot take part in a containment match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenDictionary {
    /// Mapping from token string to token ID
    tokens_to_ids: HashMap<String, TokenId>,

    /// Next token ID to assign
    next_id: TokenId,
}

impl TokenDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or assign a token ID for a token string.
    ///
    /// If the token already exists, returns its existing ID.
    /// If it's a new token, assigns it the next available ID.
    pub fn get_or_assign(&mut self, token: &str) -> TokenId {
        if let Some(&id) = self.tokens_to_ids.get(token) {
            return id;
        }

        let id = self.next_id;
        self.next_id += 1;
        self.tokens_to_ids.insert(token.to_string(), id);
        id
    }

    /// Get the token ID for a token string if it exists.
    pub fn get(&self, token: &str) -> Option<TokenId> {
        self.tokens_to_ids.get(token).copied()
    }

    /// Get the number of registered tokens.
    pub fn len(&self) -> usize {
        self.tokens_to_ids.len()
    }

    /// Check if the dictionary is empty.
    pub fn is_empty(&self) -> bool {
        self.tokens_to_ids.is_empty()
    }
}
