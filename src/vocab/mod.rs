//! Subject vocabularies.
//!
//! A vocabulary is an ordered list of subjects. A subject's position in the
//! list is its `subject_id`, which is what token sets refer to.

mod loader;

use serde::{Deserialize, Serialize};

use crate::lexical::index::SubjectId;
use crate::utils::localname;

pub use loader::{load_vocabulary, parse_vocabulary};

/// One vocabulary term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub uri: String,

    /// Canonical name of the subject
    pub pref_label: String,

    /// Synonyms and other alternate names
    pub alt_labels: Vec<String>,
}

impl Subject {
    pub fn new(uri: impl Into<String>, pref_label: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            pref_label: pref_label.into(),
            alt_labels: Vec::new(),
        }
    }

    pub fn with_alt_labels<I, S>(mut self, alt_labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.alt_labels = alt_labels.into_iter().map(Into::into).collect();
        self
    }

    /// Short notation for display, derived from the URI.
    pub fn notation(&self) -> &str {
        localname(&self.uri)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    subjects: Vec<Subject>,
}

impl Vocabulary {
    pub fn new(subjects: Vec<Subject>) -> Self {
        Self { subjects }
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    pub fn get(&self, subject_id: SubjectId) -> Option<&Subject> {
        self.subjects.get(subject_id as usize)
    }

    /// Iterate over `(subject_id, subject)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (SubjectId, &Subject)> + '_ {
        (0..).zip(self.subjects.iter())
    }
}
