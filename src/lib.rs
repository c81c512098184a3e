pub mod analyzer;
pub mod cli;
pub mod lexical;
pub mod utils;
pub mod vocab;

pub use analyzer::{Analyzer, get_analyzer};
pub use lexical::index::{Match, SubjectId, TokenId, TokenSet, TokenSetIndex};
pub use lexical::{LexicalEngine, SubjectMatch};
pub use vocab::{Subject, Vocabulary, load_vocabulary};
