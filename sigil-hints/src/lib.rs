//! Engine-tuning hints carried by `@Hint('...')` directives
//!
//! The payload of a hint directive is a comma-separated list such as
//! `ITERATE_ONLY,reclaim_group_aged=10,index(one, two)`. The stored payload is
//! kept verbatim and tokenized again on each lookup.

pub mod check;
pub mod error;
pub mod lookup;
pub mod tokenizer;
pub mod vocabulary;

pub use check::{install, HintCheck};
pub use error::HintError;
pub use lookup::{find_all_hints, find_hint, has_hint, HintLookup, HintMatch};
pub use tokenizer::{tokenize, ParsedHintToken};
pub use vocabulary::{HintPolicy, HintVocabulary, HintVocabularyEntry};
