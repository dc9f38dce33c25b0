use derive_more::Display;
use lazy_static::lazy_static;

pub const ITERATE_ONLY: &str = "ITERATE_ONLY";
pub const DISABLE_RECLAIM_GROUP: &str = "DISABLE_RECLAIM_GROUP";
pub const ENABLE_WINDOW_SUBQUERY_INDEXSHARE: &str = "ENABLE_WINDOW_SUBQUERY_INDEXSHARE";
pub const DISABLE_WINDOW_SUBQUERY_INDEXSHARE: &str = "DISABLE_WINDOW_SUBQUERY_INDEXSHARE";
pub const SET_NOINDEX: &str = "SET_NOINDEX";
pub const FORCE_NESTED_ITER: &str = "FORCE_NESTED_ITER";
pub const PREFER_MERGE_JOIN: &str = "PREFER_MERGE_JOIN";
pub const DISABLE_UNIQUE_IMPLICIT_IDX: &str = "DISABLE_UNIQUE_IMPLICIT_IDX";
pub const ENABLE_OUTPUTLIMIT_OPT: &str = "ENABLE_OUTPUTLIMIT_OPT";
pub const DISABLE_OUTPUTLIMIT_OPT: &str = "DISABLE_OUTPUTLIMIT_OPT";
pub const SILENT_DELETE: &str = "SILENT_DELETE";
pub const RECLAIM_GROUP_AGED: &str = "RECLAIM_GROUP_AGED";
pub const RECLAIM_GROUP_FREQ: &str = "RECLAIM_GROUP_FREQ";
pub const MAX_FILTER_WIDTH: &str = "MAX_FILTER_WIDTH";
pub const INDEX: &str = "INDEX";
pub const EXCLUDE_PLAN: &str = "EXCLUDE_PLAN";

/// Come un hint accetta argomenti
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum HintPolicy {
    /// Bare name, e.g. `ITERATE_ONLY`
    #[display("none")]
    None,
    /// `NAME=value`
    #[display("scalar")]
    RequiresScalar,
    /// `NAME(a, b)`
    #[display("parenthesized list")]
    RequiresParenthesizedList,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HintVocabularyEntry {
    /// Canonical upper-case name
    pub name: String,
    pub policy: HintPolicy,
}

/// Known hint names; lookups ignore case
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HintVocabulary {
    entries: Vec<HintVocabularyEntry>,
}

lazy_static! {
    static ref BUILTIN: HintVocabulary = {
        use HintPolicy as P;
        HintVocabulary::new([
            (ITERATE_ONLY, P::None),
            (DISABLE_RECLAIM_GROUP, P::None),
            (ENABLE_WINDOW_SUBQUERY_INDEXSHARE, P::None),
            (DISABLE_WINDOW_SUBQUERY_INDEXSHARE, P::None),
            (SET_NOINDEX, P::None),
            (FORCE_NESTED_ITER, P::None),
            (PREFER_MERGE_JOIN, P::None),
            (DISABLE_UNIQUE_IMPLICIT_IDX, P::None),
            (ENABLE_OUTPUTLIMIT_OPT, P::None),
            (DISABLE_OUTPUTLIMIT_OPT, P::None),
            (SILENT_DELETE, P::None),
            (RECLAIM_GROUP_AGED, P::RequiresScalar),
            (RECLAIM_GROUP_FREQ, P::RequiresScalar),
            (MAX_FILTER_WIDTH, P::RequiresScalar),
            (INDEX, P::RequiresParenthesizedList),
            (EXCLUDE_PLAN, P::RequiresParenthesizedList),
        ])
    };
}

impl HintVocabulary {
    pub fn new<N: AsRef<str>>(entries: impl IntoIterator<Item = (N, HintPolicy)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(name, policy)| HintVocabularyEntry {
                    name: name.as_ref().to_ascii_uppercase(),
                    policy,
                })
                .collect(),
        }
    }

    /// Vocabulary of the engine-tuning hints understood by default
    pub fn builtin() -> &'static HintVocabulary {
        &BUILTIN
    }

    pub fn lookup(&self, name: &str) -> Option<&HintVocabularyEntry> {
        self.entries.iter().find(|entry| entry.name.eq_ignore_ascii_case(name))
    }

    pub fn entries(&self) -> &[HintVocabularyEntry] {
        &self.entries
    }
}
