use sigil_core::builtin::HINT;
use sigil_core::ResolvedDirective;
use crate::error::HintError;
use crate::tokenizer::{tokenize, ParsedHintToken};
use crate::vocabulary::HintVocabulary;

/// Hint token found in a statement, with the `Hint` directive carrying it
#[derive(Debug, Clone, PartialEq)]
pub struct HintMatch<'a> {
    pub directive: &'a ResolvedDirective,
    pub token: ParsedHintToken,
}

impl HintMatch<'_> {
    /// Full payload of the owning directive, as written
    pub fn payload(&self) -> Option<&str> {
        self.directive.value().and_then(|value| value.as_str())
    }

    pub fn assigned_scalar(&self) -> Option<&str> {
        self.token.assigned_scalar()
    }

    pub fn assigned_list(&self) -> Option<Vec<String>> {
        self.token.assigned_list()
    }
}

/// Answers hint queries over the directives of a compiled statement. Payloads
/// are tokenized again on every query; nothing is cached.
#[derive(Debug, Clone, Copy)]
pub struct HintLookup<'v> {
    vocabulary: &'v HintVocabulary,
}

impl Default for HintLookup<'static> {
    fn default() -> Self {
        Self::new(HintVocabulary::builtin())
    }
}

impl<'v> HintLookup<'v> {
    pub fn new(vocabulary: &'v HintVocabulary) -> Self {
        Self { vocabulary }
    }

    /// First token named `name` across all `Hint` directives
    pub fn find_hint<'a>(&self, directives: &'a [ResolvedDirective], name: &str) -> Result<Option<HintMatch<'a>>, HintError> {
        for directive in hint_directives(directives) {
            if let Some(token) = self.tokens(directive)?.into_iter().find(|token| token.is(name)) {
                return Ok(Some(HintMatch { directive, token }));
            }
        }
        Ok(None)
    }

    /// Every token named `name`, in statement order
    pub fn find_all_hints<'a>(&self, directives: &'a [ResolvedDirective], name: &str) -> Result<Vec<HintMatch<'a>>, HintError> {
        let mut matches = Vec::new();
        for directive in hint_directives(directives) {
            matches.extend(
                self.tokens(directive)?
                    .into_iter()
                    .filter(|token| token.is(name))
                    .map(|token| HintMatch { directive, token }),
            );
        }
        Ok(matches)
    }

    pub fn has_hint(&self, directives: &[ResolvedDirective], name: &str) -> Result<bool, HintError> {
        Ok(self.find_hint(directives, name)?.is_some())
    }

    /// Scalar value of the first `name=value` hint
    pub fn assigned_scalar(&self, directives: &[ResolvedDirective], name: &str) -> Result<Option<String>, HintError> {
        Ok(self
            .find_hint(directives, name)?
            .and_then(|found| found.assigned_scalar().map(str::to_string)))
    }

    /// Argument lists of every `name(...)` hint
    pub fn assigned_lists(&self, directives: &[ResolvedDirective], name: &str) -> Result<Vec<Vec<String>>, HintError> {
        Ok(self
            .find_all_hints(directives, name)?
            .iter()
            .filter_map(HintMatch::assigned_list)
            .collect())
    }

    fn tokens(&self, directive: &ResolvedDirective) -> Result<Vec<ParsedHintToken>, HintError> {
        match directive.value().and_then(|value| value.as_str()) {
            Some(payload) => tokenize(payload, self.vocabulary),
            None => Ok(Vec::new()),
        }
    }
}

fn hint_directives(directives: &[ResolvedDirective]) -> impl Iterator<Item = &ResolvedDirective> {
    directives.iter().filter(|directive| directive.is_type(HINT))
}

/// [`HintLookup::find_hint`] with the built-in vocabulary
pub fn find_hint<'a>(directives: &'a [ResolvedDirective], name: &str) -> Result<Option<HintMatch<'a>>, HintError> {
    HintLookup::default().find_hint(directives, name)
}

pub fn find_all_hints<'a>(directives: &'a [ResolvedDirective], name: &str) -> Result<Vec<HintMatch<'a>>, HintError> {
    HintLookup::default().find_all_hints(directives, name)
}

pub fn has_hint(directives: &[ResolvedDirective], name: &str) -> Result<bool, HintError> {
    HintLookup::default().has_hint(directives, name)
}
