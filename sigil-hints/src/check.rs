use std::sync::Arc;
use sigil_core::builtin::HINT;
use sigil_core::{AnnotationCompiler, AnnotationError, DirectiveCheck, ResolvedDirective};
use crate::tokenizer::tokenize;
use crate::vocabulary::HintVocabulary;

/// Rejects `Hint` directives whose payload does not tokenize, so a bad hint
/// aborts the statement at compile time.
#[derive(Debug, Clone)]
pub struct HintCheck {
    vocabulary: HintVocabulary,
}

impl HintCheck {
    pub fn new(vocabulary: HintVocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn builtin() -> Self {
        Self::new(HintVocabulary::builtin().clone())
    }
}

impl DirectiveCheck for HintCheck {
    fn schema_name(&self) -> &str {
        HINT
    }

    fn check(&self, directive: &ResolvedDirective) -> Result<(), AnnotationError> {
        if let Some(payload) = directive.value().and_then(|value| value.as_str()) {
            tokenize(payload, &self.vocabulary)?;
        }
        Ok(())
    }
}

/// Adds payload validation of the built-in hints to `compiler`
pub fn install(compiler: AnnotationCompiler) -> AnnotationCompiler {
    compiler.with_check(Arc::new(HintCheck::builtin()))
}
