use std::sync::Arc;
use log::debug;
use crate::ast::DirectiveLiteral;
use crate::directive::{DirectiveSet, ResolvedDirective};
use crate::error::{AnnotationError, SigilError, SigilResult};
use crate::formatter::{DirectiveFormatter, FormatOptions};
use crate::imports::ImportTable;
use crate::reader::read_statement;
use crate::registry::SchemaRegistry;
use crate::resolver::ClassResolver;
use crate::validator::DirectiveValidator;

/// Controllo eseguito su ogni direttiva risolta di un certo schema
pub trait DirectiveCheck: Send + Sync {
    /// Qualified name of the schema this check applies to
    fn schema_name(&self) -> &str;

    fn check(&self, directive: &ResolvedDirective) -> Result<(), AnnotationError>;
}

/// Statement compiled by [`AnnotationCompiler`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledStatement {
    pub directives: DirectiveSet,
    /// Statement text without directives
    pub body: String,
    /// Original statement text
    pub text: String,
}

impl CompiledStatement {
    pub fn to_text(&self, options: &FormatOptions) -> String {
        DirectiveFormatter::new(options.clone()).format_statement(&self.directives, &self.body)
    }
}

/// Turns statement text into an immutable directive set. Registry and imports are
/// frozen, so one compiler can be shared by concurrent compilations.
#[derive(Clone)]
pub struct AnnotationCompiler {
    registry: Arc<SchemaRegistry>,
    imports: Arc<ImportTable>,
    checks: Vec<Arc<dyn DirectiveCheck>>,
}

impl AnnotationCompiler {
    pub fn new(registry: Arc<SchemaRegistry>, imports: Arc<ImportTable>) -> Self {
        Self {
            registry,
            imports,
            checks: Vec::new(),
        }
    }

    pub fn with_check(mut self, check: Arc<dyn DirectiveCheck>) -> Self {
        self.checks.push(check);
        self
    }

    /// Same compiler with a different import table
    pub fn with_imports(&self, imports: ImportTable) -> Self {
        Self {
            imports: Arc::new(imports),
            ..self.clone()
        }
    }

    pub fn registry(&self) -> &Arc<SchemaRegistry> {
        &self.registry
    }

    pub fn imports(&self) -> &Arc<ImportTable> {
        &self.imports
    }

    pub fn resolver(&self) -> ClassResolver<'_> {
        ClassResolver::new(&self.registry, &self.imports)
    }

    pub fn compile(&self, text: &str) -> SigilResult<CompiledStatement> {
        let statement = read_statement(text).map_err(|error| SigilError::syntax(error, text))?;
        let directives = self.resolve(&statement.directives, text)?;
        debug!("Compiled statement with {} directives", directives.len());
        Ok(CompiledStatement {
            directives,
            body: statement.body,
            text: text.to_string(),
        })
    }

    /// Resolves already-read literals. The first failure aborts the whole set.
    pub fn resolve(&self, literals: &[DirectiveLiteral], text: &str) -> SigilResult<DirectiveSet> {
        let validator = DirectiveValidator::new(self.resolver());
        let mut resolved = Vec::with_capacity(literals.len());

        for literal in literals {
            let directive = validator
                .validate(literal)
                .and_then(|directive| self.run_checks(&directive).map(|_| directive))
                .map_err(|error| {
                    debug!("Directive @{} rejected: {}", literal.name, error);
                    SigilError::semantic(error, text)
                })?;
            resolved.push(directive);
        }

        Ok(DirectiveSet::new(resolved))
    }

    fn run_checks(&self, directive: &ResolvedDirective) -> Result<(), AnnotationError> {
        self.checks
            .iter()
            .filter(|check| directive.is_type(check.schema_name()))
            .try_for_each(|check| check.check(directive))
    }
}
