use std::sync::Arc;
use log::trace;
use crate::definition::enumeration::EnumDefinition;
use crate::definition::schema::DirectiveSchema;
use crate::error::AnnotationError;
use crate::imports::{ImportEntry, ImportTable};
use crate::registry::{RegisteredClass, SchemaRegistry};
use crate::types::EnumConstant;

/// Context a name is being resolved in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveScope {
    /// Query expressions: general imports only
    General,
    /// Directive and enumeration names: general imports, then directive-only imports
    Directive,
}

/// Resolves written names to registered schemas and enumerations through the import table
#[derive(Debug, Clone, Copy)]
pub struct ClassResolver<'a> {
    registry: &'a SchemaRegistry,
    imports: &'a ImportTable,
}

impl<'a> ClassResolver<'a> {
    pub fn new(registry: &'a SchemaRegistry, imports: &'a ImportTable) -> Self {
        Self { registry, imports }
    }

    pub fn registry(&self) -> &'a SchemaRegistry {
        self.registry
    }

    /// Direct lookup for qualified tokens, then exact imports, then wildcard imports; directive-only
    /// imports are consulted last and only in [`ResolveScope::Directive`].
    pub fn resolve_class(&self, token: &str, scope: ResolveScope) -> Option<RegisteredClass> {
        if token.contains('.') {
            if let Some(class) = self.registry.class(token) {
                return Some(class);
            }
        }
        if let Some(class) = self.resolve_with(self.imports.general(), token) {
            return Some(class);
        }
        match scope {
            ResolveScope::Directive => self.resolve_with(self.imports.directive_only(), token),
            ResolveScope::General => None,
        }
    }

    fn resolve_with(&self, imports: &[ImportEntry], token: &str) -> Option<RegisteredClass> {
        let exact = imports.iter().filter(|import| !import.is_wildcard());
        let wildcard = imports.iter().filter(|import| import.is_wildcard());
        exact.chain(wildcard).find_map(|import| {
            let candidate = import.candidate(token)?;
            let found = self.registry.class(&candidate);
            if found.is_some() {
                trace!("Resolved '{}' to '{}' via import {}", token, candidate, import);
            }
            found
        })
    }

    /// Schema for a written directive name. Built-ins match ignoring case.
    pub fn resolve_directive(&self, token: &str) -> Result<Arc<DirectiveSchema>, AnnotationError> {
        if !token.contains('.') {
            if let Some(schema) = self.registry.builtin_schema(token) {
                return Ok(schema.clone());
            }
        }
        match self.resolve_class(token, ResolveScope::Directive) {
            Some(RegisteredClass::Schema(schema)) => Ok(schema),
            _ => Err(AnnotationError::UnresolvedDirective {
                name: token.to_string(),
            }),
        }
    }

    pub fn resolve_enum(&self, token: &str, scope: ResolveScope) -> Option<Arc<EnumDefinition>> {
        match self.resolve_class(token, scope) {
            Some(RegisteredClass::Enum(definition)) => Some(definition),
            _ => None,
        }
    }

    /// Resolves `Type.CONSTANT` (type possibly qualified); the constant matches ignoring case
    pub fn resolve_enum_reference(&self, text: &str) -> Result<EnumConstant, AnnotationError> {
        let not_recognized = || AnnotationError::EnumNotRecognized { value: text.to_string() };
        let (class, constant) = text.rsplit_once('.').ok_or_else(not_recognized)?;

        match self.resolve_class(class, ResolveScope::Directive) {
            Some(RegisteredClass::Enum(definition)) => {
                definition.find_ignore_case(constant).ok_or_else(not_recognized)
            }
            Some(RegisteredClass::Schema(schema)) => Err(AnnotationError::NotAnEnumeration {
                value: text.to_string(),
                class: schema.name().to_string(),
            }),
            None => Err(not_recognized()),
        }
    }

    /// Resolves a bare identifier against the constants of a known enumeration
    pub fn resolve_enum_constant(&self, enum_name: &str, identifier: &str) -> Result<EnumConstant, AnnotationError> {
        self.registry
            .enum_definition(enum_name)
            .and_then(|definition| definition.find_ignore_case(identifier))
            .ok_or_else(|| AnnotationError::EnumNotRecognized {
                value: identifier.to_string(),
            })
    }
}
