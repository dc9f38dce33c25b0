use std::collections::HashSet;
use std::sync::Arc;
use lazy_static::lazy_static;
use regex::Regex;
use crate::definition::{simple_name, AttributeDefinition, AttributeKind};
use crate::error::DefinitionError;

lazy_static! {
    static ref QUALIFIED_NAME: Regex =
        Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*(\.[A-Za-z_$][A-Za-z0-9_$]*)*$").expect("valid regex");
}

/// Whether `name` is a (possibly dotted) identifier
pub fn is_valid_name(name: &str) -> bool {
    QUALIFIED_NAME.is_match(name)
}

/// Declared attribute contract of one directive type
#[derive(Debug, Clone, PartialEq)]
pub struct DirectiveSchema {
    name: Arc<str>,
    attributes: Vec<AttributeDefinition>,
}

impl DirectiveSchema {
    pub fn new(name: impl Into<Arc<str>>, attributes: Vec<AttributeDefinition>) -> Self {
        Self {
            name: name.into(),
            attributes,
        }
    }

    /// Qualified name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn simple_name(&self) -> &str {
        simple_name(&self.name)
    }

    pub fn attributes(&self) -> &[AttributeDefinition] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeDefinition> {
        self.attributes.iter().find(|attr| attr.name.as_ref() == name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|attr| attr.name.as_ref() == name)
    }

    pub fn has_value_attribute(&self) -> bool {
        self.index_of("value").is_some()
    }

    /// Validates the schema on its own: names, uniqueness and default conformity.
    /// References to other schemas/enums are checked by the registry.
    pub fn validate_definition(&self) -> Result<(), DefinitionError> {
        if !is_valid_name(&self.name) {
            return Err(DefinitionError::InvalidName(self.name.to_string()));
        }

        let mut names = HashSet::new();
        for attr in &self.attributes {
            if !is_valid_name(&attr.name) || attr.name.contains('.') {
                return Err(DefinitionError::InvalidName(attr.name.to_string()));
            }
            if !names.insert(attr.name.as_ref()) {
                return Err(DefinitionError::DuplicateAttribute {
                    schema: self.name.to_string(),
                    attribute: attr.name.to_string(),
                });
            }
            if let AttributeKind::Array { element, .. } = &attr.kind {
                if matches!(element.as_ref(), AttributeKind::Array { .. }) {
                    return Err(DefinitionError::NestedArray {
                        schema: self.name.to_string(),
                        attribute: attr.name.to_string(),
                    });
                }
            }
            if let Some(default) = &attr.default_value {
                if !attr.kind.conforms(default) {
                    return Err(DefinitionError::DefaultMismatch {
                        schema: self.name.to_string(),
                        attribute: attr.name.to_string(),
                        expected: attr.kind.to_string(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Enum and directive types this schema refers to, with the referring attribute
    pub fn references(&self) -> impl Iterator<Item = (&AttributeDefinition, &AttributeKind)> {
        self.attributes.iter().filter_map(|attr| {
            let kind = match &attr.kind {
                AttributeKind::Array { element, .. } => element.as_ref(),
                other => other,
            };
            matches!(kind, AttributeKind::Enum(_) | AttributeKind::Directive(_)).then_some((attr, kind))
        })
    }
}
