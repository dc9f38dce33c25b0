use std::collections::HashMap;
use std::sync::Arc;
use log::debug;
use crate::definition::builtin::{find_builtin, BUILTIN_SCHEMAS};
use crate::definition::enumeration::EnumDefinition;
use crate::definition::schema::DirectiveSchema;
use crate::definition::AttributeKind;
use crate::error::DefinitionError;
use crate::types::AttributeValue;

/// Class registered under a qualified name
#[derive(Debug, Clone)]
pub enum RegisteredClass {
    Schema(Arc<DirectiveSchema>),
    Enum(Arc<EnumDefinition>),
}

// Builder mutabile, usato solo durante la configurazione
#[derive(Debug)]
pub struct RegistryBuilder {
    schemas: HashMap<Arc<str>, Arc<DirectiveSchema>>,
    enums: HashMap<Arc<str>, Arc<EnumDefinition>>,
}

/// Frozen set of directive schemas and enumerations, shared across compilations
#[derive(Debug)]
pub struct SchemaRegistry {
    schemas: HashMap<Arc<str>, Arc<DirectiveSchema>>,
    enums: HashMap<Arc<str>, Arc<EnumDefinition>>,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryBuilder {
    /// Builder pre-populated with the built-in directives
    pub fn new() -> Self {
        let schemas = BUILTIN_SCHEMAS
            .iter()
            .map(|schema| (Arc::from(schema.name()), schema.clone()))
            .collect();
        Self {
            schemas,
            enums: HashMap::new(),
        }
    }

    pub fn register_schema(&mut self, schema: DirectiveSchema) -> Result<&mut Self, DefinitionError> {
        schema.validate_definition()?;
        if self.contains(schema.name()) {
            return Err(DefinitionError::DuplicateSchema(schema.name().to_string()));
        }
        debug!("Registering directive schema {}", schema.name());
        self.schemas.insert(Arc::from(schema.name()), Arc::new(schema));
        Ok(self)
    }

    pub fn register_enum(&mut self, definition: EnumDefinition) -> Result<&mut Self, DefinitionError> {
        definition.validate_definition()?;
        if self.contains(definition.name()) {
            return Err(DefinitionError::DuplicateEnum(definition.name().to_string()));
        }
        debug!("Registering enumeration {}", definition.name());
        self.enums.insert(Arc::from(definition.name()), Arc::new(definition));
        Ok(self)
    }

    /// Chainable form of [`register_schema`](Self::register_schema)
    pub fn with_schema(mut self, schema: DirectiveSchema) -> Result<Self, DefinitionError> {
        self.register_schema(schema)?;
        Ok(self)
    }

    pub fn with_enum(mut self, definition: EnumDefinition) -> Result<Self, DefinitionError> {
        self.register_enum(definition)?;
        Ok(self)
    }

    pub fn enum_definition(&self, name: &str) -> Option<&EnumDefinition> {
        self.enums.get(name).map(Arc::as_ref)
    }

    fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name) || self.enums.contains_key(name)
    }

    /// Checks cross references and freezes the registry
    pub fn build(self) -> Result<SchemaRegistry, DefinitionError> {
        for schema in self.schemas.values() {
            for (attr, kind) in schema.references() {
                let (target, known) = match kind {
                    AttributeKind::Enum(name) => (name, self.enums.contains_key(name)),
                    AttributeKind::Directive(name) => (name, self.schemas.contains_key(name)),
                    _ => continue,
                };
                if !known {
                    return Err(DefinitionError::UnknownReference {
                        schema: schema.name().to_string(),
                        attribute: attr.name.to_string(),
                        target: target.to_string(),
                    });
                }
            }
            for attr in schema.attributes() {
                let Some(default) = &attr.default_value else {
                    continue;
                };
                let constants = match default {
                    AttributeValue::Enum(constant) => vec![constant],
                    AttributeValue::Array(items) => items.iter().filter_map(AttributeValue::as_enum).collect(),
                    _ => continue,
                };
                for constant in constants {
                    let exists = self
                        .enums
                        .get(constant.enum_name.as_ref())
                        .is_some_and(|definition| definition.constant(&constant.name).is_some());
                    if !exists {
                        return Err(DefinitionError::UnknownReference {
                            schema: schema.name().to_string(),
                            attribute: attr.name.to_string(),
                            target: format!("{}.{}", constant.enum_name, constant.name),
                        });
                    }
                }
            }
        }

        debug!(
            "Schema registry frozen with {} schemas and {} enumerations",
            self.schemas.len(),
            self.enums.len()
        );

        Ok(SchemaRegistry {
            schemas: self.schemas,
            enums: self.enums,
        })
    }
}

impl SchemaRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Registry holding only the built-in directives
    pub fn builtin() -> Self {
        Self {
            schemas: RegistryBuilder::new().schemas,
            enums: HashMap::new(),
        }
    }

    pub fn schema(&self, qualified: &str) -> Option<&Arc<DirectiveSchema>> {
        self.schemas.get(qualified)
    }

    pub fn enum_definition(&self, qualified: &str) -> Option<&Arc<EnumDefinition>> {
        self.enums.get(qualified)
    }

    /// Built-in directive by simple name, ignoring case
    pub fn builtin_schema(&self, simple: &str) -> Option<&Arc<DirectiveSchema>> {
        find_builtin(simple)
    }

    pub fn class(&self, qualified: &str) -> Option<RegisteredClass> {
        if let Some(schema) = self.schemas.get(qualified) {
            return Some(RegisteredClass::Schema(schema.clone()));
        }
        self.enums
            .get(qualified)
            .map(|definition| RegisteredClass::Enum(definition.clone()))
    }

    pub fn schemas(&self) -> impl Iterator<Item = &Arc<DirectiveSchema>> {
        self.schemas.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::builtin::NAME;
    use crate::definition::AttributeDefinition;

    #[test]
    fn builder_starts_with_builtins() {
        let registry = RegistryBuilder::new().build().unwrap();
        assert!(registry.schema(NAME).is_some());
        assert_eq!(registry.builtin_schema("tag").unwrap().simple_name(), "Tag");
    }

    #[test]
    fn duplicate_names_are_rejected_across_schemas_and_enums() {
        let mut builder = RegistryBuilder::new();
        builder
            .register_enum(EnumDefinition::from_names("x.Color", ["RED"]))
            .unwrap();
        let err = builder
            .register_schema(DirectiveSchema::new("x.Color", Vec::new()))
            .unwrap_err();
        assert_eq!(err, DefinitionError::DuplicateSchema("x.Color".into()));
    }

    #[test]
    fn unknown_references_fail_at_build() {
        let builder = RegistryBuilder::new()
            .with_schema(DirectiveSchema::new(
                "x.Uses",
                vec![AttributeDefinition::required("inner", AttributeKind::directive("x.Missing"))],
            ))
            .unwrap();
        assert!(matches!(builder.build(), Err(DefinitionError::UnknownReference { .. })));
    }

    #[test]
    fn classes_distinguish_schemas_from_enums() {
        let registry = RegistryBuilder::new()
            .with_enum(EnumDefinition::from_names("x.Color", ["RED"]))
            .unwrap()
            .build()
            .unwrap();
        assert!(matches!(registry.class("x.Color"), Some(RegisteredClass::Enum(_))));
        assert!(matches!(registry.class(NAME), Some(RegisteredClass::Schema(_))));
        assert!(registry.class("x.Other").is_none());
    }
}
