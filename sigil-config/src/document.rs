use std::fs;
use std::path::Path;
use std::sync::Arc;
use log::debug;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sigil_core::{
    AnnotationCompiler, AttributeDefinition, AttributeKind, AttributeValue, DirectiveSchema, EnumDefinition,
    ImportTable, RegistryBuilder, ScalarKind, SchemaRegistry,
};
use crate::error::ConfigError;

/// Configurazione completa: import, enumerazioni e schemi utente
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SigilConfig {
    /// General imports, e.g. `com.example.anno.*`
    pub imports: Vec<String>,
    /// Imports consulted only when resolving directive names
    pub annotation_imports: Vec<String>,
    pub enums: Vec<EnumConfig>,
    pub schemas: Vec<SchemaConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumConfig {
    pub name: String,
    pub constants: Vec<EnumConstantConfig>,
}

/// A bare constant name, or a name with its own opaque value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnumConstantConfig {
    Name(String),
    Valued { name: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaConfig {
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<AttributeConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeConfig {
    pub name: String,
    /// Kind description: `int`, `long[]`, `String?[]`, `enum:pkg.Type`, `@pkg.Directive`
    pub kind: String,
    /// Missing means required; an explicit `null` is a null default
    #[serde(default, deserialize_with = "explicit_value", skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

// Distingue `"default": null` da un campo assente
fn explicit_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

/// Frozen registry and imports produced from a [`SigilConfig`]
#[derive(Debug, Clone)]
pub struct ConfiguredEnvironment {
    pub registry: Arc<SchemaRegistry>,
    pub imports: Arc<ImportTable>,
}

impl ConfiguredEnvironment {
    /// Compiler over this environment; `Hint` payloads are validated at compile time
    pub fn compiler(&self) -> AnnotationCompiler {
        sigil_hints::install(AnnotationCompiler::new(self.registry.clone(), self.imports.clone()))
    }
}

impl SigilConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded configuration from {}", path.display());
        Self::from_json_str(&json)
    }

    /// Validates the document and freezes it into a registry and import table.
    ///
    /// Enumerations are registered before schemas so enum defaults can be resolved.
    pub fn build(&self) -> Result<ConfiguredEnvironment, ConfigError> {
        let mut builder = SchemaRegistry::builder();
        for config in &self.enums {
            builder.register_enum(config.to_definition())?;
        }
        for config in &self.schemas {
            let schema = config.to_schema(&builder)?;
            builder.register_schema(schema)?;
        }
        let registry = builder.build()?;

        let mut imports = ImportTable::new();
        for import in &self.imports {
            imports.add_import(import)?;
        }
        for import in &self.annotation_imports {
            imports.add_directive_import(import)?;
        }

        debug!(
            "Configuration built: {} schemas, {} enumerations, {} imports",
            self.schemas.len(),
            self.enums.len(),
            self.imports.len() + self.annotation_imports.len()
        );
        Ok(ConfiguredEnvironment {
            registry: Arc::new(registry),
            imports: Arc::new(imports),
        })
    }
}

impl EnumConfig {
    pub fn to_definition(&self) -> EnumDefinition {
        EnumDefinition::new(
            self.name.as_str(),
            self.constants.iter().map(|constant| match constant {
                EnumConstantConfig::Name(name) => (name.as_str(), name.as_str()),
                EnumConstantConfig::Valued { name, value } => (name.as_str(), value.as_str()),
            }),
        )
    }
}

impl SchemaConfig {
    /// Builds the schema; enum defaults are looked up in `builder`
    pub fn to_schema(&self, builder: &RegistryBuilder) -> Result<DirectiveSchema, ConfigError> {
        let attributes = self
            .attributes
            .iter()
            .map(|attr| -> Result<AttributeDefinition, ConfigError> {
                let kind: AttributeKind = attr.kind.parse()?;
                Ok(match &attr.default {
                    None => AttributeDefinition::required(attr.name.as_str(), kind),
                    Some(json) => {
                        let value = DefaultReader { schema: &self.name, attribute: &attr.name, builder }.read(&kind, json)?;
                        AttributeDefinition::optional(attr.name.as_str(), kind, value)
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(DirectiveSchema::new(self.name.as_str(), attributes))
    }
}

/// Converte i default JSON nel tipo dichiarato dall'attributo
struct DefaultReader<'a> {
    schema: &'a str,
    attribute: &'a str,
    builder: &'a RegistryBuilder,
}

impl DefaultReader<'_> {
    fn read(&self, kind: &AttributeKind, json: &Value) -> Result<AttributeValue, ConfigError> {
        if json.is_null() {
            // kinds that reject null are reported by the registry
            return Ok(AttributeValue::Null);
        }
        let value = match kind {
            AttributeKind::Scalar(scalar) => read_scalar(*scalar, json),
            AttributeKind::Array { element, .. } => match json.as_array() {
                Some(items) => Some(AttributeValue::Array(
                    items
                        .iter()
                        .map(|item| self.read(element, item))
                        .collect::<Result<_, _>>()?,
                )),
                None => None,
            },
            AttributeKind::Enum(enum_name) => json.as_str().and_then(|constant| {
                self.builder
                    .enum_definition(enum_name)
                    .and_then(|definition| definition.constant(constant))
                    .map(AttributeValue::Enum)
            }),
            // nested directive defaults cannot be written in configuration
            AttributeKind::Directive(_) => None,
        };
        value.ok_or_else(|| ConfigError::invalid_default(self.schema, self.attribute, kind, json))
    }
}

fn read_scalar(scalar: ScalarKind, json: &Value) -> Option<AttributeValue> {
    match scalar {
        ScalarKind::String => json.as_str().map(AttributeValue::from),
        ScalarKind::Char => {
            let mut chars = json.as_str()?.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(AttributeValue::Char(c)),
                _ => None,
            }
        }
        ScalarKind::Boolean => json.as_bool().map(AttributeValue::Boolean),
        ScalarKind::Byte => json.as_i64().and_then(|n| i8::try_from(n).ok()).map(AttributeValue::Byte),
        ScalarKind::Short => json.as_i64().and_then(|n| i16::try_from(n).ok()).map(AttributeValue::Short),
        ScalarKind::Int => json.as_i64().and_then(|n| i32::try_from(n).ok()).map(AttributeValue::Int),
        ScalarKind::Long => json.as_i64().map(AttributeValue::Long),
        ScalarKind::Float => json.as_f64().map(|n| AttributeValue::Float(n as f32)),
        ScalarKind::Double => json.as_f64().map(AttributeValue::Double),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reader_for(builder: &RegistryBuilder) -> DefaultReader<'_> {
        DefaultReader {
            schema: "x.Schema",
            attribute: "attr",
            builder,
        }
    }

    #[test]
    fn scalar_defaults_follow_the_declared_kind() {
        let builder = RegistryBuilder::new();
        let reader = reader_for(&builder);
        assert_eq!(reader.read(&AttributeKind::SHORT, &json!(-3)).unwrap(), AttributeValue::Short(-3));
        assert_eq!(reader.read(&AttributeKind::CHAR, &json!("x")).unwrap(), AttributeValue::Char('x'));
        assert_eq!(reader.read(&AttributeKind::DOUBLE, &json!(2)).unwrap(), AttributeValue::Double(2.0));
        assert_eq!(reader.read(&AttributeKind::STRING, &Value::Null).unwrap(), AttributeValue::Null);
        assert!(reader.read(&AttributeKind::BYTE, &json!(300)).is_err());
        assert!(reader.read(&AttributeKind::CHAR, &json!("xy")).is_err());
        assert!(reader.read(&AttributeKind::INT, &json!("5")).is_err());
    }

    #[test]
    fn array_and_enum_defaults() {
        let builder = RegistryBuilder::new()
            .with_enum(EnumDefinition::from_names("x.Level", ["LOW", "HIGH"]))
            .unwrap();
        let reader = reader_for(&builder);

        let array = reader.read(&AttributeKind::array_of(AttributeKind::INT), &json!([1, 2])).unwrap();
        assert_eq!(array, AttributeValue::Array(vec![AttributeValue::Int(1), AttributeValue::Int(2)]));

        let level = reader.read(&AttributeKind::enumeration("x.Level"), &json!("HIGH")).unwrap();
        assert_eq!(level.as_enum().unwrap().name.as_ref(), "HIGH");

        let err = reader.read(&AttributeKind::enumeration("x.Level"), &json!("MEDIUM")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Default value \"MEDIUM\" of attribute 'attr' of 'x.Schema' cannot be read as Level"
        );
    }

    #[test]
    fn explicit_null_default_differs_from_missing() {
        let attrs: Vec<AttributeConfig> = serde_json::from_value(json!([
            { "name": "a", "kind": "String" },
            { "name": "b", "kind": "String", "default": null }
        ]))
        .unwrap();
        assert_eq!(attrs[0].default, None);
        assert_eq!(attrs[1].default, Some(Value::Null));
    }
}
