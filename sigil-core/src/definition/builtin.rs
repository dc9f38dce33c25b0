use std::sync::Arc;
use lazy_static::lazy_static;
use crate::definition::schema::DirectiveSchema;
use crate::definition::{AttributeDefinition, AttributeKind};

/// Package holding the built-in directives
pub const BUILTIN_PACKAGE: &str = "sigil.annotation";

pub const NAME: &str = "sigil.annotation.Name";
pub const DESCRIPTION: &str = "sigil.annotation.Description";
pub const TAG: &str = "sigil.annotation.Tag";
pub const HINT: &str = "sigil.annotation.Hint";
pub const NO_LOCK: &str = "sigil.annotation.NoLock";
pub const PRIORITY: &str = "sigil.annotation.Priority";
pub const DROP: &str = "sigil.annotation.Drop";
pub const AUDIT: &str = "sigil.annotation.Audit";

lazy_static! {
    /// Direttive sempre disponibili, risolte senza import
    pub static ref BUILTIN_SCHEMAS: Vec<Arc<DirectiveSchema>> = vec![
        single_string(NAME),
        single_string(DESCRIPTION),
        Arc::new(DirectiveSchema::new(
            TAG,
            vec![
                AttributeDefinition::required("name", AttributeKind::STRING),
                AttributeDefinition::required("value", AttributeKind::STRING),
            ],
        )),
        single_string(HINT),
        Arc::new(DirectiveSchema::new(NO_LOCK, Vec::new())),
        Arc::new(DirectiveSchema::new(
            PRIORITY,
            vec![AttributeDefinition::required("value", AttributeKind::INT)],
        )),
        Arc::new(DirectiveSchema::new(DROP, Vec::new())),
        Arc::new(DirectiveSchema::new(
            AUDIT,
            vec![AttributeDefinition::optional("value", AttributeKind::STRING, "*")],
        )),
    ];
}

fn single_string(name: &str) -> Arc<DirectiveSchema> {
    Arc::new(DirectiveSchema::new(
        name,
        vec![AttributeDefinition::required("value", AttributeKind::STRING)],
    ))
}

/// Built-in schema by simple name, ignoring case (`@name`, `@NAME`)
pub fn find_builtin(simple: &str) -> Option<&'static Arc<DirectiveSchema>> {
    BUILTIN_SCHEMAS
        .iter()
        .find(|schema| schema.simple_name().eq_ignore_ascii_case(simple))
}
