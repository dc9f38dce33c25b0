use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;
use crate::ast::DirectiveLiteral;
use crate::definition::schema::DirectiveSchema;
use crate::definition::AttributeDefinition;
use crate::types::AttributeValue;

/// Directive instance bound against its schema. Values are aligned with the
/// schema's attributes, so every attribute has a value.
#[derive(Debug, Clone)]
pub struct ResolvedDirective {
    schema: Arc<DirectiveSchema>,
    values: Vec<AttributeValue>,
    source: DirectiveLiteral,
}

impl ResolvedDirective {
    pub(crate) fn new(schema: Arc<DirectiveSchema>, values: Vec<AttributeValue>, source: DirectiveLiteral) -> Self {
        debug_assert_eq!(schema.attributes().len(), values.len());
        Self { schema, values, source }
    }

    /// Qualified schema name
    pub fn name(&self) -> &str {
        self.schema.name()
    }

    pub fn simple_name(&self) -> &str {
        self.schema.simple_name()
    }

    pub fn schema(&self) -> &Arc<DirectiveSchema> {
        &self.schema
    }

    pub fn get(&self, attribute: &str) -> Option<&AttributeValue> {
        self.schema.index_of(attribute).map(|index| &self.values[index])
    }

    /// Shortcut for the `value` attribute
    pub fn value(&self) -> Option<&AttributeValue> {
        self.get("value")
    }

    /// Attributes with their bound values, in schema order
    pub fn attributes(&self) -> impl Iterator<Item = (&AttributeDefinition, &AttributeValue)> {
        self.schema.attributes().iter().zip(self.values.iter())
    }

    /// Literal this directive was resolved from
    pub fn source(&self) -> &DirectiveLiteral {
        &self.source
    }

    pub fn is_type(&self, qualified: &str) -> bool {
        self.name() == qualified
    }

    /// Hash of schema name and attribute values, stable for equal directives
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

impl PartialEq for ResolvedDirective {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name() && self.values == other.values
    }
}

impl Eq for ResolvedDirective {}

impl Hash for ResolvedDirective {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name().hash(state);
        self.values.hash(state);
    }
}

impl fmt::Display for ResolvedDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.simple_name())?;
        match self.schema.attributes() {
            [] => Ok(()),
            [only] if only.name.as_ref() == "value" => write!(f, "({})", self.values[0]),
            _ => {
                write!(f, "(")?;
                for (i, (attr, value)) in self.attributes().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}={}", attr.name, value)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Immutable directives attached to one compiled statement
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DirectiveSet {
    directives: Arc<[ResolvedDirective]>,
}

impl DirectiveSet {
    pub fn new(directives: Vec<ResolvedDirective>) -> Self {
        Self {
            directives: directives.into(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// First directive of the given schema
    pub fn find_by_type(&self, qualified: &str) -> Option<&ResolvedDirective> {
        self.directives.iter().find(|directive| directive.is_type(qualified))
    }

    pub fn find_all_by_type(&self, qualified: &str) -> Vec<&ResolvedDirective> {
        self.directives
            .iter()
            .filter(|directive| directive.is_type(qualified))
            .collect()
    }

    pub fn as_slice(&self) -> &[ResolvedDirective] {
        &self.directives
    }
}

impl Default for DirectiveSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl Deref for DirectiveSet {
    type Target = [ResolvedDirective];

    fn deref(&self) -> &Self::Target {
        &self.directives
    }
}

impl<'a> IntoIterator for &'a DirectiveSet {
    type Item = &'a ResolvedDirective;
    type IntoIter = std::slice::Iter<'a, ResolvedDirective>;

    fn into_iter(self) -> Self::IntoIter {
        self.directives.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::LiteralValue;
    use crate::definition::builtin::{find_builtin, NAME, NO_LOCK, TAG};

    fn directive(name: &str, values: Vec<AttributeValue>) -> ResolvedDirective {
        let schema = find_builtin(name).unwrap().clone();
        ResolvedDirective::new(schema, values, DirectiveLiteral::new(name))
    }

    #[test]
    fn displays_like_annotation_instances() {
        assert_eq!(directive("Name", vec!["MyTestStmt".into()]).to_string(), "@Name(\"MyTestStmt\")");
        assert_eq!(
            directive("Tag", vec!["UserId".into(), "value".into()]).to_string(),
            "@Tag(name=\"UserId\", value=\"value\")"
        );
        assert_eq!(directive("NoLock", Vec::new()).to_string(), "@NoLock");
    }

    #[test]
    fn equality_ignores_source_literal() {
        let a = directive("Name", vec!["x".into()]);
        let b = ResolvedDirective::new(
            a.schema().clone(),
            vec!["x".into()],
            DirectiveLiteral::new("name").positional(LiteralValue::from("x")),
        );
        assert_eq!(a, b);
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a, directive("Description", vec!["x".into()]));
    }

    #[test]
    fn set_finds_directives_by_type() {
        let set = DirectiveSet::new(vec![
            directive("NoLock", Vec::new()),
            directive("Tag", vec!["a".into(), "1".into()]),
            directive("Tag", vec!["b".into(), "2".into()]),
        ]);
        assert!(set.find_by_type(NO_LOCK).is_some());
        assert!(set.find_by_type(NAME).is_none());
        assert_eq!(set.find_all_by_type(TAG).len(), 2);
        assert_eq!(set.len(), 3);
        assert_eq!(set.find_by_type(TAG).unwrap().get("name"), Some(&AttributeValue::from("a")));
    }
}
