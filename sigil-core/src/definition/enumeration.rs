use std::collections::HashSet;
use std::sync::Arc;
use crate::definition::schema::is_valid_name;
use crate::definition::simple_name;
use crate::error::DefinitionError;
use crate::types::EnumConstant;

/// Enumeration type usable as attribute kind: ordered `(constant, value)` pairs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDefinition {
    name: Arc<str>,
    constants: Vec<(Arc<str>, Arc<str>)>,
}

impl EnumDefinition {
    pub fn new<N, V>(name: impl Into<Arc<str>>, constants: impl IntoIterator<Item = (N, V)>) -> Self
    where
        N: Into<Arc<str>>,
        V: Into<Arc<str>>,
    {
        Self {
            name: name.into(),
            constants: constants
                .into_iter()
                .map(|(constant, value)| (constant.into(), value.into()))
                .collect(),
        }
    }

    /// Constants whose opaque value is their own name
    pub fn from_names<N: AsRef<str>>(name: impl Into<Arc<str>>, names: impl IntoIterator<Item = N>) -> Self {
        Self::new(
            name,
            names.into_iter().map(|n| {
                let constant: Arc<str> = Arc::from(n.as_ref());
                (constant.clone(), constant)
            }),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn simple_name(&self) -> &str {
        simple_name(&self.name)
    }

    pub fn constant_names(&self) -> impl Iterator<Item = &str> {
        self.constants.iter().map(|(name, _)| name.as_ref())
    }

    /// Exact, case-sensitive lookup
    pub fn constant(&self, name: &str) -> Option<EnumConstant> {
        self.constants
            .iter()
            .find(|(constant, _)| constant.as_ref() == name)
            .map(|(constant, value)| self.make_constant(constant, value))
    }

    /// Lookup used when resolving identifiers written in a statement
    pub fn find_ignore_case(&self, name: &str) -> Option<EnumConstant> {
        self.constants
            .iter()
            .find(|(constant, _)| constant.eq_ignore_ascii_case(name))
            .map(|(constant, value)| self.make_constant(constant, value))
    }

    pub fn validate_definition(&self) -> Result<(), DefinitionError> {
        if !is_valid_name(&self.name) {
            return Err(DefinitionError::InvalidName(self.name.to_string()));
        }
        let mut seen = HashSet::new();
        for (constant, _) in &self.constants {
            if !is_valid_name(constant) || constant.contains('.') {
                return Err(DefinitionError::InvalidName(constant.to_string()));
            }
            if !seen.insert(constant.to_ascii_uppercase()) {
                return Err(DefinitionError::DuplicateEnumConstant {
                    enum_name: self.name.to_string(),
                    constant: constant.to_string(),
                });
            }
        }
        Ok(())
    }

    fn make_constant(&self, constant: &Arc<str>, value: &Arc<str>) -> EnumConstant {
        EnumConstant {
            enum_name: self.name.clone(),
            name: constant.clone(),
            value: value.clone(),
        }
    }
}
