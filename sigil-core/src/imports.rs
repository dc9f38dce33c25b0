use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use crate::definition::schema::is_valid_name;
use crate::error::DefinitionError;

/// One import: an exact class (`a.b.MyAnnotation`) or a wildcard package (`a.b.*`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ImportEntry {
    Class(Arc<str>),
    Package(Arc<str>),
}

impl ImportEntry {
    /// Qualified name this import would give to `token`, if it applies
    pub fn candidate(&self, token: &str) -> Option<String> {
        match self {
            Self::Class(class) => {
                let simple = class.rsplit('.').next().unwrap_or(class);
                (simple == token || class.as_ref() == token).then(|| class.to_string())
            }
            Self::Package(package) => Some(format!("{}.{}", package, token)),
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Package(_))
    }
}

impl FromStr for ImportEntry {
    type Err = DefinitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let (name, wildcard) = match text.strip_suffix(".*") {
            Some(package) => (package, true),
            None => (text, false),
        };
        if !is_valid_name(name) {
            return Err(DefinitionError::InvalidImport(s.to_string()));
        }
        Ok(if wildcard {
            Self::Package(Arc::from(name))
        } else {
            Self::Class(Arc::from(name))
        })
    }
}

impl fmt::Display for ImportEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class(class) => write!(f, "{}", class),
            Self::Package(package) => write!(f, "{}.*", package),
        }
    }
}

/// General imports plus the imports used only for directive and enum resolution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportTable {
    general: Vec<ImportEntry>,
    directive_only: Vec<ImportEntry>,
}

impl ImportTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_import(&mut self, import: &str) -> Result<&mut Self, DefinitionError> {
        self.general.push(import.parse()?);
        Ok(self)
    }

    pub fn add_directive_import(&mut self, import: &str) -> Result<&mut Self, DefinitionError> {
        self.directive_only.push(import.parse()?);
        Ok(self)
    }

    /// Copy of this table with one more general import; the original is untouched
    pub fn with_import(&self, import: &str) -> Result<Self, DefinitionError> {
        let mut table = self.clone();
        table.add_import(import)?;
        Ok(table)
    }

    pub fn with_directive_import(&self, import: &str) -> Result<Self, DefinitionError> {
        let mut table = self.clone();
        table.add_directive_import(import)?;
        Ok(table)
    }

    pub fn general(&self) -> &[ImportEntry] {
        &self.general
    }

    pub fn directive_only(&self) -> &[ImportEntry] {
        &self.directive_only
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_classes_and_wildcards() {
        assert_eq!(
            "com.acme.*".parse::<ImportEntry>().unwrap(),
            ImportEntry::Package("com.acme".into())
        );
        let class: ImportEntry = "com.acme.MyAnnotation".parse().unwrap();
        assert!(!class.is_wildcard());
        assert_eq!(class.to_string(), "com.acme.MyAnnotation");
        assert!("com..acme".parse::<ImportEntry>().is_err());
        assert!("*".parse::<ImportEntry>().is_err());
    }

    #[test]
    fn candidates_follow_import_kind() {
        let class = ImportEntry::Class("a.b.Tagged".into());
        assert_eq!(class.candidate("Tagged").as_deref(), Some("a.b.Tagged"));
        assert_eq!(class.candidate("Other"), None);
        let package = ImportEntry::Package("a.b".into());
        assert_eq!(package.candidate("Other").as_deref(), Some("a.b.Other"));
    }

    #[test]
    fn with_import_leaves_original_untouched() {
        let mut base = ImportTable::new();
        base.add_import("a.b.*").unwrap();
        let extended = base.with_directive_import("c.d.Only").unwrap();
        assert!(base.directive_only().is_empty());
        assert_eq!(extended.directive_only().len(), 1);
        assert_eq!(extended.general(), base.general());
    }
}
