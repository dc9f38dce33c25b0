use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use derive_more::Display;
use crate::error::DefinitionError;
use crate::types::AttributeValue;

pub mod builtin;
pub mod enumeration;
pub mod schema;

/// Attributo che uno schema di direttiva dichiara
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeDefinition {
    pub name: Arc<str>,
    pub kind: AttributeKind,
    /// Absent when the attribute is required
    pub default_value: Option<AttributeValue>,
}

/// Scalar kinds supported by attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ScalarKind {
    #[display("String")]
    String,
    #[display("char")]
    Char,
    #[display("boolean")]
    Boolean,
    #[display("byte")]
    Byte,
    #[display("short")]
    Short,
    #[display("int")]
    Int,
    #[display("long")]
    Long,
    #[display("float")]
    Float,
    #[display("double")]
    Double,
}

/// Declared kind of an attribute
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Scalar(ScalarKind),
    Array {
        element: Box<AttributeKind>,
        nullable_elements: bool,
    },
    /// Qualified name of a registered enumeration
    Enum(Arc<str>),
    /// Qualified name of a registered directive schema
    Directive(Arc<str>),
}

impl AttributeDefinition {
    pub fn required(name: impl Into<Arc<str>>, kind: AttributeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default_value: None,
        }
    }

    pub fn optional(name: impl Into<Arc<str>>, kind: AttributeKind, default_value: impl Into<AttributeValue>) -> Self {
        Self {
            name: name.into(),
            kind,
            default_value: Some(default_value.into()),
        }
    }

    pub fn is_required(&self) -> bool {
        self.default_value.is_none()
    }
}

impl AttributeKind {
    pub const STRING: AttributeKind = AttributeKind::Scalar(ScalarKind::String);
    pub const CHAR: AttributeKind = AttributeKind::Scalar(ScalarKind::Char);
    pub const BOOLEAN: AttributeKind = AttributeKind::Scalar(ScalarKind::Boolean);
    pub const BYTE: AttributeKind = AttributeKind::Scalar(ScalarKind::Byte);
    pub const SHORT: AttributeKind = AttributeKind::Scalar(ScalarKind::Short);
    pub const INT: AttributeKind = AttributeKind::Scalar(ScalarKind::Int);
    pub const LONG: AttributeKind = AttributeKind::Scalar(ScalarKind::Long);
    pub const FLOAT: AttributeKind = AttributeKind::Scalar(ScalarKind::Float);
    pub const DOUBLE: AttributeKind = AttributeKind::Scalar(ScalarKind::Double);

    pub fn array_of(element: AttributeKind) -> Self {
        Self::Array {
            element: Box::new(element),
            nullable_elements: false,
        }
    }

    pub fn nullable_array_of(element: AttributeKind) -> Self {
        Self::Array {
            element: Box::new(element),
            nullable_elements: true,
        }
    }

    pub fn enumeration(name: impl Into<Arc<str>>) -> Self {
        Self::Enum(name.into())
    }

    pub fn directive(name: impl Into<Arc<str>>) -> Self {
        Self::Directive(name.into())
    }

    /// Whether an explicit `null` may be bound to an attribute of this kind
    pub fn accepts_null(&self) -> bool {
        match self {
            Self::Scalar(scalar) => *scalar == ScalarKind::String,
            Self::Array { .. } | Self::Enum(_) | Self::Directive(_) => true,
        }
    }

    /// Checks that a (default) value conforms to this kind
    pub fn conforms(&self, value: &AttributeValue) -> bool {
        match (self, value) {
            (kind, AttributeValue::Null) => kind.accepts_null(),
            (Self::Scalar(scalar), value) => matches!(
                (scalar, value),
                (ScalarKind::String, AttributeValue::String(_))
                    | (ScalarKind::Char, AttributeValue::Char(_))
                    | (ScalarKind::Boolean, AttributeValue::Boolean(_))
                    | (ScalarKind::Byte, AttributeValue::Byte(_))
                    | (ScalarKind::Short, AttributeValue::Short(_))
                    | (ScalarKind::Int, AttributeValue::Int(_))
                    | (ScalarKind::Long, AttributeValue::Long(_))
                    | (ScalarKind::Float, AttributeValue::Float(_))
                    | (ScalarKind::Double, AttributeValue::Double(_))
            ),
            (Self::Array { element, nullable_elements }, AttributeValue::Array(items)) => {
                items.iter().all(|item| match item {
                    AttributeValue::Null => *nullable_elements,
                    other => element.conforms(other),
                })
            }
            (Self::Enum(name), AttributeValue::Enum(constant)) => constant.is_of(name),
            (Self::Directive(name), AttributeValue::Directive(directive)) => directive.name() == name.as_ref(),
            _ => false,
        }
    }
}

/// Simple (unqualified) part of a dotted name
pub fn simple_name(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(scalar) => write!(f, "{}", scalar),
            Self::Array { element, .. } => write!(f, "{}[]", element),
            Self::Enum(name) | Self::Directive(name) => write!(f, "{}", simple_name(name)),
        }
    }
}

/// Parses kind descriptions such as `String`, `long[]`, `String?[]`,
/// `enum:a.b.SupportEnum` or `@a.b.Nested`.
impl FromStr for AttributeKind {
    type Err = DefinitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if let Some(element) = text.strip_suffix("?[]") {
            return Ok(Self::nullable_array_of(element.parse()?));
        }
        if let Some(element) = text.strip_suffix("[]") {
            return Ok(Self::array_of(element.parse()?));
        }
        if let Some(name) = text.strip_prefix("enum:") {
            return Ok(Self::enumeration(name.trim()));
        }
        if let Some(name) = text.strip_prefix('@') {
            return Ok(Self::directive(name.trim()));
        }
        let scalar = match text {
            "String" | "string" => ScalarKind::String,
            "char" => ScalarKind::Char,
            "boolean" | "bool" => ScalarKind::Boolean,
            "byte" => ScalarKind::Byte,
            "short" => ScalarKind::Short,
            "int" => ScalarKind::Int,
            "long" => ScalarKind::Long,
            "float" => ScalarKind::Float,
            "double" => ScalarKind::Double,
            _ => return Err(DefinitionError::UnknownKind(s.to_string())),
        };
        Ok(Self::Scalar(scalar))
    }
}
