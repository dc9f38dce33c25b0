use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use derive_more::Display;
use smart_default::SmartDefault;
use crate::directive::ResolvedDirective;

/// Position information for error reporting
#[derive(Debug, Clone, PartialEq, Eq, Display, SmartDefault)]
#[display("{line}:{column}")]
pub struct Position {
    #[default = 1]
    pub line: usize,
    #[default = 1]
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Line/column (1-based) of a byte offset inside `source`
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let offset = offset.min(source.len());
        let before = &source[..offset];
        let line = before.matches('\n').count() + 1;
        let column = match before.rfind('\n') {
            Some(newline) => before[newline + 1..].chars().count() + 1,
            None => before.chars().count() + 1,
        };
        Self { line, column }
    }
}

/// A constant of a registered enumeration type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumConstant {
    /// Qualified name of the enumeration type
    pub enum_name: Arc<str>,
    pub name: Arc<str>,
    /// Opaque value registered for the constant
    pub value: Arc<str>,
}

impl EnumConstant {
    pub fn is_of(&self, enum_name: &str) -> bool {
        self.enum_name.as_ref() == enum_name
    }
}

/// Resolved value of a directive attribute
#[derive(Debug, Clone)]
pub enum AttributeValue {
    String(String),
    Char(char),
    Boolean(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Array(Vec<AttributeValue>),
    Directive(Box<ResolvedDirective>),
    Enum(EnumConstant),
    Null,
}

impl AttributeValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "String",
            Self::Char(_) => "char",
            Self::Boolean(_) => "boolean",
            Self::Byte(_) => "byte",
            Self::Short(_) => "short",
            Self::Int(_) => "int",
            Self::Long(_) => "long",
            Self::Float(_) => "float",
            Self::Double(_) => "double",
            Self::Array(_) => "array",
            Self::Directive(_) => "annotation",
            Self::Enum(_) => "enum",
            Self::Null => "null",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            Self::Char(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Any integral value, widened to `i64`
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Byte(v) => Some(i64::from(*v)),
            Self::Short(v) => Some(i64::from(*v)),
            Self::Int(v) => Some(i64::from(*v)),
            Self::Long(v) => Some(*v),
            _ => None,
        }
    }

    /// Any floating value, widened to `f64`
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(f64::from(*v)),
            Self::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[AttributeValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_directive(&self) -> Option<&ResolvedDirective> {
        match self {
            Self::Directive(directive) => Some(directive),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumConstant> {
        match self {
            Self::Enum(constant) => Some(constant),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

// Floating values compare and hash by bit pattern so that Eq and Hash agree.
impl PartialEq for AttributeValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Char(a), Self::Char(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Byte(a), Self::Byte(b)) => a == b,
            (Self::Short(a), Self::Short(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Long(a), Self::Long(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Double(a), Self::Double(b)) => a.to_bits() == b.to_bits(),
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Directive(a), Self::Directive(b)) => a == b,
            (Self::Enum(a), Self::Enum(b)) => a == b,
            (Self::Null, Self::Null) => true,
            _ => false,
        }
    }
}

impl Eq for AttributeValue {}

impl Hash for AttributeValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::String(v) => v.hash(state),
            Self::Char(v) => v.hash(state),
            Self::Boolean(v) => v.hash(state),
            Self::Byte(v) => v.hash(state),
            Self::Short(v) => v.hash(state),
            Self::Int(v) => v.hash(state),
            Self::Long(v) => v.hash(state),
            Self::Float(v) => v.to_bits().hash(state),
            Self::Double(v) => v.to_bits().hash(state),
            Self::Array(items) => items.hash(state),
            Self::Directive(directive) => directive.hash(state),
            Self::Enum(constant) => constant.hash(state),
            Self::Null => {}
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(v) => write!(f, "{:?}", v),
            Self::Char(v) => write!(f, "'{}'", v),
            Self::Boolean(v) => write!(f, "{}", v),
            Self::Byte(v) => write!(f, "{}", v),
            Self::Short(v) => write!(f, "{}", v),
            Self::Int(v) => write!(f, "{}", v),
            Self::Long(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{:?}", v),
            Self::Double(v) => write!(f, "{:?}", v),
            Self::Array(items) => {
                write!(f, "{{")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "}}")
            }
            Self::Directive(directive) => write!(f, "{}", directive),
            Self::Enum(constant) => write!(f, "{}", constant.name),
            Self::Null => write!(f, "null"),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Long(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl<T: Into<AttributeValue>> From<Vec<T>> for AttributeValue {
    fn from(values: Vec<T>) -> Self {
        Self::Array(values.into_iter().map(Into::into).collect())
    }
}
