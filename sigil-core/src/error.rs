use std::fmt;
use thiserror::Error;
use crate::types::Position;

/// Prefix carried by every semantic annotation error except enumeration failures.
pub const ANNOTATION_ERROR_PREFIX: &str = "Failed to process statement annotations: ";

/// Main error type returned to the statement compiler
#[derive(Debug, Clone, PartialEq)]
pub enum SigilError {
    /// Malformed directive token stream, detected before any schema lookup
    Syntax {
        error: SyntaxError,
        statement: String,
    },

    /// Resolution and validation failures
    Semantic {
        error: AnnotationError,
        statement: String,
    },

    /// Registry/import construction errors (configuration time)
    Definition(DefinitionError),
}

/// Errors raised while reading the `@...` prefix of a statement
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyntaxError {
    #[error("Incorrect syntax near '{near}' at {position} (expecting {expected})")]
    UnexpectedToken {
        near: String,
        expected: String,
        position: Position,
    },

    #[error("Incorrect syntax near end of input (expecting {expected})")]
    UnexpectedEnd { expected: String },

    #[error("Incorrect syntax near '{near}' at {position} (invalid or unterminated token)")]
    InvalidToken { near: String, position: Position },

    #[error("Incorrect syntax near '{near}' at {position} (nesting deeper than {max} levels)")]
    NestingTooDeep {
        near: String,
        max: usize,
        position: Position,
    },
}

/// Semantic errors produced from resolution onward
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnnotationError {
    #[error("Failed to resolve @-annotation class: Could not load annotation class by name '{name}', please check imports")]
    UnresolvedDirective { name: String },

    #[error("Annotation '{directive}' does not have an attribute 'value'")]
    NoValueAttribute { directive: String },

    #[error("Annotation '{directive}' does not have an attribute '{attribute}'")]
    UnknownAttribute { directive: String, attribute: String },

    #[error("Annotation '{directive}' has duplicate attribute values for attribute '{attribute}'")]
    DuplicateAttribute { directive: String, attribute: String },

    #[error("Annotation '{directive}' requires a value for attribute '{attribute}'")]
    MissingAttribute { directive: String, attribute: String },

    #[error("Annotation '{directive}' requires a {expected}-typed value for attribute '{attribute}' but received a {received}-typed value")]
    TypeMismatch {
        directive: String,
        attribute: String,
        expected: String,
        received: String,
    },

    #[error("Annotation '{directive}' requires a {expected}-typed value for array elements for attribute '{attribute}' but received a {received}-typed value")]
    ElementTypeMismatch {
        directive: String,
        attribute: String,
        expected: String,
        received: String,
    },

    #[error("Annotation '{directive}' requires a non-null value for array elements for attribute '{attribute}'")]
    NullElement { directive: String, attribute: String },

    #[error("Annotation '{directive}' requires a non-null value for attribute '{attribute}'")]
    NullValue { directive: String, attribute: String },

    #[error("Annotation enumeration value '{value}' not recognized as an enumeration class, please check imports or type used")]
    EnumNotRecognized { value: String },

    #[error("Annotation enumeration value '{value}' refers to class '{class}' which is not an enumeration class, please check imports or type used")]
    NotAnEnumeration { value: String, class: String },

    /// Failure reported by a post-validation check (e.g. hint payloads)
    #[error("{message}")]
    Check { directive: String, message: String },
}

/// Errors raised while building the schema registry or import tables
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DefinitionError {
    #[error("Invalid name '{0}'")]
    InvalidName(String),

    #[error("Invalid import '{0}'")]
    InvalidImport(String),

    #[error("Directive schema '{0}' is already registered")]
    DuplicateSchema(String),

    #[error("Enumeration '{0}' is already registered")]
    DuplicateEnum(String),

    #[error("Enumeration '{enum_name}' declares constant '{constant}' more than once")]
    DuplicateEnumConstant { enum_name: String, constant: String },

    #[error("Directive schema '{schema}' declares attribute '{attribute}' more than once")]
    DuplicateAttribute { schema: String, attribute: String },

    #[error("Unknown attribute kind '{0}'")]
    UnknownKind(String),

    #[error("Attribute '{attribute}' of '{schema}' cannot be an array of arrays")]
    NestedArray { schema: String, attribute: String },

    #[error("Default value of attribute '{attribute}' of '{schema}' is not a {expected} value")]
    DefaultMismatch {
        schema: String,
        attribute: String,
        expected: String,
    },

    #[error("Attribute '{attribute}' of '{schema}' references unregistered type '{target}'")]
    UnknownReference {
        schema: String,
        attribute: String,
        target: String,
    },
}

/// Result type alias for statement-level operations
pub type SigilResult<T> = Result<T, SigilError>;

impl SigilError {
    /// Create a syntax error for the given statement text
    pub fn syntax(error: SyntaxError, statement: impl Into<String>) -> Self {
        Self::Syntax {
            error,
            statement: statement.into(),
        }
    }

    /// Create a semantic error for the given statement text
    pub fn semantic(error: AnnotationError, statement: impl Into<String>) -> Self {
        Self::Semantic {
            error,
            statement: statement.into(),
        }
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, Self::Syntax { .. })
    }

    pub fn annotation_error(&self) -> Option<&AnnotationError> {
        match self {
            Self::Semantic { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Original statement text, when the error belongs to a statement
    pub fn statement(&self) -> Option<&str> {
        match self {
            Self::Syntax { statement, .. } | Self::Semantic { statement, .. } => Some(statement),
            Self::Definition(_) => None,
        }
    }
}

impl AnnotationError {
    /// Enumeration failures carry their own prefix instead of the generic one
    pub fn is_enum_resolution(&self) -> bool {
        matches!(self, Self::EnumNotRecognized { .. } | Self::NotAnEnumeration { .. })
    }

    pub fn prefix(&self) -> &'static str {
        if self.is_enum_resolution() {
            ""
        } else {
            ANNOTATION_ERROR_PREFIX
        }
    }
}

impl fmt::Display for SigilError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax { error, statement } => write!(f, "{} [{}]", error, statement),
            Self::Semantic { error, statement } => {
                write!(f, "{}{} [{}]", error.prefix(), error, statement)
            }
            Self::Definition(error) => write!(f, "{}", error),
        }
    }
}

impl std::error::Error for SigilError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Syntax { error, .. } => Some(error),
            Self::Semantic { error, .. } => Some(error),
            Self::Definition(error) => Some(error),
        }
    }
}

impl From<DefinitionError> for SigilError {
    fn from(error: DefinitionError) -> Self {
        Self::Definition(error)
    }
}
