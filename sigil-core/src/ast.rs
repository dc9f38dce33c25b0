use crate::types::Position;

/// Literal value as written inside a directive
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    String(String),
    Integer(i64),
    Decimal(f64),
    Boolean(bool),
    Null,
    Array(Vec<LiteralValue>),
    Directive(DirectiveLiteral),
    /// Bare or dotted identifier, resolved as an enumeration constant
    Identifier(String),
}

/// Named argument of a directive (`name=value`)
#[derive(Debug, Clone, PartialEq)]
pub struct NamedArg {
    pub name: String,
    pub value: LiteralValue,
    pub position: Position,
}

/// Arguments of a directive literal: nothing, one positional value or named pairs
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DirectiveArgs {
    #[default]
    Empty,
    Positional(Box<LiteralValue>),
    Named(Vec<NamedArg>),
}

/// Directive literal (e.g. `@Name('x')`, `@Tag(name='a', value='b')`)
#[derive(Debug, Clone, PartialEq)]
pub struct DirectiveLiteral {
    pub name: String,
    pub args: DirectiveArgs,
    pub position: Position,
}

/// A statement split into its directive prefix and the remaining body
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedStatement {
    pub directives: Vec<DirectiveLiteral>,
    /// Statement text without annotations
    pub body: String,
}

impl LiteralValue {
    /// Kind name used in type mismatch messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::String(_) => "String",
            Self::Integer(v) if i32::try_from(*v).is_ok() => "Integer",
            Self::Integer(_) => "Long",
            Self::Decimal(_) => "Double",
            Self::Boolean(_) => "Boolean",
            Self::Null => "null",
            Self::Array(_) => "array",
            Self::Directive(_) => "annotation",
            Self::Identifier(_) => "identifier",
        }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    pub fn identifier(value: impl Into<String>) -> Self {
        Self::Identifier(value.into())
    }

    pub fn array(values: impl IntoIterator<Item = LiteralValue>) -> Self {
        Self::Array(values.into_iter().collect())
    }

    /// Visit this literal and every literal nested inside it
    pub fn walk<E>(&self, visit: &mut impl FnMut(&LiteralValue) -> Result<(), E>) -> Result<(), E> {
        visit(self)?;
        match self {
            Self::Array(items) => items.iter().try_for_each(|item| item.walk(&mut *visit)),
            Self::Directive(directive) => directive.walk(&mut *visit),
            _ => Ok(()),
        }
    }
}

impl DirectiveLiteral {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: DirectiveArgs::Empty,
            position: Position::default(),
        }
    }

    /// Single unnamed value
    pub fn positional(mut self, value: LiteralValue) -> Self {
        self.args = DirectiveArgs::Positional(Box::new(value));
        self
    }

    /// Appends a `name=value` pair (switches positional arguments to named ones)
    pub fn named(mut self, name: impl Into<String>, value: LiteralValue) -> Self {
        let arg = NamedArg {
            name: name.into(),
            value,
            position: Position::default(),
        };
        match &mut self.args {
            DirectiveArgs::Named(args) => args.push(arg),
            _ => self.args = DirectiveArgs::Named(vec![arg]),
        }
        self
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Visit every literal value written in this directive, nested ones included
    pub fn walk<E>(&self, visit: &mut impl FnMut(&LiteralValue) -> Result<(), E>) -> Result<(), E> {
        match &self.args {
            DirectiveArgs::Empty => Ok(()),
            DirectiveArgs::Positional(value) => value.walk(&mut *visit),
            DirectiveArgs::Named(args) => args.iter().try_for_each(|arg| arg.value.walk(&mut *visit)),
        }
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Decimal(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<DirectiveLiteral> for LiteralValue {
    fn from(value: DirectiveLiteral) -> Self {
        Self::Directive(value)
    }
}
