use std::sync::Arc;
use log::{debug, trace};
use crate::ast::{DirectiveArgs, DirectiveLiteral, LiteralValue};
use crate::definition::schema::DirectiveSchema;
use crate::definition::{AttributeDefinition, AttributeKind, ScalarKind};
use crate::directive::ResolvedDirective;
use crate::error::AnnotationError;
use crate::resolver::ClassResolver;
use crate::types::AttributeValue;

/// Binds directive literals to their schemas, converting every written value
/// to the declared attribute kind.
#[derive(Debug, Clone, Copy)]
pub struct DirectiveValidator<'a> {
    resolver: ClassResolver<'a>,
}

impl<'a> DirectiveValidator<'a> {
    pub fn new(resolver: ClassResolver<'a>) -> Self {
        Self { resolver }
    }

    pub fn validate(&self, literal: &DirectiveLiteral) -> Result<ResolvedDirective, AnnotationError> {
        // Riferimenti qualificati a enum risolti prima del binding
        literal.walk(&mut |value| match value {
            LiteralValue::Identifier(text) if text.contains('.') => {
                self.resolver.resolve_enum_reference(text).map(|_| ())
            }
            _ => Ok(()),
        })?;

        let schema = self.resolver.resolve_directive(&literal.name)?;
        let resolved = self.bind(schema, literal)?;
        debug!("Resolved directive @{} as {}", literal.name, resolved.name());
        Ok(resolved)
    }

    fn bind(&self, schema: Arc<DirectiveSchema>, literal: &DirectiveLiteral) -> Result<ResolvedDirective, AnnotationError> {
        let directive = schema.simple_name();
        let mut bound: Vec<Option<AttributeValue>> = vec![None; schema.attributes().len()];

        match &literal.args {
            DirectiveArgs::Empty => {}
            DirectiveArgs::Positional(value) => {
                let index = schema.index_of("value").ok_or_else(|| AnnotationError::NoValueAttribute {
                    directive: directive.to_string(),
                })?;
                bound[index] = Some(self.convert(directive, &schema.attributes()[index], value)?);
            }
            DirectiveArgs::Named(args) => {
                for arg in args {
                    let index = schema.index_of(&arg.name).ok_or_else(|| AnnotationError::UnknownAttribute {
                        directive: directive.to_string(),
                        attribute: arg.name.clone(),
                    })?;
                    if bound[index].is_some() {
                        return Err(AnnotationError::DuplicateAttribute {
                            directive: directive.to_string(),
                            attribute: arg.name.clone(),
                        });
                    }
                    bound[index] = Some(self.convert(directive, &schema.attributes()[index], &arg.value)?);
                }
            }
        }

        let mut values = Vec::with_capacity(bound.len());
        for (attr, value) in schema.attributes().iter().zip(bound) {
            let value = match (value, &attr.default_value) {
                (Some(value), _) => value,
                (None, Some(default)) => {
                    trace!("@{}: attribute '{}' takes its default", directive, attr.name);
                    default.clone()
                }
                (None, None) => {
                    return Err(AnnotationError::MissingAttribute {
                        directive: directive.to_string(),
                        attribute: attr.name.to_string(),
                    });
                }
            };
            values.push(value);
        }

        Ok(ResolvedDirective::new(schema.clone(), values, literal.clone()))
    }

    fn convert(&self, directive: &str, attr: &AttributeDefinition, literal: &LiteralValue) -> Result<AttributeValue, AnnotationError> {
        let mismatch = || AnnotationError::TypeMismatch {
            directive: directive.to_string(),
            attribute: attr.name.to_string(),
            expected: attr.kind.to_string(),
            received: literal.kind_name().to_string(),
        };

        match (&attr.kind, literal) {
            (kind, LiteralValue::Null) => {
                if kind.accepts_null() {
                    Ok(AttributeValue::Null)
                } else {
                    Err(AnnotationError::NullValue {
                        directive: directive.to_string(),
                        attribute: attr.name.to_string(),
                    })
                }
            }
            (AttributeKind::Scalar(scalar), value) => convert_scalar(*scalar, value).ok_or_else(mismatch),
            (AttributeKind::Array { element, nullable_elements }, LiteralValue::Array(items)) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    values.push(self.convert_element(directive, attr, element, *nullable_elements, item)?);
                }
                Ok(AttributeValue::Array(values))
            }
            (AttributeKind::Enum(enum_name), LiteralValue::Identifier(text)) => {
                self.convert_enum(enum_name, text)?.ok_or_else(mismatch)
            }
            (AttributeKind::Directive(expected), LiteralValue::Directive(nested)) => {
                self.convert_nested(expected, nested)?.ok_or_else(mismatch)
            }
            _ => Err(mismatch()),
        }
    }

    fn convert_element(
        &self,
        directive: &str,
        attr: &AttributeDefinition,
        element: &AttributeKind,
        nullable: bool,
        item: &LiteralValue,
    ) -> Result<AttributeValue, AnnotationError> {
        let mismatch = || AnnotationError::ElementTypeMismatch {
            directive: directive.to_string(),
            attribute: attr.name.to_string(),
            expected: element.to_string(),
            received: item.kind_name().to_string(),
        };

        match (element, item) {
            (_, LiteralValue::Null) if nullable => Ok(AttributeValue::Null),
            (_, LiteralValue::Null) => Err(AnnotationError::NullElement {
                directive: directive.to_string(),
                attribute: attr.name.to_string(),
            }),
            (AttributeKind::Scalar(scalar), value) => convert_scalar(*scalar, value).ok_or_else(mismatch),
            (AttributeKind::Enum(enum_name), LiteralValue::Identifier(text)) => {
                self.convert_enum(enum_name, text)?.ok_or_else(mismatch)
            }
            (AttributeKind::Directive(expected), LiteralValue::Directive(nested)) => {
                self.convert_nested(expected, nested)?.ok_or_else(mismatch)
            }
            _ => Err(mismatch()),
        }
    }

    /// Nested directives re-enter binding; `None` when the literal names another schema
    fn convert_nested(&self, expected: &str, nested: &DirectiveLiteral) -> Result<Option<AttributeValue>, AnnotationError> {
        let schema = self.resolver.resolve_directive(&nested.name)?;
        if schema.name() != expected {
            return Ok(None);
        }
        Ok(Some(AttributeValue::Directive(Box::new(self.bind(schema, nested)?))))
    }

    /// `None` when the identifier resolves to a constant of another enumeration
    fn convert_enum(&self, enum_name: &str, text: &str) -> Result<Option<AttributeValue>, AnnotationError> {
        let constant = if text.contains('.') {
            self.resolver.resolve_enum_reference(text)?
        } else {
            self.resolver.resolve_enum_constant(enum_name, text)?
        };
        Ok(constant.is_of(enum_name).then_some(AttributeValue::Enum(constant)))
    }
}

/// Exact literal-kind match; integers are range-checked, never widened to floating kinds
fn convert_scalar(kind: ScalarKind, literal: &LiteralValue) -> Option<AttributeValue> {
    match (kind, literal) {
        (ScalarKind::String, LiteralValue::String(s)) => Some(AttributeValue::String(s.clone())),
        (ScalarKind::Char, LiteralValue::String(s)) => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(AttributeValue::Char(c)),
                _ => None,
            }
        }
        (ScalarKind::Boolean, LiteralValue::Boolean(b)) => Some(AttributeValue::Boolean(*b)),
        (ScalarKind::Byte, LiteralValue::Integer(v)) => i8::try_from(*v).ok().map(AttributeValue::Byte),
        (ScalarKind::Short, LiteralValue::Integer(v)) => i16::try_from(*v).ok().map(AttributeValue::Short),
        (ScalarKind::Int, LiteralValue::Integer(v)) => i32::try_from(*v).ok().map(AttributeValue::Int),
        (ScalarKind::Long, LiteralValue::Integer(v)) => Some(AttributeValue::Long(*v)),
        (ScalarKind::Float, LiteralValue::Decimal(v)) if v.abs() <= f64::from(f32::MAX) => {
            Some(AttributeValue::Float(*v as f32))
        }
        (ScalarKind::Double, LiteralValue::Decimal(v)) => Some(AttributeValue::Double(*v)),
        _ => None,
    }
}
