//! Reads the `@...` directive prefix of a statement into directive literals.
//!
//! Reading stops at the first token that cannot start a directive; everything
//! from there on is returned untouched as the statement body.

use crate::ast::{AnnotatedStatement, DirectiveArgs, DirectiveLiteral, LiteralValue, NamedArg};
use crate::error::SyntaxError;
use crate::types::Position;

pub mod lexer;

use lexer::{Lexer, SpannedToken, Token};

/// Deepest allowed chain of nested directives and arrays
pub const MAX_NESTING: usize = 64;

/// Splits `source` into its directive literals and the remaining body
pub fn read_statement(source: &str) -> Result<AnnotatedStatement, SyntaxError> {
    let mut reader = DirectiveReader::new(source);
    let directives = reader.read_directives()?;
    let body = reader.remaining().to_string();
    Ok(AnnotatedStatement { directives, body })
}

/// Parses a single directive literal, e.g. `@Name('x')`; trailing text is rejected
pub fn read_directive(source: &str) -> Result<DirectiveLiteral, SyntaxError> {
    let mut reader = DirectiveReader::new(source);
    let directive = reader.parse_directive()?;
    match reader.lexer.next() {
        None => Ok(directive),
        Some(token) => Err(reader.unexpected(&token, "end of directive")),
    }
}

struct DirectiveReader<'s> {
    lexer: Lexer<'s>,
    depth: usize,
}

impl<'s> DirectiveReader<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            lexer: Lexer::new(source),
            depth: 0,
        }
    }

    fn source(&self) -> &'s str {
        self.lexer.source()
    }

    fn read_directives(&mut self) -> Result<Vec<DirectiveLiteral>, SyntaxError> {
        let mut directives = Vec::new();
        while matches!(self.lexer.peek(), Some(SpannedToken { token: Token::At, .. })) {
            directives.push(self.parse_directive()?);
        }
        Ok(directives)
    }

    /// Text starting at the next unread token
    fn remaining(&mut self) -> &'s str {
        let source = self.source();
        match self.lexer.peek() {
            Some(token) => &source[token.start..],
            None => "",
        }
    }

    fn position(&self, offset: usize) -> Position {
        Position::from_offset(self.source(), offset)
    }

    fn unexpected(&self, token: &SpannedToken, expected: &str) -> SyntaxError {
        let near = &self.source()[token.start..token.end];
        match token.token {
            Token::Invalid => SyntaxError::InvalidToken {
                near: near.to_string(),
                position: self.position(token.start),
            },
            _ => SyntaxError::UnexpectedToken {
                near: near.to_string(),
                expected: expected.to_string(),
                position: self.position(token.start),
            },
        }
    }

    fn next_or_end(&mut self, expected: &str) -> Result<SpannedToken, SyntaxError> {
        self.lexer.next().ok_or_else(|| SyntaxError::UnexpectedEnd {
            expected: expected.to_string(),
        })
    }

    fn expect(&mut self, expected: Token, description: &str) -> Result<SpannedToken, SyntaxError> {
        let token = self.next_or_end(description)?;
        if token.token == expected {
            Ok(token)
        } else {
            Err(self.unexpected(&token, description))
        }
    }

    fn peek_is(&mut self, token: &Token) -> bool {
        self.lexer.peek().is_some_and(|next| &next.token == token)
    }

    fn parse_directive(&mut self) -> Result<DirectiveLiteral, SyntaxError> {
        let at = self.expect(Token::At, "'@'")?;
        let name_token = self.next_or_end("directive name")?;
        let Token::Identifier(name) = &name_token.token else {
            return Err(self.unexpected(&name_token, "directive name"));
        };

        let mut directive = DirectiveLiteral::new(name.clone()).at(self.position(at.start));
        if !self.peek_is(&Token::LParen) {
            return Ok(directive);
        }
        self.lexer.next();

        if self.peek_is(&Token::RParen) {
            self.lexer.next();
            return Ok(directive);
        }

        let first_start = self.lexer.peek().map(|t| t.start).unwrap_or_default();
        let first = self.parse_value()?;
        directive.args = match first {
            LiteralValue::Identifier(name) if self.peek_is(&Token::Eq) => {
                if name.contains('.') {
                    let eq = self.next_or_end("'='")?;
                    return Err(self.unexpected(&eq, "')'"));
                }
                DirectiveArgs::Named(self.parse_named_args(name, first_start)?)
            }
            value => {
                self.expect(Token::RParen, "')'")?;
                DirectiveArgs::Positional(Box::new(value))
            }
        };
        Ok(directive)
    }

    /// `name=value {, name=value} )`, the first name already consumed
    fn parse_named_args(&mut self, first: String, first_start: usize) -> Result<Vec<NamedArg>, SyntaxError> {
        let mut args = Vec::new();
        let (mut name, mut start) = (first, first_start);
        loop {
            self.expect(Token::Eq, "'='")?;
            let value = self.parse_value()?;
            args.push(NamedArg {
                name,
                value,
                position: self.position(start),
            });

            let separator = self.next_or_end("',' or ')'")?;
            match separator.token {
                Token::RParen => return Ok(args),
                Token::Comma => {
                    let token = self.next_or_end("attribute name")?;
                    match token.token {
                        Token::Identifier(id) if !id.contains('.') => {
                            name = id;
                            start = token.start;
                        }
                        _ => return Err(self.unexpected(&token, "attribute name")),
                    }
                }
                _ => return Err(self.unexpected(&separator, "',' or ')'")),
            }
        }
    }

    /// Enters one nesting level at `start`; callers leave it with `self.depth -= 1`
    fn descend(&mut self, start: usize, end: usize) -> Result<(), SyntaxError> {
        if self.depth >= MAX_NESTING {
            return Err(SyntaxError::NestingTooDeep {
                near: self.source()[start..end].to_string(),
                max: MAX_NESTING,
                position: self.position(start),
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn parse_value(&mut self) -> Result<LiteralValue, SyntaxError> {
        if self.peek_is(&Token::At) {
            let (start, end) = self.lexer.peek().map(|t| (t.start, t.end)).unwrap_or_default();
            self.descend(start, end)?;
            let nested = self.parse_directive();
            self.depth -= 1;
            return Ok(LiteralValue::Directive(nested?));
        }
        let token = self.next_or_end("value")?;
        let value = match token.token {
            Token::String(s) => LiteralValue::String(s),
            Token::Integer(v) => LiteralValue::Integer(v),
            Token::Decimal(v) => LiteralValue::Decimal(v),
            Token::True => LiteralValue::Boolean(true),
            Token::False => LiteralValue::Boolean(false),
            Token::Null => LiteralValue::Null,
            Token::Identifier(id) => LiteralValue::Identifier(id),
            Token::LBrace => {
                self.descend(token.start, token.end)?;
                let array = self.parse_array();
                self.depth -= 1;
                array?
            }
            _ => return Err(self.unexpected(&token, "value")),
        };
        Ok(value)
    }

    /// Array elements after `{`
    fn parse_array(&mut self) -> Result<LiteralValue, SyntaxError> {
        let mut items = Vec::new();
        if self.peek_is(&Token::RBrace) {
            self.lexer.next();
            return Ok(LiteralValue::Array(items));
        }
        loop {
            items.push(self.parse_value()?);
            let separator = self.next_or_end("',' or '}'")?;
            match separator.token {
                Token::RBrace => return Ok(LiteralValue::Array(items)),
                Token::Comma => {}
                _ => return Err(self.unexpected(&separator, "',' or '}'")),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_directives_from_body() {
        let statement = read_statement("@Name('STMTONE') @NoLock select * from Bean").unwrap();
        assert_eq!(statement.directives.len(), 2);
        assert_eq!(statement.directives[1].name, "NoLock");
        assert_eq!(statement.body, "select * from Bean");
    }

    #[test]
    fn body_keeps_comments() {
        let statement = read_statement("@MyAnnotationSimple /* test */ select * from Bean").unwrap();
        assert_eq!(statement.body, "/* test */ select * from Bean");
    }

    #[test]
    fn statements_without_directives_are_all_body() {
        let statement = read_statement("select * from Bean").unwrap();
        assert!(statement.directives.is_empty());
        assert_eq!(statement.body, "select * from Bean");
    }

    #[test]
    fn reads_named_arrays_and_nested_directives() {
        let literal = read_directive(
            "@MyAnnotationNested(nestableSimple=@MyAnnotationNestableSimple, nestableValues=@MyAnnotationNestableValues(val=999, arr={2, 1}))",
        )
        .unwrap();
        let DirectiveArgs::Named(args) = &literal.args else {
            panic!("expected named args");
        };
        assert_eq!(args.len(), 2);
        let LiteralValue::Directive(values) = &args[1].value else {
            panic!("expected nested directive");
        };
        let DirectiveArgs::Named(inner) = &values.args else {
            panic!("expected named args");
        };
        assert_eq!(
            inner[1].value,
            LiteralValue::array([LiteralValue::Integer(2), LiteralValue::Integer(1)])
        );
    }

    #[test]
    fn positional_values_and_enum_references() {
        let literal = read_directive("@MyAnnotationValueEnum(a.b.CC)").unwrap();
        assert_eq!(literal.args, DirectiveArgs::Positional(Box::new(LiteralValue::identifier("a.b.CC"))));
        let empty = read_directive("@Drop()").unwrap();
        assert_eq!(empty.args, DirectiveArgs::Empty);
    }

    #[test]
    fn reports_positions_of_unexpected_tokens() {
        let err = read_statement("@Name('a' 'b') select").unwrap_err();
        assert_eq!(
            err,
            SyntaxError::UnexpectedToken {
                near: "'b'".into(),
                expected: "')'".into(),
                position: Position::new(1, 11),
            }
        );
        assert_eq!(
            err.to_string(),
            "Incorrect syntax near ''b'' at 1:11 (expecting ')')"
        );
    }

    #[test]
    fn deep_nesting_is_a_syntax_error() {
        let nested = |levels: usize| format!("{}{} select 1", "@A(".repeat(levels), ")".repeat(levels));
        assert!(read_statement(&nested(MAX_NESTING)).is_ok());

        let err = read_statement(&nested(MAX_NESTING + 2)).unwrap_err();
        assert_eq!(
            err,
            SyntaxError::NestingTooDeep {
                near: "@".into(),
                max: MAX_NESTING,
                position: Position::new(1, 3 * MAX_NESTING + 1),
            }
        );
        assert!(matches!(read_statement(&nested(200_000)), Err(SyntaxError::NestingTooDeep { .. })));

        let arrays = format!("@A({}1{})", "{".repeat(500), "}".repeat(500));
        assert!(matches!(read_directive(&arrays), Err(SyntaxError::NestingTooDeep { .. })));
    }

    #[test]
    fn reports_unterminated_directives() {
        let err = read_statement("@Tag(name='a',").unwrap_err();
        assert_eq!(err, SyntaxError::UnexpectedEnd { expected: "attribute name".into() });
        let err = read_statement("@5 select").unwrap_err();
        assert!(matches!(err, SyntaxError::UnexpectedToken { ref near, .. } if near == "5"));
    }
}
