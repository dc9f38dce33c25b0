//! Lexer for the directive prefix of a statement, using Logos

use logos::Logos;
use std::fmt;

/// Token of the directive grammar
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    #[token("@")]
    At,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token("=")]
    Eq,

    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,

    #[regex(r"-?[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    Integer(i64),

    #[regex(r"-?[0-9]+(\.[0-9]+([eE][+-]?[0-9]+)?|[eE][+-]?[0-9]+)", finite_decimal)]
    Decimal(f64),

    #[regex(r#""([^"\\]|\\.)*""#, |lex| unescape(lex.slice()))]
    #[regex(r#"'([^'\\]|\\.)*'"#, |lex| unescape(lex.slice()))]
    String(String),

    /// Plain or dotted identifier
    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*(\.[A-Za-z_$][A-Za-z0-9_$]*)*", |lex| lex.slice().to_string())]
    Identifier(String),

    /// Text the directive grammar does not recognize (e.g. the start of the statement body)
    Invalid,
}

// overflowing literals such as `1e400` are not tokens
fn finite_decimal(lex: &mut logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Strips the quotes and resolves backslash escapes
fn unescape(quoted: &str) -> Option<String> {
    let inner = quoted.get(1..quoted.len().checked_sub(1)?)?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            other => out.push(other),
        }
    }
    Some(out)
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::At => write!(f, "@"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
            Token::Comma => write!(f, ","),
            Token::Eq => write!(f, "="),
            Token::True => write!(f, "true"),
            Token::False => write!(f, "false"),
            Token::Null => write!(f, "null"),
            Token::Integer(v) => write!(f, "{}", v),
            Token::Decimal(v) => write!(f, "{:?}", v),
            Token::String(s) => write!(f, "'{}'", s),
            Token::Identifier(id) => write!(f, "{}", id),
            Token::Invalid => write!(f, "<invalid>"),
        }
    }
}

/// Spanned token with byte offsets into the source
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub start: usize,
    pub end: usize,
}

/// Lexer wrapper that produces spanned tokens with one token of lookahead
pub struct Lexer<'source> {
    inner: logos::Lexer<'source, Token>,
    peeked: Option<SpannedToken>,
}

impl<'source> Lexer<'source> {
    pub fn new(source: &'source str) -> Self {
        Self {
            inner: Token::lexer(source),
            peeked: None,
        }
    }

    pub fn peek(&mut self) -> Option<&SpannedToken> {
        if self.peeked.is_none() {
            self.peeked = self.next_token();
        }
        self.peeked.as_ref()
    }

    pub fn source(&self) -> &'source str {
        self.inner.source()
    }

    fn next_token(&mut self) -> Option<SpannedToken> {
        let token = match self.inner.next()? {
            Ok(token) => token,
            Err(_) => Token::Invalid,
        };
        let span = self.inner.span();
        Some(SpannedToken {
            token,
            start: span.start,
            end: span.end,
        })
    }
}

impl<'source> Iterator for Lexer<'source> {
    type Item = SpannedToken;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(peeked) = self.peeked.take() {
            return Some(peeked);
        }
        self.next_token()
    }
}

/// Tokenize a source string into a vector of spanned tokens
pub fn tokenize(source: &str) -> Vec<SpannedToken> {
    Lexer::new(source).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(source: &str) -> Vec<Token> {
        tokenize(source).into_iter().map(|t| t.token).collect()
    }

    #[test]
    fn test_directive_tokens() {
        assert_eq!(
            tokens("@Tag(name='a', value=\"b\")"),
            vec![
                Token::At,
                Token::Identifier("Tag".into()),
                Token::LParen,
                Token::Identifier("name".into()),
                Token::Eq,
                Token::String("a".into()),
                Token::Comma,
                Token::Identifier("value".into()),
                Token::Eq,
                Token::String("b".into()),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            tokens("-1 2.5 1e3 {}"),
            vec![
                Token::Integer(-1),
                Token::Decimal(2.5),
                Token::Decimal(1000.0),
                Token::LBrace,
                Token::RBrace,
            ]
        );
    }

    #[test]
    fn test_overflowing_decimals_are_invalid() {
        assert_eq!(tokens("1e400"), vec![Token::Invalid]);
        assert_eq!(tokens("-1.5e308"), vec![Token::Decimal(-1.5e308)]);
    }

    #[test]
    fn test_keywords_and_dotted_identifiers() {
        assert_eq!(
            tokens("true false null a.b.CC nullable"),
            vec![
                Token::True,
                Token::False,
                Token::Null,
                Token::Identifier("a.b.CC".into()),
                Token::Identifier("nullable".into()),
            ]
        );
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(tokens(r"'it\'s' 'a\\b'"), vec![Token::String("it's".into()), Token::String("a\\b".into())]);
    }

    #[test]
    fn test_invalid_text_is_spanned() {
        let spanned = tokenize("@A /* x */");
        assert_eq!(spanned[2].token, Token::Invalid);
        assert_eq!(spanned[2].start, 3);
    }

    #[test]
    fn test_lexer_peek() {
        let mut lexer = Lexer::new("a b");
        assert_eq!(lexer.peek().unwrap().token, Token::Identifier("a".into()));
        assert_eq!(lexer.next().unwrap().token, Token::Identifier("a".into()));
        assert_eq!(lexer.peek().unwrap().token, Token::Identifier("b".into()));
    }
}
