use smart_default::SmartDefault;
use crate::ast::{DirectiveArgs, DirectiveLiteral, LiteralValue};
use crate::directive::ResolvedDirective;

/// Output options for canonical serialization
#[derive(Debug, Clone, PartialEq, Eq, SmartDefault)]
pub struct FormatOptions {
    /// One directive per line, body on its own line
    pub pretty: bool,
    #[default = "\n"]
    pub newline: String,
}

impl FormatOptions {
    pub fn pretty() -> Self {
        Self {
            pretty: true,
            ..Self::default()
        }
    }
}

/// Writes resolved directives back to source text. Only written attributes are
/// emitted, in written order, with `'` as the single quote character.
#[derive(Debug, Clone, Default)]
pub struct DirectiveFormatter {
    options: FormatOptions,
}

impl DirectiveFormatter {
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    pub fn format_directive(&self, directive: &ResolvedDirective) -> String {
        let mut out = String::new();
        write_directive(&mut out, directive.source());
        out
    }

    pub fn format_literal(&self, literal: &DirectiveLiteral) -> String {
        let mut out = String::new();
        write_directive(&mut out, literal);
        out
    }

    /// Directives followed by the statement body
    pub fn format_statement(&self, directives: &[ResolvedDirective], body: &str) -> String {
        let mut out = String::new();
        for directive in directives {
            write_directive(&mut out, directive.source());
            if self.options.pretty {
                out.push_str(&self.options.newline);
            } else {
                out.push(' ');
            }
        }
        if body.is_empty() && !self.options.pretty {
            out.truncate(out.trim_end_matches(' ').len());
        }
        out.push_str(body);
        out
    }
}

fn write_directive(out: &mut String, literal: &DirectiveLiteral) {
    out.push('@');
    out.push_str(&literal.name);
    match &literal.args {
        DirectiveArgs::Empty => {}
        DirectiveArgs::Positional(value) => {
            out.push('(');
            write_value(out, value);
            out.push(')');
        }
        DirectiveArgs::Named(args) => {
            out.push('(');
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&arg.name);
                out.push('=');
                write_value(out, &arg.value);
            }
            out.push(')');
        }
    }
}

fn write_value(out: &mut String, value: &LiteralValue) {
    match value {
        LiteralValue::String(s) => write_quoted(out, s),
        LiteralValue::Integer(v) => out.push_str(&v.to_string()),
        // Debug keeps the fractional part (`1.0`) so the text reads back as a decimal
        LiteralValue::Decimal(v) => out.push_str(&format!("{:?}", v)),
        LiteralValue::Boolean(v) => out.push_str(if *v { "true" } else { "false" }),
        LiteralValue::Null => out.push_str("null"),
        LiteralValue::Array(items) => {
            out.push('{');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(out, item);
            }
            out.push('}');
        }
        LiteralValue::Directive(directive) => write_directive(out, directive),
        LiteralValue::Identifier(id) => out.push_str(id),
    }
}

fn write_quoted(out: &mut String, text: &str) {
    out.push('\'');
    for c in text.chars() {
        if c == '\'' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('\'');
}
