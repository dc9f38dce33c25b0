use log::trace;
use crate::error::HintError;
use crate::vocabulary::{HintPolicy, HintVocabulary};

/// One comma-separated entry of a hint payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedHintToken {
    /// Canonical vocabulary name
    pub name: String,
    pub policy: HintPolicy,
    /// Token text as written, trimmed
    pub raw: String,
    /// Text after `=` or between the parentheses
    pub argument: Option<String>,
}

impl ParsedHintToken {
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Value of a `NAME=value` hint
    pub fn assigned_scalar(&self) -> Option<&str> {
        match self.policy {
            HintPolicy::RequiresScalar => self.argument.as_deref(),
            _ => None,
        }
    }

    /// Trimmed arguments of a `NAME(a, b)` hint
    pub fn assigned_list(&self) -> Option<Vec<String>> {
        if self.policy != HintPolicy::RequiresParenthesizedList {
            return None;
        }
        let contents = self.argument.as_deref()?.trim();
        if contents.is_empty() {
            return Some(Vec::new());
        }
        Some(contents.split(',').map(|arg| arg.trim().to_string()).collect())
    }
}

/// Splits a hint payload into tokens, in order and with duplicates kept.
///
/// Commas inside parentheses do not split. An empty payload has no tokens.
pub fn tokenize(payload: &str, vocabulary: &HintVocabulary) -> Result<Vec<ParsedHintToken>, HintError> {
    let payload = payload.trim();
    if payload.is_empty() {
        return Ok(Vec::new());
    }
    split_top_level(payload)
        .into_iter()
        .map(|raw| parse_token(raw.trim(), vocabulary))
        .collect()
}

fn split_top_level(payload: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in payload.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&payload[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&payload[start..]);
    parts
}

fn parse_token(raw: &str, vocabulary: &HintVocabulary) -> Result<ParsedHintToken, HintError> {
    let name_end = raw.find(['=', '(', ')']).unwrap_or(raw.len());
    let (name, rest) = raw.split_at(name_end);
    let name = name.trim();

    let entry = vocabulary.lookup(name).ok_or_else(|| HintError::UnknownValue {
        value: name.to_string(),
    })?;
    let hint = entry.name.clone();

    let argument = match entry.policy {
        HintPolicy::None if rest.is_empty() => None,
        HintPolicy::None => return Err(HintError::DoesNotAcceptValue { hint }),
        HintPolicy::RequiresScalar => match rest.strip_prefix('=') {
            Some(value) => Some(value.trim().to_string()),
            None => return Err(HintError::RequiresValue { hint }),
        },
        HintPolicy::RequiresParenthesizedList => Some(parenthesized(rest, &hint)?.to_string()),
    };

    trace!("Parsed hint {} from '{}'", hint, raw);
    Ok(ParsedHintToken {
        name: hint,
        policy: entry.policy,
        raw: raw.to_string(),
        argument,
    })
}

/// Contents of `(...)`; nothing but whitespace may follow the closing parenthesis
fn parenthesized<'r>(rest: &'r str, hint: &str) -> Result<&'r str, HintError> {
    let requires = || HintError::RequiresParentheses { hint: hint.to_string() };
    let inner = rest.trim_start().strip_prefix('(').ok_or_else(requires)?;

    let mut depth = 1usize;
    let close = inner
        .char_indices()
        .find(|&(_, c)| {
            match c {
                '(' => depth += 1,
                ')' => depth -= 1,
                _ => {}
            }
            depth == 0
        })
        .map(|(i, _)| i)
        .ok_or_else(requires)?;

    if !inner[close + 1..].trim().is_empty() {
        return Err(HintError::AdditionalText { hint: hint.to_string() });
    }
    Ok(&inner[..close])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::{INDEX, ITERATE_ONLY, RECLAIM_GROUP_AGED};

    fn parse(payload: &str) -> Result<Vec<ParsedHintToken>, HintError> {
        tokenize(payload, HintVocabulary::builtin())
    }

    #[test]
    fn keeps_order_and_duplicates() {
        let tokens = parse("ITERATE_ONLY,ITERATE_ONLY,DISABLE_RECLAIM_GROUP,ITERATE_ONLY").unwrap();
        let names: Vec<_> = tokens.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["ITERATE_ONLY", "ITERATE_ONLY", "DISABLE_RECLAIM_GROUP", "ITERATE_ONLY"]);
    }

    #[test]
    fn trims_payload_and_tokens() {
        let tokens = parse("  iterate_only ").unwrap();
        assert_eq!(tokens[0].name, ITERATE_ONLY);
        assert_eq!(tokens[0].raw, "iterate_only");
        assert!(parse("   ").unwrap().is_empty());
    }

    #[test]
    fn scalar_and_list_arguments() {
        let tokens = parse("ITERATE_ONLY,reclaim_group_aged=10, index(one, two)").unwrap();
        assert_eq!(tokens[1].name, RECLAIM_GROUP_AGED);
        assert_eq!(tokens[1].assigned_scalar(), Some("10"));
        assert_eq!(tokens[2].name, INDEX);
        assert_eq!(tokens[2].assigned_list().unwrap(), ["one", "two"]);
        assert_eq!(tokens[0].assigned_scalar(), None);
        assert_eq!(parse("index()").unwrap()[0].assigned_list().unwrap(), Vec::<String>::new());
    }

    #[test]
    fn commas_inside_parentheses_do_not_split() {
        let tokens = parse("index(a, b),exclude_plan(x(1), y)").unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].argument.as_deref(), Some("x(1), y"));
    }

    #[test]
    fn policy_violations() {
        let cases = [
            ("XXX", HintError::UnknownValue { value: "XXX".into() }),
            ("testit=5", HintError::UnknownValue { value: "testit".into() }),
            ("ITERATE_ONLY,", HintError::UnknownValue { value: "".into() }),
            ("RECLAIM_GROUP_AGED", HintError::RequiresValue { hint: "RECLAIM_GROUP_AGED".into() }),
            ("reclaim_group_aged(5)", HintError::RequiresValue { hint: "RECLAIM_GROUP_AGED".into() }),
            ("ITERATE_ONLY=5,RECLAIM_GROUP_AGED=5", HintError::DoesNotAcceptValue { hint: "ITERATE_ONLY".into() }),
            ("iterate_only(x)", HintError::DoesNotAcceptValue { hint: "ITERATE_ONLY".into() }),
            ("index(name)xxx", HintError::AdditionalText { hint: "INDEX".into() }),
            ("index", HintError::RequiresParentheses { hint: "INDEX".into() }),
            ("index)", HintError::RequiresParentheses { hint: "INDEX".into() }),
            ("index(a", HintError::RequiresParentheses { hint: "INDEX".into() }),
        ];
        for (payload, expected) in cases {
            assert_eq!(parse(payload).unwrap_err(), expected, "payload {}", payload);
        }
    }
}
