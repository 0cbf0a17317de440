use std::fmt;

use crate::ast::{Literal, Pattern};
use crate::token::{Token, TokenKind};

/// Classifies a parser error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The pattern contains no tokens.
    Empty,
    /// No grammar production matched the token sequence.
    Unrecognized,
    /// The root production matched but left tokens behind.
    TrailingTokens { consumed: usize, total: usize },
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty pattern"),
            Self::Unrecognized => {
                write!(f, "pattern does not match any grammar production")
            }
            Self::TrailingTokens { consumed, total } => {
                write!(
                    f,
                    "pattern not fully consumed \
                     ({consumed} of {total} tokens parsed)"
                )
            }
        }
    }
}

/// Error produced during parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
}

/// Parse a token stream into a pattern AST.
///
/// Space tokens are filtered out first; the grammar never sees them.
/// The root `Expr` production must consume every remaining token.
///
/// # Errors
///
/// Returns `ParseError` when no production matches or tokens are left
/// unconsumed.
pub fn parse(tokens: &[Token]) -> Result<Pattern, ParseError> {
    let significant: Vec<Token> = tokens
        .iter()
        .filter(|t| t.kind != TokenKind::Space)
        .cloned()
        .collect();

    if significant.is_empty() {
        return Err(ParseError {
            kind: ParseErrorKind::Empty,
        });
    }

    let (pattern, width) = expr(&significant).ok_or(ParseError {
        kind: ParseErrorKind::Unrecognized,
    })?;

    if width < significant.len() {
        return Err(ParseError {
            kind: ParseErrorKind::TrailingTokens {
                consumed: width,
                total: significant.len(),
            },
        });
    }

    Ok(pattern)
}

// Each production is a pure function from a token slice to an optional
// (node, consumed-token-count) pair. Alternatives are tried in fixed
// order and the first success wins; there is no backtracking once a
// sub-rule fails.

/// `Expr := Sequence | Record | Value | Variable`
fn expr(tokens: &[Token]) -> Option<(Pattern, usize)> {
    if tokens.is_empty() {
        return None;
    }
    let (inner, width) = sequence(tokens)
        .or_else(|| record(tokens))
        .or_else(|| value(tokens))
        .or_else(|| variable(tokens))?;
    Some((Pattern::Expr(Box::new(inner)), width))
}

/// `Sequence := Expr '::' Expr | '[' ']' | '[' items ']'`
///
/// The cons form is recognised first, on the first *top-level* `::`
/// (colons nested inside bracket or brace pairs do not count).
fn sequence(tokens: &[Token]) -> Option<(Pattern, usize)> {
    if tokens.len() < 2 {
        return None;
    }

    if let Some(index) = find_top_level(tokens, TokenKind::Colon) {
        if tokens.get(index + 1).map(|t| t.kind) == Some(TokenKind::Colon) {
            return cons(tokens, index);
        }
        // A lone top-level colon is never valid, but the bracket form
        // may still apply (e.g. the colon sits past the last bracket).
    }

    if tokens[0].kind != TokenKind::LBracket {
        return None;
    }
    let last = tokens.iter().rposition(|t| t.kind == TokenKind::RBracket)?;
    if last == 1 {
        return Some((Pattern::Sequence(Vec::new()), 2));
    }

    let inner = &tokens[1..last];
    let (items, width) = comma_exprs(inner).or_else(|| expr(inner))?;
    if width != inner.len() {
        return None;
    }
    Some((Pattern::Sequence(vec![items]), last + 1))
}

fn cons(tokens: &[Token], colon: usize) -> Option<(Pattern, usize)> {
    let head_slice = &tokens[..colon];
    let (head, head_width) = expr(head_slice)?;
    if head_width != head_slice.len() {
        return None;
    }
    let tail_slice = &tokens[colon + 2..];
    let (tail, tail_width) = expr(tail_slice)?;
    if tail_width != tail_slice.len() {
        return None;
    }
    Some((
        Pattern::Sequence(vec![head, tail]),
        head_width + 2 + tail_width,
    ))
}

/// `Record := '{' '}' | '{' Variable (',' Variable)* '}'`
fn record(tokens: &[Token]) -> Option<(Pattern, usize)> {
    if tokens.len() < 2 || tokens[0].kind != TokenKind::LBrace {
        return None;
    }
    let last = tokens.iter().rposition(|t| t.kind == TokenKind::RBrace)?;

    let inner = &tokens[1..last];
    if inner.is_empty() {
        return Some((Pattern::Record(None), last + 1));
    }

    let (entry, width) = comma_vars(inner).or_else(|| variable(inner))?;
    if width != inner.len() {
        return None;
    }
    Some((Pattern::Record(Some(Box::new(entry))), last + 1))
}

/// `CommaExprs := Expr ',' Expr | Expr ',' CommaExprs`
///
/// Split on the first top-level comma; each side must consume its whole
/// slice.
fn comma_exprs(tokens: &[Token]) -> Option<(Pattern, usize)> {
    if tokens.len() < 3 {
        return None;
    }
    let index = find_top_level(tokens, TokenKind::Comma)?;

    let left_slice = &tokens[..index];
    let (left, left_width) = comma_exprs(left_slice).or_else(|| expr(left_slice))?;
    if left_width != left_slice.len() {
        return None;
    }

    let right_slice = &tokens[index + 1..];
    let (right, right_width) = comma_exprs(right_slice).or_else(|| expr(right_slice))?;
    if right_width != right_slice.len() {
        return None;
    }

    Some((
        Pattern::Group(Box::new(left), Box::new(right)),
        left_width + 1 + right_width,
    ))
}

/// `CommaVars := Variable ',' Variable | Variable ',' CommaVars`
///
/// Record entries hold only variables, so the comma needs no
/// top-level scan.
fn comma_vars(tokens: &[Token]) -> Option<(Pattern, usize)> {
    if tokens.len() < 3 {
        return None;
    }
    let index = tokens.iter().position(|t| t.kind == TokenKind::Comma)?;

    let (left, left_width) = variable(&tokens[..index])?;

    let right_slice = &tokens[index + 1..];
    let (right, right_width) = comma_vars(right_slice).or_else(|| variable(right_slice))?;
    if right_width != right_slice.len() {
        return None;
    }

    Some((
        Pattern::Group(Box::new(left), Box::new(right)),
        left_width + 1 + right_width,
    ))
}

/// `Value := STRING | NUMBER | '_'`
fn value(tokens: &[Token]) -> Option<(Pattern, usize)> {
    match tokens {
        [token] => match token.kind {
            TokenKind::Wildcard => Some((Pattern::Value(Literal::Wildcard), 1)),
            TokenKind::Text | TokenKind::Number => {
                Some((Pattern::Value(Literal::Text(token.text.clone())), 1))
            }
            _ => None,
        },
        _ => None,
    }
}

/// `Variable := IDENTIFIER`
fn variable(tokens: &[Token]) -> Option<(Pattern, usize)> {
    match tokens {
        [token] if token.kind == TokenKind::Identifier => {
            Some((Pattern::Variable(token.text.clone()), 1))
        }
        _ => None,
    }
}

/// First occurrence of `kind` that is not nested inside a bracket or
/// brace pair.
fn find_top_level(tokens: &[Token], kind: TokenKind) -> Option<usize> {
    (0..tokens.len()).find(|&i| tokens[i].kind == kind && is_top_level(tokens, i))
}

/// A separator is top-level when no pair opened before it is still
/// unclosed: either no brackets occur in the prefix at all, or the
/// nearest closing bracket sits immediately before the separator.
fn is_top_level(tokens: &[Token], index: usize) -> bool {
    let prefix = &tokens[..index];
    let open = prefix
        .iter()
        .rposition(|t| matches!(t.kind, TokenKind::LBracket | TokenKind::LBrace));
    let close = prefix
        .iter()
        .rposition(|t| matches!(t.kind, TokenKind::RBracket | TokenKind::RBrace));
    match (open, close) {
        (None, None) => true,
        (Some(_), Some(close)) => close + 1 == index,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn parse_input(input: &str) -> Result<Pattern, ParseError> {
        let tokens = tokenize(input).expect("tokenize failed");
        parse(&tokens)
    }

    fn var(name: &str) -> Pattern {
        Pattern::Variable(name.to_string())
    }

    fn wrap(inner: Pattern) -> Pattern {
        Pattern::Expr(Box::new(inner))
    }

    #[test]
    fn bare_variable() {
        assert_eq!(parse_input("x").expect("parse failed"), wrap(var("x")));
    }

    #[test]
    fn wildcard() {
        assert_eq!(
            parse_input("_").expect("parse failed"),
            wrap(Pattern::Value(Literal::Wildcard))
        );
    }

    #[test]
    fn literals_lose_quoting() {
        let number = parse_input("5").expect("parse failed");
        let string = parse_input("'5'").expect("parse failed");
        assert_eq!(number, wrap(Pattern::Value(Literal::Text("5".to_string()))));
        assert_eq!(number, string);
    }

    #[test]
    fn empty_sequence() {
        assert_eq!(
            parse_input("[]").expect("parse failed"),
            wrap(Pattern::Sequence(Vec::new()))
        );
    }

    #[test]
    fn single_item_sequence() {
        assert_eq!(
            parse_input("[x]").expect("parse failed"),
            wrap(Pattern::Sequence(vec![wrap(var("x"))]))
        );
    }

    #[test]
    fn comma_separated_sequence() {
        assert_eq!(
            parse_input("[a, b]").expect("parse failed"),
            wrap(Pattern::Sequence(vec![Pattern::Group(
                Box::new(wrap(var("a"))),
                Box::new(wrap(var("b")))
            )]))
        );
    }

    #[test]
    fn comma_group_nests_rightward() {
        let parsed = parse_input("[a,b,c]").expect("parse failed");
        let expected = wrap(Pattern::Sequence(vec![Pattern::Group(
            Box::new(wrap(var("a"))),
            Box::new(Pattern::Group(
                Box::new(wrap(var("b"))),
                Box::new(wrap(var("c"))),
            )),
        )]));
        assert_eq!(parsed, expected);
    }

    #[test]
    fn cons() {
        assert_eq!(
            parse_input("h::t").expect("parse failed"),
            wrap(Pattern::Sequence(vec![wrap(var("h")), wrap(var("t"))]))
        );
    }

    #[test]
    fn cons_with_bracketed_head() {
        let parsed = parse_input("[a]::t").expect("parse failed");
        let expected = wrap(Pattern::Sequence(vec![
            wrap(Pattern::Sequence(vec![wrap(var("a"))])),
            wrap(var("t")),
        ]));
        assert_eq!(parsed, expected);
    }

    #[test]
    fn nested_cons_inside_brackets() {
        // The colon inside the brackets is not top-level.
        let parsed = parse_input("[a::b]").expect("parse failed");
        let expected = wrap(Pattern::Sequence(vec![wrap(Pattern::Sequence(vec![
            wrap(var("a")),
            wrap(var("b")),
        ]))]));
        assert_eq!(parsed, expected);
    }

    #[test]
    fn nested_sequences() {
        let parsed = parse_input("[[a],b]").expect("parse failed");
        let expected = wrap(Pattern::Sequence(vec![Pattern::Group(
            Box::new(wrap(Pattern::Sequence(vec![wrap(var("a"))]))),
            Box::new(wrap(var("b"))),
        )]));
        assert_eq!(parsed, expected);
    }

    #[test]
    fn empty_record() {
        assert_eq!(
            parse_input("{}").expect("parse failed"),
            wrap(Pattern::Record(None))
        );
    }

    #[test]
    fn record_with_variables() {
        let parsed = parse_input("{a, b}").expect("parse failed");
        let expected = wrap(Pattern::Record(Some(Box::new(Pattern::Group(
            Box::new(var("a")),
            Box::new(var("b")),
        )))));
        assert_eq!(parsed, expected);
    }

    #[test]
    fn record_entries_must_be_variables() {
        assert!(parse_input("{5}").is_err());
        assert!(parse_input("{a, 5}").is_err());
        assert!(parse_input("{_}").is_err());
    }

    #[test]
    fn single_colon_is_invalid() {
        assert!(parse_input("a:b").is_err());
        assert!(parse_input("a:").is_err());
    }

    #[test]
    fn trailing_tokens_rejected() {
        let err = parse_input("[] x").expect_err("should fail");
        assert_eq!(
            err.kind,
            ParseErrorKind::TrailingTokens {
                consumed: 2,
                total: 3
            }
        );
    }

    #[test]
    fn partial_bracket_contents_rejected() {
        assert!(parse_input("[[a] b]").is_err());
        assert!(parse_input("[a b]").is_err());
    }

    #[test]
    fn bare_comma_group_is_invalid_at_root() {
        assert!(parse_input("a,b").is_err());
    }

    #[test]
    fn unclosed_brackets_rejected() {
        assert!(parse_input("[a").is_err());
        assert!(parse_input("{a").is_err());
    }

    #[test]
    fn empty_pattern_rejected() {
        let err = parse_input("").expect_err("should fail");
        assert_eq!(err.kind, ParseErrorKind::Empty);
        // All-space input parses to nothing as well.
        assert!(parse_input("   ").is_err());
    }

    #[test]
    fn spaces_are_insignificant() {
        assert_eq!(
            parse_input("[a, b]").expect("parse failed"),
            parse_input("[a,b]").expect("parse failed")
        );
        assert_eq!(
            parse_input("h :: t").expect("parse failed"),
            parse_input("h::t").expect("parse failed")
        );
    }

    #[test]
    fn compile_is_deterministic() {
        let first = parse_input("[x, {a, b}, 'lit']").expect("parse failed");
        let second = parse_input("[x, {a, b}, 'lit']").expect("parse failed");
        assert_eq!(first, second);
    }

    #[test]
    fn top_level_separator_scan_skips_nested_pairs() {
        // The comma inside `{a,b}` must not split the outer group.
        let parsed = parse_input("[{a,b},c]").expect("parse failed");
        let expected = wrap(Pattern::Sequence(vec![Pattern::Group(
            Box::new(wrap(Pattern::Record(Some(Box::new(Pattern::Group(
                Box::new(var("a")),
                Box::new(var("b")),
            )))))),
            Box::new(wrap(var("c"))),
        )]));
        assert_eq!(parsed, expected);
    }
}
