use std::fmt;

use crate::token::{Token, TokenKind};

/// Classifies a lexer error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// Character that cannot start any token.
    UnexpectedCharacter(char),
    /// Quote with no matching close quote, or non-alphanumeric
    /// string contents.
    MalformedString { quote: char },
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedCharacter(ch) => {
                write!(f, "unexpected character: {ch}")
            }
            Self::MalformedString { quote } => {
                write!(
                    f,
                    "malformed string literal starting with {quote} \
                     (strings are quoted alphanumerics)"
                )
            }
        }
    }
}

/// Error produced during lexing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at column {column}")]
pub struct LexError {
    pub kind: LexErrorKind,
    /// 1-based character position in the pattern source.
    pub column: usize,
}

/// Tokenize a pattern source string into a sequence of tokens.
///
/// At each position the lexers are tried in fixed priority order:
/// number, string, identifier, single-character literal. The first that
/// consumes a non-empty prefix wins.
///
/// # Errors
///
/// Returns `LexError` on a character that no lexer accepts.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        let rest = &chars[pos..];
        let token = lex_number(rest)
            .or_else(|| lex_string(rest))
            .or_else(|| lex_identifier(rest))
            .or_else(|| lex_punctuation(rest))
            .ok_or_else(|| LexError {
                kind: classify_failure(rest[0]),
                column: pos + 1,
            })?;
        pos += token.width;
        tokens.push(token);
    }

    Ok(tokens)
}

const fn classify_failure(ch: char) -> LexErrorKind {
    if matches!(ch, '\'' | '"') {
        LexErrorKind::MalformedString { quote: ch }
    } else {
        LexErrorKind::UnexpectedCharacter(ch)
    }
}

fn lex_number(chars: &[char]) -> Option<Token> {
    let mut len = usize::from(chars.first() == Some(&'-'));
    let digits = count_digits(&chars[len..]);
    if digits == 0 {
        return None;
    }
    len += digits;

    // Fractional part only counts when digits follow the dot.
    if chars.get(len) == Some(&'.') {
        let fraction = count_digits(&chars[len + 1..]);
        if fraction > 0 {
            len += 1 + fraction;
        }
    }

    Some(Token::new(
        TokenKind::Number,
        chars[..len].iter().collect::<String>(),
        len,
    ))
}

fn count_digits(chars: &[char]) -> usize {
    chars.iter().take_while(|c| c.is_ascii_digit()).count()
}

fn lex_string(chars: &[char]) -> Option<Token> {
    let quote = *chars.first()?;
    if quote != '\'' && quote != '"' {
        return None;
    }
    let content = chars[1..]
        .iter()
        .take_while(|c| c.is_ascii_alphanumeric())
        .count();
    if chars.get(1 + content) != Some(&quote) {
        return None;
    }
    Some(Token::new(
        TokenKind::Text,
        chars[1..=content].iter().collect::<String>(),
        content + 2,
    ))
}

fn lex_identifier(chars: &[char]) -> Option<Token> {
    if !chars.first()?.is_ascii_alphabetic() {
        return None;
    }
    let len = chars
        .iter()
        .take_while(|c| c.is_ascii_alphanumeric())
        .count();
    Some(Token::new(
        TokenKind::Identifier,
        chars[..len].iter().collect::<String>(),
        len,
    ))
}

fn lex_punctuation(chars: &[char]) -> Option<Token> {
    let ch = *chars.first()?;
    let kind = match ch {
        '[' => TokenKind::LBracket,
        ']' => TokenKind::RBracket,
        '{' => TokenKind::LBrace,
        '}' => TokenKind::RBrace,
        ',' => TokenKind::Comma,
        ':' => TokenKind::Colon,
        ' ' => TokenKind::Space,
        '_' => TokenKind::Wildcard,
        _ => return None,
    };
    Some(Token::new(kind, ch, 1))
}
