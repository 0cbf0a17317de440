/// Token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Decimal number, optional leading `-` and fractional part.
    Number,
    /// Quoted string (`'...'` or `"..."`, alphanumeric contents).
    Text,
    /// Bare identifier (variable name).
    Identifier,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// A single space, emitted but skipped by the parser.
    Space,
    /// `_`
    Wildcard,
}

/// A single token with its kind, text, and source width.
///
/// `text` is the unquoted content for string tokens. `width` is the number
/// of source characters the token consumed (quotes included), so the lexer
/// can advance without re-scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub width: usize,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>, width: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            width,
        }
    }
}
