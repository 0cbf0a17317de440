/// A compiled pattern AST node.
///
/// Built once per pattern string at compile time, then reused unchanged
/// across every match attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// Transparent wrapper produced around every expression production.
    Expr(Box<Self>),
    /// Literal comparison, or the wildcard.
    Value(Literal),
    /// Binds the matched value (or, inside a record, the entry whose key
    /// equals the name) into the environment.
    Variable(String),
    /// Zero items: matches only an empty sequence. One item: positional
    /// group, element by element. Two items: cons head/tail split.
    Sequence(Vec<Self>),
    /// Zero or one entry; the entry is a variable or a comma group of
    /// variables, each binding against the same record.
    Record(Option<Box<Self>>),
    /// Comma-joined pair. Positional inside sequence literals,
    /// independent inside record literals.
    Group(Box<Self>, Box<Self>),
}

/// Literal payload of a value pattern.
///
/// Quoting is not preserved: `5` and `'5'` both compile to the text `5`,
/// and both compare by string equality first, numeric equality second.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    /// `_`, matches anything without binding.
    Wildcard,
    /// Raw (unquoted) literal text.
    Text(String),
}
