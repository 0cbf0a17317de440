use crate::Error;
use crate::ast::{Literal, Pattern};
use crate::lexer::tokenize;
use crate::parser::parse;
use crate::value::Value;

/// A compiled pattern, reusable across any number of match attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matcher {
    source: String,
    pattern: Pattern,
}

/// Outcome of one match attempt.
///
/// `bindings` holds the bound values in left-to-right source order of
/// the pattern's variables; it is empty when the match failed.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub matched: bool,
    pub bindings: Vec<Value>,
}

impl MatchResult {
    /// The bindings on success, `None` on mismatch.
    #[must_use]
    pub fn into_bindings(self) -> Option<Vec<Value>> {
        self.matched.then_some(self.bindings)
    }
}

impl Matcher {
    /// Compile a pattern string.
    ///
    /// # Errors
    ///
    /// Returns `Error` when the pattern does not tokenize or parse.
    pub fn compile(source: &str) -> Result<Self, Error> {
        let tokens = tokenize(source)?;
        let pattern = parse(&tokens)?;
        Ok(Self {
            source: source.to_string(),
            pattern,
        })
    }

    /// The pattern text this matcher was compiled from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The compiled pattern AST.
    #[must_use]
    pub const fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Match a value against the pattern.
    ///
    /// A structural mismatch is not an error: it is an ordinary
    /// `matched: false` result.
    #[must_use]
    pub fn apply(&self, value: &Value) -> MatchResult {
        eval(&self.pattern, value, Context::Root).map_or(
            MatchResult {
                matched: false,
                bindings: Vec::new(),
            },
            |partial| MatchResult {
                matched: true,
                bindings: partial.bindings,
            },
        )
    }
}

/// Where a sub-pattern sits: at the root (or inside a fresh element
/// match), or inside a record literal, where variables look up keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    Root,
    Record,
}

/// A successful sub-match: the bindings it produced and the number of
/// positional items (or record keys) it consumed. Leaves consume one;
/// comma groups sum both sides. The widths feed the strict arity checks.
struct Partial {
    bindings: Vec<Value>,
    width: usize,
}

impl Partial {
    const fn leaf() -> Self {
        Self {
            bindings: Vec::new(),
            width: 1,
        }
    }

    fn bind(value: &Value) -> Self {
        Self {
            bindings: vec![value.clone()],
            width: 1,
        }
    }

    fn join(mut self, right: Self) -> Self {
        self.bindings.extend(right.bindings);
        Self {
            bindings: self.bindings,
            width: self.width + right.width,
        }
    }
}

fn eval(pattern: &Pattern, value: &Value, ctx: Context) -> Option<Partial> {
    match pattern {
        Pattern::Expr(inner) => eval(inner, value, ctx),
        Pattern::Value(literal) => eval_literal(literal, value),
        Pattern::Variable(name) => match ctx {
            Context::Record => {
                let entry = value.as_record()?.get(name)?;
                Some(Partial::bind(entry))
            }
            Context::Root => Some(Partial::bind(value)),
        },
        Pattern::Group(left, right) => match ctx {
            // Record form: both sides bind independently against the
            // same record.
            Context::Record => {
                let left = eval(left, value, Context::Record)?;
                let right = eval(right, value, Context::Record)?;
                Some(left.join(right))
            }
            Context::Root => eval_positional(pattern, value.as_sequence()?),
        },
        Pattern::Sequence(items) => eval_sequence(items, value),
        Pattern::Record(entry) => eval_record(entry.as_deref(), value),
    }
}

fn eval_sequence(items: &[Pattern], value: &Value) -> Option<Partial> {
    let elements = value.as_sequence()?;
    match items {
        [] => elements.is_empty().then(Partial::leaf),
        [group] => {
            // Fixed arity: the group must consume exactly the number of
            // elements present.
            let partial = eval_positional(group, elements)?;
            (partial.width == elements.len()).then(|| Partial {
                bindings: partial.bindings,
                width: 1,
            })
        }
        [head, tail] => {
            let (first, rest) = elements.split_first()?;
            let head = eval_positional(head, std::slice::from_ref(first))?;
            // The tail pattern matches the remaining elements as one
            // sequence value, enabling open-ended rest binding.
            let rest = [Value::Sequence(rest.to_vec())];
            let tail = eval_positional(tail, &rest)?;
            Some(Partial {
                bindings: head.join(tail).bindings,
                width: 1,
            })
        }
        _ => None,
    }
}

fn eval_record(entry: Option<&Pattern>, value: &Value) -> Option<Partial> {
    let record = value.as_record()?;
    match entry {
        None => record.is_empty().then(Partial::leaf),
        Some(group) => {
            // Strict arity: every key present must be bound by exactly
            // one variable.
            let partial = eval(group, value, Context::Record)?;
            (partial.width == record.len()).then(|| Partial {
                bindings: partial.bindings,
                width: 1,
            })
        }
    }
}

/// Positional consumption over a slice of sequence elements: a comma
/// group matches its left side against the one-element head slice and
/// its right side against the remainder; anything else matches the
/// first element alone.
fn eval_positional(pattern: &Pattern, items: &[Value]) -> Option<Partial> {
    match pattern {
        Pattern::Group(left, right) => {
            let cut = items.len().min(1);
            let left = eval_positional(left, &items[..cut])?;
            let right = eval_positional(right, &items[cut..])?;
            Some(left.join(right))
        }
        other => eval(other, items.first()?, Context::Root),
    }
}

/// Literal comparison: direct equality against text first, then, if the
/// literal parses as a number, numeric equality. Quoting was discarded
/// at compile time, so `'5'` matches the number `5` exactly as the
/// unquoted `5` matches the text `"5"`.
#[allow(clippy::float_cmp)] // exact equality is the defined semantics
fn eval_literal(literal: &Literal, value: &Value) -> Option<Partial> {
    let matched = match literal {
        Literal::Wildcard => true,
        Literal::Text(text) => match value {
            Value::Text(s) => s == text,
            Value::Number(n) => text.parse::<f64>().is_ok_and(|parsed| parsed == *n),
            _ => false,
        },
    };
    matched.then(Partial::leaf)
}
