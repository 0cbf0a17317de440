use std::collections::BTreeMap;
use std::fmt;

/// A dynamically-typed runtime value that patterns match against.
///
/// A closed union: every value a matcher or dispatcher can see is one of
/// these five shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The absent value.
    Null,
    /// A double-precision number.
    Number(f64),
    /// A text string.
    Text(String),
    /// An ordered sequence of values.
    Sequence(Vec<Self>),
    /// A keyed record of values.
    Record(BTreeMap<String, Self>),
}

impl Value {
    /// Build a sequence value from anything iterable.
    #[must_use]
    pub fn sequence(items: impl IntoIterator<Item = Self>) -> Self {
        Self::Sequence(items.into_iter().collect())
    }

    /// Build a record value from key/value pairs.
    #[must_use]
    pub fn record<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Self>,
    {
        Self::Record(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Return the elements if this is a sequence.
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Self]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Return the entries if this is a record.
    #[must_use]
    pub const fn as_record(&self) -> Option<&BTreeMap<String, Self>> {
        match self {
            Self::Record(entries) => Some(entries),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<Self>> for Value {
    fn from(items: Vec<Self>) -> Self {
        Self::Sequence(items)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::Sequence(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Record(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors() {
        let seq = Value::sequence([Value::Number(1.0), Value::from("a")]);
        assert_eq!(
            seq,
            Value::Sequence(vec![Value::Number(1.0), Value::Text("a".to_string())])
        );

        let rec = Value::record([("x", 1i64), ("y", 2i64)]);
        assert_eq!(rec.as_record().map(BTreeMap::len), Some(2));
    }

    #[test]
    fn accessors() {
        assert!(Value::Null.is_null());
        assert_eq!(Value::Number(5.0).as_number(), Some(5.0));
        assert_eq!(Value::from("hi").as_text(), Some("hi"));
        assert_eq!(Value::Number(5.0).as_sequence(), None);
    }

    #[test]
    fn display() {
        let value = Value::sequence([
            Value::Number(1.0),
            Value::record([("a", Value::from("x"))]),
            Value::Null,
        ]);
        assert_eq!(value.to_string(), "[1, {a: x}, null]");
    }
}
