use std::fmt;

use crate::Error;
use crate::matcher::Matcher;
use crate::value::Value;

/// Error raised while composing a dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComposeError {
    /// A pattern did not compile; no dispatcher is returned.
    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: Error,
    },
    /// Two arms declare textually identical patterns.
    #[error("duplicate pattern declaration: `{pattern}`")]
    DuplicatePattern { pattern: String },
}

/// Error raised at invocation time when no arm matched the value.
///
/// The usual mitigation is a trailing `_` arm, which matches anything.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("non-exhaustive match: no pattern matched the value (add a trailing `_` arm)")]
pub struct NonExhaustiveMatch;

type HandlerFn<T> = Box<dyn Fn(&[Value]) -> T>;

struct Arm<T> {
    matcher: Matcher,
    handler: HandlerFn<T>,
}

/// An ordered dispatch table of compiled patterns and handlers.
///
/// Arms are tried in declaration order; the first structural match wins
/// and its handler receives the bound environment. The table is built
/// once and read-only afterwards.
pub struct Dispatcher<T> {
    arms: Vec<Arm<T>>,
}

/// Collects `(pattern, handler)` arms, then compiles them all at once.
pub struct DispatcherBuilder<T> {
    arms: Vec<(String, HandlerFn<T>)>,
}

impl<T> DispatcherBuilder<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self { arms: Vec::new() }
    }

    /// Append an arm. Order is significant: earlier arms win.
    #[must_use]
    pub fn arm(
        mut self,
        pattern: impl Into<String>,
        handler: impl Fn(&[Value]) -> T + 'static,
    ) -> Self {
        self.arms.push((pattern.into(), Box::new(handler)));
        self
    }

    /// Compile every arm into a dispatcher.
    ///
    /// Duplicates are detected first, over the whole list, so two
    /// identical arms report `DuplicatePattern` even when the pattern
    /// text itself is invalid.
    ///
    /// # Errors
    ///
    /// Returns `ComposeError` on a duplicate pattern declaration or a
    /// pattern that does not compile. No partial dispatcher is built.
    pub fn build(self) -> Result<Dispatcher<T>, ComposeError> {
        for (index, (pattern, _)) in self.arms.iter().enumerate() {
            if self.arms[..index].iter().any(|(earlier, _)| earlier == pattern) {
                return Err(ComposeError::DuplicatePattern {
                    pattern: pattern.clone(),
                });
            }
        }

        let arms = self
            .arms
            .into_iter()
            .map(|(pattern, handler)| {
                Matcher::compile(&pattern)
                    .map(|matcher| Arm { matcher, handler })
                    .map_err(|source| ComposeError::InvalidPattern { pattern, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Dispatcher { arms })
    }
}

impl<T> Default for DispatcherBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Dispatcher<T> {
    #[must_use]
    pub const fn builder() -> DispatcherBuilder<T> {
        DispatcherBuilder::new()
    }

    /// Dispatch a value: first matching arm wins, its handler is
    /// invoked with the bound environment in source order, and later
    /// arms are never evaluated.
    ///
    /// # Errors
    ///
    /// Returns `NonExhaustiveMatch` when no arm matched.
    pub fn dispatch(&self, value: &Value) -> Result<T, NonExhaustiveMatch> {
        for arm in &self.arms {
            let outcome = arm.matcher.apply(value);
            if outcome.matched {
                return Ok((arm.handler)(&outcome.bindings));
            }
        }
        Err(NonExhaustiveMatch)
    }

    /// The arm patterns, in declaration order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.arms.iter().map(|arm| arm.matcher.source())
    }
}

impl<T> fmt::Debug for Dispatcher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.patterns()).finish()
    }
}
