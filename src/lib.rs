//! Erlang-style structural pattern matching over dynamic values.
//!
//! A textual pattern is compiled once (tokenizer, recursive-descent
//! parser, pattern AST) into a reusable [`Matcher`]; several patterns
//! plus handlers compose into an ordered first-match [`Dispatcher`].
//!
//! The pattern mini-language supports literals (`5`, `-2.5`, `'text'`),
//! `_` wildcards, bare identifiers as variable bindings, sequence
//! literals (`[]`, `[x]`, `[a, b]`), `head::tail` cons splits, and
//! record literals (`{}`, `{a, b}`) with strict key arity.
//!
//! # Quick start
//!
//! ## Match a single pattern
//!
//! ```
//! use casematch::{Matcher, Value};
//!
//! let matcher = Matcher::compile("h::t").unwrap();
//! let result = matcher.apply(&Value::sequence([
//!     Value::Number(1.0),
//!     Value::Number(2.0),
//!     Value::Number(3.0),
//! ]));
//!
//! assert!(result.matched);
//! assert_eq!(result.bindings[0], Value::Number(1.0));
//! assert_eq!(
//!     result.bindings[1],
//!     Value::sequence([Value::Number(2.0), Value::Number(3.0)])
//! );
//! ```
//!
//! ## Dispatch over ordered arms
//!
//! ```
//! use casematch::{Dispatcher, Value};
//!
//! let dispatcher = Dispatcher::builder()
//!     .arm("[]", |_| "empty".to_string())
//!     .arm("h::t", |env| format!("starts with {}", env[0]))
//!     .arm("_", |_| "something else".to_string())
//!     .build()
//!     .unwrap();
//!
//! let value = Value::sequence([Value::Number(1.0), Value::Number(2.0)]);
//! assert_eq!(dispatcher.dispatch(&value).unwrap(), "starts with 1");
//! assert_eq!(dispatcher.dispatch(&Value::Null).unwrap(), "something else");
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod ast;
pub mod dispatch;
pub mod lexer;
pub mod matcher;
pub mod parser;
pub mod token;
pub mod value;

pub use ast::{Literal, Pattern};
pub use dispatch::{ComposeError, Dispatcher, DispatcherBuilder, NonExhaustiveMatch};
pub use lexer::{LexError, LexErrorKind, tokenize};
pub use matcher::{MatchResult, Matcher};
pub use parser::{ParseError, ParseErrorKind, parse};
pub use token::{Token, TokenKind};
pub use value::Value;

/// Unified pattern-compilation error covering both lexing and parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A lexer error.
    #[error("{0}")]
    Lex(#[from] LexError),
    /// A parser error.
    #[error("{0}")]
    Parse(#[from] ParseError),
}

/// Compile a pattern string into a reusable [`Matcher`] in one step.
pub fn compile(pattern: &str) -> Result<Matcher, Error> {
    Matcher::compile(pattern)
}
