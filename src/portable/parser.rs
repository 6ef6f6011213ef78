//! The parser handle and its combinator methods
//!
//! A [`Parser<T>`] is an opaque, cheaply clonable handle over an action
//! `(input, offset) -> Reply<T>`. Building parsers never touches input;
//! nothing runs until [`Parser::parse`] drives one synchronous descent.

use super::{
    combinators::{alternative, seq2, seq3},
    error::{ParseError, ParseFailure},
    primitives::{end_of_input, position},
    reply::{sort_expected, Furthest, Outcome, Reply},
    source_location::Position,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Default maximum input size: 100 MB
pub const DEFAULT_MAX_INPUT_SIZE: usize = 100 * 1024 * 1024;

type Action<T> = dyn Fn(&str, usize) -> Reply<T> + Send + Sync;

/// A composable parser producing values of type `T`
///
/// Cloning a parser shares the underlying action. Parsers hold no per-call
/// state, so one grammar can be used from many threads at once.
pub struct Parser<T> {
    action: Arc<Action<T>>,
}

impl<T> Clone for Parser<T> {
    fn clone(&self) -> Self {
        Self {
            action: Arc::clone(&self.action),
        }
    }
}

impl<T> fmt::Debug for Parser<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("action", &Arc::as_ptr(&self.action))
            .finish()
    }
}

/// A value bracketed by the positions it was parsed between
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mark<T> {
    /// Position before the value
    pub start: Position,
    /// The parsed value
    pub value: T,
    /// Position after the value
    pub end: Position,
}

/// Configuration options for parsing
///
/// # Example
///
/// ```rust
/// use combinol::portable::parser::ParserConfig;
///
/// let config = ParserConfig::new().with_max_input_size(10 * 1024 * 1024);
/// assert_eq!(config.max_input_size, 10 * 1024 * 1024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum allowed input size in bytes
    pub max_input_size: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_input_size: DEFAULT_MAX_INPUT_SIZE,
        }
    }
}

impl ParserConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum input size
    pub fn with_max_input_size(mut self, size: usize) -> Self {
        self.max_input_size = size;
        self
    }
}

impl<T: 'static> Parser<T> {
    /// Wrap an action
    pub(crate) fn from_fn<F>(action: F) -> Self
    where
        F: Fn(&str, usize) -> Reply<T> + Send + Sync + 'static,
    {
        Self {
            action: Arc::new(action),
        }
    }

    /// Run the action at `index`
    #[inline]
    pub(crate) fn run(&self, input: &str, index: usize) -> Reply<T> {
        (self.action)(input, index)
    }

    // ========================================================================
    // Entry points
    // ========================================================================

    /// Parse the whole of `input`
    ///
    /// Trailing input is an error: the parser is run followed by
    /// `end_of_input`. On failure the furthest failure position and its
    /// sorted expected set are reported.
    ///
    /// # Example
    ///
    /// ```rust
    /// use combinol::prelude::*;
    ///
    /// let digits = regex("[0-9]+").unwrap();
    /// assert_eq!(digits.parse("123").unwrap(), "123");
    ///
    /// let failure = digits.parse("abc").unwrap_err();
    /// assert_eq!(failure.position.offset, 0);
    /// assert_eq!(failure.expected, vec!["/[0-9]+/".to_string()]);
    /// ```
    pub fn parse(&self, input: &str) -> Result<T, ParseFailure> {
        let reply = self.clone().skip(end_of_input()).run(input, 0);
        match reply.outcome {
            Outcome::Success { value, .. } => {
                log_debug!("parse succeeded on {} bytes", input.len());
                Ok(value)
            }
            Outcome::Failure => {
                let Furthest {
                    offset,
                    mut expected,
                } = reply.furthest;
                sort_expected(&mut expected);
                let position = Position::from_offset(input, offset.unwrap_or(0));
                log_debug!(
                    "parse failed at offset {} expecting {:?}",
                    position.offset,
                    expected
                );
                Err(ParseFailure::new(
                    position,
                    expected.iter().map(|e| e.to_string()).collect(),
                ))
            }
        }
    }

    /// Parse with explicit limits
    pub fn parse_with_config(&self, input: &str, config: &ParserConfig) -> Result<T, ParseError> {
        if input.len() > config.max_input_size {
            log_debug!(
                "rejecting input of {} bytes (limit {})",
                input.len(),
                config.max_input_size
            );
            return Err(ParseError::InputTooLarge {
                input_size: input.len(),
                max_size: config.max_input_size,
            });
        }
        self.parse(input).map_err(ParseError::from)
    }

    // ========================================================================
    // Transformation
    // ========================================================================

    /// Transform the value on success
    pub fn map<U, F>(self, f: F) -> Parser<U>
    where
        U: 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        Parser::from_fn(move |input, index| self.run(input, index).map(&f))
    }

    /// Replace the value on success with a clone of `value`
    pub fn result<U>(self, value: U) -> Parser<U>
    where
        U: Clone + Send + Sync + 'static,
    {
        self.map(move |_| value.clone())
    }

    /// Continue with a parser chosen from the value just parsed
    pub fn chain<U, F>(self, f: F) -> Parser<U>
    where
        U: 'static,
        F: Fn(T) -> Parser<U> + Send + Sync + 'static,
    {
        Parser::from_fn(move |input, index| {
            let reply = self.run(input, index);
            match reply.outcome {
                Outcome::Success { index, value } => {
                    f(value).run(input, index).merge(reply.furthest)
                }
                Outcome::Failure => Reply::failed(reply.furthest),
            }
        })
    }

    /// Replace the expected set on failure with `description`
    ///
    /// The failure offset is left untouched.
    pub fn described_as(self, description: &str) -> Parser<T> {
        let description: Arc<str> = Arc::from(description);
        Parser::from_fn(move |input, index| {
            let mut reply = self.run(input, index);
            if !reply.is_success() {
                reply.furthest.expected = vec![Arc::clone(&description)];
            }
            reply
        })
    }

    // ========================================================================
    // Sequencing
    // ========================================================================

    /// Run `next` after this parser and keep its value
    pub fn then<U: 'static>(self, next: Parser<U>) -> Parser<U> {
        seq2(self, next).map(|(_, b)| b)
    }

    /// Run `next` after this parser and keep this parser's value
    pub fn skip<U: 'static>(self, next: Parser<U>) -> Parser<T> {
        seq2(self, next).map(|(a, _)| a)
    }

    /// Surround this parser with `left` and `right`, keeping the middle
    pub fn wrap<L: 'static, R: 'static>(self, left: Parser<L>, right: Parser<R>) -> Parser<T> {
        seq3(left, self, right).map(|(_, value, _)| value)
    }

    /// Allow `padding` on both sides
    pub fn trim<P: 'static>(self, padding: Parser<P>) -> Parser<T> {
        self.wrap(padding.clone(), padding)
    }

    /// Bracket the value with its start and end positions
    pub fn mark(self) -> Parser<Mark<T>> {
        seq3(position(), self, position()).map(|(start, value, end)| Mark { start, value, end })
    }

    // ========================================================================
    // Alternation
    // ========================================================================

    /// Try this parser, then `other` from the same offset
    pub fn or_else(self, other: Parser<T>) -> Parser<T> {
        alternative(vec![self, other])
    }

    /// Match zero or one time; never fails
    pub fn optional(self) -> Parser<Option<T>> {
        let absent = Parser::from_fn(|_, index| Reply::success(index, None));
        self.map(Some).or_else(absent)
    }

    // ========================================================================
    // Repetition
    // ========================================================================

    /// Repeat between `min` and `max` times (`None` = unbounded)
    ///
    /// The first `min` matches are required. After that, matching stops at
    /// the first failure, whose context is kept for diagnostics. A `max`
    /// below `min` is treated as `min`. An unbounded repetition also stops
    /// once the child succeeds without consuming input.
    pub fn repeat(self, min: usize, max: Option<usize>) -> Parser<Vec<T>> {
        let max = max.map(|m| m.max(min));
        Parser::from_fn(move |input, start| {
            let mut values = Vec::new();
            let mut context = Furthest::none();
            let mut index = start;

            for _ in 0..min {
                let reply = self.run(input, index).merge(context);
                match reply.outcome {
                    Outcome::Success { index: next, value } => {
                        index = next;
                        values.push(value);
                        context = reply.furthest;
                    }
                    Outcome::Failure => return Reply::failed(reply.furthest),
                }
            }

            let mut remaining = max.map(|m| m - min);
            while remaining != Some(0) {
                let reply = self.run(input, index).merge(context);
                context = reply.furthest;
                match reply.outcome {
                    Outcome::Success { index: next, value } => {
                        let stalled = next == index && max.is_none();
                        index = next;
                        values.push(value);
                        if stalled {
                            break;
                        }
                    }
                    Outcome::Failure => break,
                }
                remaining = remaining.map(|r| r - 1);
            }

            Reply {
                outcome: Outcome::Success {
                    index,
                    value: values,
                },
                furthest: context,
            }
        })
    }

    /// Match exactly `n` times
    pub fn times(self, n: usize) -> Parser<Vec<T>> {
        self.repeat(n, Some(n))
    }

    /// Match zero or more times
    pub fn many(self) -> Parser<Vec<T>> {
        self.repeat(0, None)
    }

    /// Match one or more times
    pub fn many1(self) -> Parser<Vec<T>> {
        self.at_least(1)
    }

    /// Match at most `n` times
    pub fn at_most(self, n: usize) -> Parser<Vec<T>> {
        self.repeat(0, Some(n))
    }

    /// Match at least `n` times: exactly `n`, then as many more as possible
    pub fn at_least(self, n: usize) -> Parser<Vec<T>> {
        seq2(self.clone().times(n), self.many()).map(|(mut required, rest)| {
            required.extend(rest);
            required
        })
    }

    /// Zero or more of this parser separated by `sep`
    pub fn sep_by<S: 'static>(self, sep: Parser<S>) -> Parser<Vec<T>> {
        super::combinators::sep_by(self, sep)
    }

    /// One or more of this parser separated by `sep`
    pub fn sep_by1<S: 'static>(self, sep: Parser<S>) -> Parser<Vec<T>> {
        super::combinators::sep_by1(self, sep)
    }
}

impl<T: 'static> Parser<Option<T>> {
    /// Replace an absent value with `default()`
    pub fn with_default<F>(self, default: F) -> Parser<T>
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.map(move |value| value.unwrap_or_else(&default))
    }
}

impl<F: 'static> Parser<F> {
    /// Apply the parsed function to the value parsed by `arg`
    pub fn apply<A, B>(self, arg: Parser<A>) -> Parser<B>
    where
        A: 'static,
        B: 'static,
        F: Fn(A) -> B,
    {
        seq2(self, arg).map(|(f, a)| f(a))
    }
}
