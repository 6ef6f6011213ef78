//! Combinol - Parser Combinators with Furthest-Failure Diagnostics
//!
//! A small set of primitive parsers and higher-order combinators that
//! compose into recursive-descent parsers over a string. A parse yields
//! either a value or one diagnostic describing the deepest point any
//! alternative reached, with every expectation recorded there.
//!
//! ## Quick Start
//!
//! ```rust
//! use combinol::prelude::*;
//!
//! let number = regex("[0-9]+").unwrap().map(|s| s.parse::<i64>().unwrap_or(0));
//! let sum = sep_by1(number, literal("+").trim(optional_whitespace()))
//!     .map(|terms| terms.iter().sum::<i64>());
//!
//! assert_eq!(sum.parse("1 + 2 + 39").unwrap(), 42);
//!
//! let input = "1 + + 2";
//! let failure = sum.parse(input).unwrap_err();
//! assert_eq!(
//!     failure.format(input),
//!     "expected /[0-9]+/ at line 1 column 5, got '...+ 2'"
//! );
//! ```
//!
//! ## Feature Flags
//!
//! - `logging` - Enable debug logging using the `log` crate
//! - `parallel` - Parse batches of inputs in parallel with rayon

// Lint configuration for production quality
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all)]
#![allow(clippy::new_without_default)]

// Prelude module for convenient imports
pub mod prelude;

pub mod portable;

/// Re-export commonly used types for convenience
pub use portable::{
    alternative, deferred, format_error, literal, regex, sequence, GrammarError, Mark,
    ParseError, ParseFailure, Parser, ParserConfig, Position, Ref,
};
