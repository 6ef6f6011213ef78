//! Portable combinator core
//!
//! # Module Organization
//!
//! ## Core Types
//! - [`Parser`] - Opaque parser handle with combinator methods
//! - [`Position`] - Line/column position derived from a byte offset
//! - [`Ref`] - Single-assignment forward reference for recursive grammars
//!
//! ## Building Parsers
//! - [`primitives`] - Literal, regex, character and positional primitives
//! - [`combinators`] - Sequencing, alternation and separated lists
//! - [`reference`] - Forward references and deferred construction
//! - [`char_class`] - Character classes behind the named sugar parsers
//!
//! ## Error Handling
//! - [`error`] - Parse failures, grammar errors and diagnostic rendering
//!
//! ## Batch Parsing
//! - [`parallel`] - Parse many inputs with one grammar

/// Logging macros - no-op when logging feature is disabled
#[cfg(not(feature = "logging"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

/// Logging macros - use log crate when logging feature is enabled
#[cfg(feature = "logging")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

// ============================================================================
// Module Declarations
// ============================================================================

pub mod char_class;
pub mod combinators;
pub mod error;
pub mod parallel;
pub mod parser;
pub mod primitives;
pub mod reference;
pub mod regex_cache;
mod reply;
pub mod source_location;

// ============================================================================
// Core Types
// ============================================================================

pub use parser::{Mark, Parser, ParserConfig};
pub use reference::{deferred, Ref};
pub use source_location::Position;

// ============================================================================
// Error Handling
// ============================================================================

pub use error::{format_error, GrammarError, ParseError, ParseFailure};

// ============================================================================
// Constructors
// ============================================================================

pub use combinators::{
    alternative, lookahead, not_followed_by, sep_by, sep_by1, seq2, seq3, seq4, sequence,
};
pub use primitives::{
    any_char, char_if, char_run, digit, digits, end_of_input, fail, letter, letters, literal,
    none_of, one_of, optional_whitespace, position, regex, regex_group, rest_of_input, succeed,
    take_while, whitespace,
};

// ============================================================================
// Batch Parsing
// ============================================================================

pub use parallel::{parse_batch, parse_batch_owned};
