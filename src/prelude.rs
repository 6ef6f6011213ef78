//! Prelude module for convenient imports
//!
//! ```
//! use combinol::prelude::*;
//! ```
//!
//! # Re-exported Items
//!
//! ## Core Types
//! - [`Parser`] - Parser handle and combinator methods
//! - [`Ref`] - Forward reference for recursive rules
//! - [`Position`] - Line/column position
//! - [`Mark`] - Value bracketed by positions
//!
//! ## Constructors
//! - [`literal()`], [`regex()`], [`char_if()`], [`char_run()`], [`any_char()`]
//! - [`sequence()`], [`alternative()`], [`seq2()`], [`sep_by()`], [`deferred()`]
//!
//! ## Error Handling
//! - [`ParseFailure`] - Furthest failure of a parse
//! - [`GrammarError`] - Problems building a parser

// ============================================================================
// Core Types
// ============================================================================

pub use crate::portable::{Mark, Parser, ParserConfig, Position, Ref};

// ============================================================================
// Constructors
// ============================================================================

pub use crate::portable::{
    alternative, any_char, char_if, char_run, deferred, digit, digits, end_of_input, fail,
    letter, letters, literal, lookahead, none_of, not_followed_by, one_of, optional_whitespace,
    position, regex, regex_group, rest_of_input, sep_by, sep_by1, seq2, seq3, seq4, sequence,
    succeed, take_while, whitespace,
};

// ============================================================================
// Error Handling
// ============================================================================

pub use crate::portable::{format_error, GrammarError, ParseError, ParseFailure};
