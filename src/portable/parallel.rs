//! Parallel batch parsing
//!
//! Parsers carry no per-call state, so one grammar can parse many
//! independent inputs at once.
//!
//! # Feature Flag
//!
//! Work is spread across threads with rayon when the `parallel` feature is
//! enabled; otherwise inputs are parsed sequentially.
//!
//! ```toml
//! [dependencies]
//! combinol = { version = "0.1", features = ["parallel"] }
//! ```
//!
//! # Example
//!
//! ```rust
//! use combinol::prelude::*;
//! use combinol::portable::parallel::parse_batch;
//!
//! let number = regex("[0-9]+").unwrap();
//! let results = parse_batch(&number, &["1", "x", "42"]);
//!
//! assert!(results[0].is_ok());
//! assert!(results[1].is_err());
//! assert_eq!(results[2].as_deref(), Ok("42"));
//! ```

use super::{error::ParseFailure, parser::Parser};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Parse every input with `parser`; results keep the input order
#[cfg(feature = "rayon")]
pub fn parse_batch<T>(parser: &Parser<T>, inputs: &[&str]) -> Vec<Result<T, ParseFailure>>
where
    T: Send + 'static,
{
    inputs.par_iter().map(|input| parser.parse(input)).collect()
}

/// Parse every input with `parser`; results keep the input order
#[cfg(not(feature = "rayon"))]
pub fn parse_batch<T>(parser: &Parser<T>, inputs: &[&str]) -> Vec<Result<T, ParseFailure>>
where
    T: Send + 'static,
{
    inputs.iter().map(|input| parser.parse(input)).collect()
}

/// Parse owned inputs with `parser`; results keep the input order
#[cfg(feature = "rayon")]
pub fn parse_batch_owned<T>(parser: &Parser<T>, inputs: Vec<String>) -> Vec<Result<T, ParseFailure>>
where
    T: Send + 'static,
{
    inputs
        .into_par_iter()
        .map(|input| parser.parse(&input))
        .collect()
}

/// Parse owned inputs with `parser`; results keep the input order
#[cfg(not(feature = "rayon"))]
pub fn parse_batch_owned<T>(parser: &Parser<T>, inputs: Vec<String>) -> Vec<Result<T, ParseFailure>>
where
    T: Send + 'static,
{
    inputs.iter().map(|input| parser.parse(input)).collect()
}
