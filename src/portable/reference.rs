//! Forward references for recursive grammars
//!
//! A [`Ref`] is a single-assignment cell: hand out its parser while building
//! the rules that mention it, then [`Ref::set`] it to the finished rule
//! before parsing. [`deferred`] does the same without an explicit cell by
//! building the real parser on first use.
//!
//! Both form a reference cycle once the grammar mentions itself, so a
//! recursive grammar lives until the process ends. Grammars are meant to be
//! built once and reused.
//!
//! # Example
//!
//! ```rust
//! use combinol::prelude::*;
//!
//! // list := '(' (letter | list)* ')'
//! let list: Ref<Vec<String>> = Ref::new();
//! let item = alternative(vec![
//!     letter().map(|c| c.to_string()),
//!     list.parser().map(|inner| format!("[{}]", inner.join(""))),
//! ]);
//! list.set(item.many().wrap(literal("("), literal(")"))).unwrap();
//!
//! let parsed = list.parser().parse("(a(bc)d)").unwrap();
//! assert_eq!(parsed, vec!["a", "[bc]", "d"]);
//! ```

use super::{error::GrammarError, parser::Parser, reply::Reply};
use std::sync::{Arc, OnceLock};

/// Expectation reported when an unassigned reference is run
pub const UNASSIGNED_REFERENCE: &str = "used reference before assignment";

/// A forward-declared parser, assigned exactly once
pub struct Ref<T> {
    cell: Arc<OnceLock<Parser<T>>>,
}

impl<T> Clone for Ref<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Arc::clone(&self.cell),
        }
    }
}

impl<T: 'static> Ref<T> {
    /// Create an unassigned reference
    pub fn new() -> Self {
        Self {
            cell: Arc::new(OnceLock::new()),
        }
    }

    /// Whether [`Ref::set`] has been called
    pub fn is_set(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Assign the parser this reference stands for
    ///
    /// A second assignment is rejected and leaves the first one in place.
    pub fn set(&self, parser: Parser<T>) -> Result<(), GrammarError> {
        self.cell.set(parser).map_err(|_| {
            log_debug!("rejected second assignment to a reference");
            GrammarError::ReferenceAlreadySet
        })
    }

    /// A parser that dispatches to the assigned parser
    ///
    /// Before assignment it fails with [`UNASSIGNED_REFERENCE`].
    pub fn parser(&self) -> Parser<T> {
        let cell = Arc::clone(&self.cell);
        let unassigned: Arc<str> = Arc::from(UNASSIGNED_REFERENCE);
        Parser::from_fn(move |input, index| match cell.get() {
            Some(parser) => parser.run(input, index),
            None => {
                log_debug!("reference used before assignment at offset {}", index);
                Reply::failure(index, Arc::clone(&unassigned))
            }
        })
    }
}

impl<T: 'static> Default for Ref<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> From<&Ref<T>> for Parser<T> {
    fn from(reference: &Ref<T>) -> Self {
        reference.parser()
    }
}

/// Build the real parser on first use and delegate to it afterwards
///
/// `build` runs at most once; concurrent first uses wait for it.
///
/// # Example
///
/// ```rust
/// use combinol::prelude::*;
///
/// fn nested() -> Parser<usize> {
///     alternative(vec![
///         deferred(nested).wrap(literal("["), literal("]")).map(|depth| depth + 1),
///         succeed(0),
///     ])
/// }
///
/// assert_eq!(nested().parse("[[[]]]").unwrap(), 3);
/// ```
pub fn deferred<T, F>(build: F) -> Parser<T>
where
    T: 'static,
    F: Fn() -> Parser<T> + Send + Sync + 'static,
{
    let cell: OnceLock<Parser<T>> = OnceLock::new();
    Parser::from_fn(move |input, index| cell.get_or_init(&build).run(input, index))
}
