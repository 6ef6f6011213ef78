//! Error types and human-readable diagnostics
//!
//! A failed parse surfaces as a [`ParseFailure`]: the single deepest failure
//! position together with everything that was expected there.
//!
//! # Example Output
//!
//! ```text
//! expected one of ')', /[a-z]+/ at line 2 column 4, got '...foo bar baz...'
//! expected ')', got the end of the input
//! ```

use super::source_location::Position;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of input characters shown after the failure position
pub const SNIPPET_WIDTH: usize = 12;

/// Ellipsis marker used around truncated snippets
pub const ELLIPSIS: &str = "...";

/// A parse that did not match, reported at its furthest failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseFailure {
    /// Where the deepest failure happened
    pub position: Position,
    /// What was expected there, sorted case-insensitively
    pub expected: Vec<String>,
}

impl ParseFailure {
    /// Create a new failure
    pub fn new(position: Position, expected: Vec<String>) -> Self {
        Self { position, expected }
    }

    /// Render this failure against the input it came from
    pub fn format(&self, input: &str) -> String {
        format_error(input, &self.position, &self.expected)
    }
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expected {} at {}",
            format_expected(&self.expected),
            self.position
        )
    }
}

impl std::error::Error for ParseFailure {}

/// Error type for configured parse operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The grammar did not match the input
    Failed(ParseFailure),

    /// Input exceeds maximum allowed size
    InputTooLarge {
        /// Size of the input in bytes
        input_size: usize,
        /// Maximum allowed size
        max_size: usize,
    },
}

impl ParseError {
    /// The underlying match failure, if that is what this is
    pub fn failure(&self) -> Option<&ParseFailure> {
        match self {
            ParseError::Failed(failure) => Some(failure),
            ParseError::InputTooLarge { .. } => None,
        }
    }
}

impl From<ParseFailure> for ParseError {
    fn from(failure: ParseFailure) -> Self {
        ParseError::Failed(failure)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Failed(failure) => write!(f, "Parse failed: {}", failure),
            ParseError::InputTooLarge {
                input_size,
                max_size,
            } => {
                write!(
                    f,
                    "Input too large: {} bytes exceeds limit of {} bytes",
                    input_size, max_size
                )
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Failed(failure) => Some(failure),
            ParseError::InputTooLarge { .. } => None,
        }
    }
}

/// Problems detected while building a parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    /// The regular expression does not compile
    InvalidRegex {
        /// Pattern as given
        pattern: String,
        /// Compiler message
        reason: String,
    },

    /// The requested capture group does not exist in the pattern
    InvalidGroup {
        /// Pattern as given
        pattern: String,
        /// Requested group
        group: usize,
        /// Number of groups available, including group 0
        groups: usize,
    },

    /// A reference was assigned a second time
    ReferenceAlreadySet,
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarError::InvalidRegex { pattern, reason } => {
                write!(f, "Invalid regex /{}/: {}", pattern, reason)
            }
            GrammarError::InvalidGroup {
                pattern,
                group,
                groups,
            } => {
                write!(
                    f,
                    "Invalid match group {} in /{}/ (valid groups are 0 to {})",
                    group,
                    pattern,
                    groups.saturating_sub(1)
                )
            }
            GrammarError::ReferenceAlreadySet => {
                write!(f, "Reference has already been assigned a parser")
            }
        }
    }
}

impl std::error::Error for GrammarError {}

/// Render the expected set: a single entry verbatim, several as "one of"
pub fn format_expected(expected: &[String]) -> String {
    match expected {
        [single] => single.clone(),
        _ => format!("one of {}", expected.join(", ")),
    }
}

/// Render a diagnostic for `input` failing at `position`
///
/// At end of input the message ends with "got the end of the input";
/// otherwise it names the line and column and shows up to
/// [`SNIPPET_WIDTH`] characters from the failure offset, with ellipsis
/// markers where the snippet is cut.
pub fn format_error(input: &str, position: &Position, expected: &[String]) -> String {
    let got = if position.is_end_of(input) {
        ", got the end of the input".to_string()
    } else {
        let rest = input.get(position.offset..).unwrap_or_default();
        let snippet: String = rest.chars().take(SNIPPET_WIDTH).collect();
        let prefix = if position.offset > 0 { ELLIPSIS } else { "" };
        let suffix = if rest.chars().count() > SNIPPET_WIDTH {
            ELLIPSIS
        } else {
            ""
        };
        format!(
            " at line {} column {}, got '{}{}{}'",
            position.line, position.column, prefix, snippet, suffix
        )
    };

    format!("expected {}{}", format_expected(expected), got)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_format_single_expected() {
        let input = "abc";
        let msg = format_error(input, &Position::start(), &strings(&["/[0-9]+/"]));
        assert_eq!(msg, "expected /[0-9]+/ at line 1 column 1, got 'abc'");
    }

    #[test]
    fn test_format_several_expected() {
        let input = "x";
        let msg = format_error(input, &Position::start(), &strings(&["'a'", "'b'"]));
        assert_eq!(msg, "expected one of 'a', 'b' at line 1 column 1, got 'x'");
    }

    #[test]
    fn test_format_end_of_input() {
        let input = "(aa";
        let pos = Position::from_offset(input, 3);
        let msg = format_error(input, &pos, &strings(&["')'"]));
        assert_eq!(msg, "expected ')', got the end of the input");
    }

    #[test]
    fn test_format_snippet_ellipses() {
        let input = "0123456789abcdefghij";
        let pos = Position::from_offset(input, 2);
        let msg = format_error(input, &pos, &strings(&["x"]));
        assert_eq!(msg, "expected x at line 1 column 3, got '...23456789abcd...'");

        let pos = Position::from_offset(input, 10);
        let msg = format_error(input, &pos, &strings(&["x"]));
        assert_eq!(msg, "expected x at line 1 column 11, got '...abcdefghij'");
    }

    #[test]
    fn test_failure_display() {
        let failure = ParseFailure::new(Position::new(4, 2, 1), strings(&["'a'"]));
        assert_eq!(failure.to_string(), "expected 'a' at line 2 column 1");
    }

    #[test]
    fn test_parse_error_source() {
        use std::error::Error;

        let err: ParseError = ParseFailure::new(Position::start(), strings(&["x"])).into();
        assert!(err.source().is_some());
        assert!(err.failure().is_some());

        let err = ParseError::InputTooLarge {
            input_size: 10,
            max_size: 5,
        };
        assert!(err.source().is_none());
        assert_eq!(
            err.to_string(),
            "Input too large: 10 bytes exceeds limit of 5 bytes"
        );
    }

    #[test]
    fn test_grammar_error_display() {
        let err = GrammarError::InvalidGroup {
            pattern: "(a)".to_string(),
            group: 3,
            groups: 2,
        };
        assert_eq!(
            err.to_string(),
            "Invalid match group 3 in /(a)/ (valid groups are 0 to 1)"
        );
    }
}
