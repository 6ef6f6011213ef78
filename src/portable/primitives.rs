//! Primitive parsers
//!
//! Leaf constructors. Each action looks only at the input from its own
//! starting offset and ignores any earlier state.

use super::{
    char_class::{CharClass, CharSet},
    error::GrammarError,
    parser::Parser,
    regex_cache,
    reply::{Outcome, Reply},
    source_location::Position,
};
use std::sync::Arc;

/// Match a literal string; the expected text is the literal in single quotes
///
/// # Example
///
/// ```rust
/// use combinol::prelude::*;
///
/// assert_eq!(literal("let").parse("let").unwrap(), "let");
/// assert!(literal("let").parse("let x").is_err());
/// ```
pub fn literal(text: &str) -> Parser<String> {
    let text = text.to_string();
    let expected: Arc<str> = Arc::from(format!("'{}'", text));
    Parser::from_fn(move |input, index| {
        if input[index..].starts_with(text.as_str()) {
            Reply::success(index + text.len(), text.clone())
        } else {
            Reply::failure(index, Arc::clone(&expected))
        }
    })
}

/// Match a regular expression anchored at the current offset
///
/// The expected text is the pattern between slashes, e.g. `/[0-9]+/`.
pub fn regex(pattern: &str) -> Result<Parser<String>, GrammarError> {
    regex_group(pattern, 0)
}

/// Match a regular expression and yield capture `group`
///
/// Parsing advances past the whole match. A group that does not take part
/// in the match yields an empty string.
pub fn regex_group(pattern: &str, group: usize) -> Result<Parser<String>, GrammarError> {
    let re = regex_cache::get_or_compile(pattern).map_err(|e| GrammarError::InvalidRegex {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;

    // The anchoring wrapper is a non-capturing group, so indices line up
    let groups = re.captures_len();
    if group >= groups {
        return Err(GrammarError::InvalidGroup {
            pattern: pattern.to_string(),
            group,
            groups,
        });
    }

    let expected: Arc<str> = Arc::from(format!("/{}/", pattern));
    Ok(Parser::from_fn(move |input, index| {
        match re.captures(&input[index..]) {
            Some(caps) => {
                let end = caps.get(0).map_or(0, |m| m.end());
                let value = caps.get(group).map_or("", |m| m.as_str());
                Reply::success(index + end, value.to_string())
            }
            None => Reply::failure(index, Arc::clone(&expected)),
        }
    }))
}

/// Match one character satisfying `predicate`
///
/// Fails with "a character matching predicate"; use
/// [`Parser::described_as`] for a better name.
pub fn char_if<F>(predicate: F) -> Parser<char>
where
    F: Fn(char) -> bool + Send + Sync + 'static,
{
    single_char(predicate, "a character matching predicate")
}

fn single_char<F>(predicate: F, description: &str) -> Parser<char>
where
    F: Fn(char) -> bool + Send + Sync + 'static,
{
    let expected: Arc<str> = Arc::from(description);
    Parser::from_fn(move |input, index| match input[index..].chars().next() {
        Some(c) if predicate(c) => Reply::success(index + c.len_utf8(), c),
        _ => Reply::failure(index, Arc::clone(&expected)),
    })
}

/// Match one character from `chars`
pub fn one_of(chars: &str) -> Parser<char> {
    let set = CharSet::new(chars);
    single_char(move |c| set.contains(c), &format!("one of '{}'", chars))
}

/// Match one character not in `chars`
pub fn none_of(chars: &str) -> Parser<char> {
    let set = CharSet::new(chars);
    single_char(move |c| !set.contains(c), &format!("none of '{}'", chars))
}

/// Consume the longest (possibly empty) run of characters satisfying
/// `predicate`; always succeeds
pub fn char_run<F>(predicate: F) -> Parser<String>
where
    F: Fn(char) -> bool + Send + Sync + 'static,
{
    Parser::from_fn(move |input, index| {
        let rest = &input[index..];
        let len = rest
            .char_indices()
            .find(|&(_, c)| !predicate(c))
            .map_or(rest.len(), |(i, _)| i);
        Reply::success(index + len, rest[..len].to_string())
    })
}

/// Alias of [`char_run`]
pub fn take_while<F>(predicate: F) -> Parser<String>
where
    F: Fn(char) -> bool + Send + Sync + 'static,
{
    char_run(predicate)
}

/// Match any single character
pub fn any_char() -> Parser<char> {
    single_char(CharClass::Any.predicate(), CharClass::Any.description())
}

/// Consume everything that is left; always succeeds
pub fn rest_of_input() -> Parser<String> {
    Parser::from_fn(|input: &str, index| Reply::success(input.len(), input[index..].to_string()))
}

/// Succeed without consuming iff no input remains
pub fn end_of_input() -> Parser<()> {
    let expected: Arc<str> = Arc::from("end of input");
    Parser::from_fn(move |input: &str, index| {
        if index < input.len() {
            Reply::failure(index, Arc::clone(&expected))
        } else {
            Reply::success(index, ())
        }
    })
}

/// Yield the current position without consuming
pub fn position() -> Parser<Position> {
    Parser::from_fn(|input, index| Reply::success(index, Position::from_offset(input, index)))
}

/// Succeed with a clone of `value` without consuming
pub fn succeed<T>(value: T) -> Parser<T>
where
    T: Clone + Send + Sync + 'static,
{
    Parser::from_fn(move |_, index| Reply::success(index, value.clone()))
}

/// Fail with `description` without consuming
pub fn fail<T: 'static>(description: &str) -> Parser<T> {
    let expected: Arc<str> = Arc::from(description);
    Parser::from_fn(move |_, index| Reply::failure(index, Arc::clone(&expected)))
}

// ============================================================================
// Named sugar
// ============================================================================

fn class_run(class: CharClass, at_least_one: bool, description: &str) -> Parser<String> {
    let run = char_run(class.predicate());
    if at_least_one {
        let expected: Arc<str> = Arc::from(description);
        Parser::from_fn(move |input, index| {
            let reply = run.run(input, index);
            match reply.outcome {
                Outcome::Success { index: end, .. } if end > index => reply,
                _ => Reply::failure(index, Arc::clone(&expected)),
            }
        })
    } else {
        run.described_as(description)
    }
}

/// One ASCII letter
pub fn letter() -> Parser<char> {
    single_char(CharClass::Letter.predicate(), CharClass::Letter.description())
}

/// Zero or more ASCII letters
pub fn letters() -> Parser<String> {
    class_run(CharClass::Letter, false, "optional letters")
}

/// One ASCII digit
pub fn digit() -> Parser<char> {
    single_char(CharClass::Digit.predicate(), CharClass::Digit.description())
}

/// Zero or more ASCII digits
pub fn digits() -> Parser<String> {
    class_run(CharClass::Digit, false, "optional digits")
}

/// One or more whitespace characters
pub fn whitespace() -> Parser<String> {
    class_run(CharClass::Space, true, CharClass::Space.description())
}

/// Zero or more whitespace characters
pub fn optional_whitespace() -> Parser<String> {
    class_run(CharClass::Space, false, "optional whitespace")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal() {
        assert_eq!(literal("abc").parse("abc"), Ok("abc".to_string()));
        let failure = literal("abc").parse("abd").unwrap_err();
        assert_eq!(failure.position.offset, 0);
        assert_eq!(failure.expected, vec!["'abc'".to_string()]);
    }

    #[test]
    fn test_literal_past_end() {
        let failure = literal("abc").parse("ab").unwrap_err();
        assert_eq!(failure.position.offset, 0);
    }

    #[test]
    fn test_regex() {
        let digits = regex("[0-9]+").unwrap();
        assert_eq!(digits.parse("123"), Ok("123".to_string()));

        let failure = digits.parse("abc").unwrap_err();
        assert_eq!(failure.position, Position::new(0, 1, 1));
        assert_eq!(failure.expected, vec!["/[0-9]+/".to_string()]);
    }

    #[test]
    fn test_regex_anchored_mid_input() {
        let p = literal("x").then(regex("[0-9]+").unwrap());
        assert_eq!(p.parse("x42"), Ok("42".to_string()));
        assert!(p.parse("xa42").is_err());
    }

    #[test]
    fn test_regex_group() {
        let p = regex_group("([a-z]+)=([0-9]+)", 2).unwrap();
        assert_eq!(p.parse("abc=42"), Ok("42".to_string()));

        let p = regex_group("(a)|(b)", 1).unwrap();
        assert_eq!(p.parse("b"), Ok(String::new()));
    }

    #[test]
    fn test_regex_errors() {
        assert!(matches!(
            regex("[oops"),
            Err(GrammarError::InvalidRegex { .. })
        ));
        assert_eq!(
            regex_group("(a)", 2).unwrap_err(),
            GrammarError::InvalidGroup {
                pattern: "(a)".to_string(),
                group: 2,
                groups: 2,
            }
        );
    }

    #[test]
    fn test_char_if() {
        let p = char_if(|c| c.is_uppercase());
        assert_eq!(p.parse("Q"), Ok('Q'));
        let failure = p.parse("q").unwrap_err();
        assert_eq!(
            failure.expected,
            vec!["a character matching predicate".to_string()]
        );
        assert!(p.parse("").is_err());
    }

    #[test]
    fn test_one_of_none_of() {
        assert_eq!(one_of("+-").parse("-"), Ok('-'));
        let failure = one_of("+-").parse("*").unwrap_err();
        assert_eq!(failure.expected, vec!["one of '+-'".to_string()]);

        assert_eq!(none_of("\"").parse("a"), Ok('a'));
        assert!(none_of("\"").parse("\"").is_err());
    }

    #[test]
    fn test_char_run() {
        let p = char_run(|c| c.is_ascii_lowercase());
        assert_eq!(p.parse("abc"), Ok("abc".to_string()));
        assert_eq!(p.parse(""), Ok(String::new()));
        assert_eq!(
            take_while(|c| c != ';').skip(literal(";")).parse("héllo;"),
            Ok("héllo".to_string())
        );
    }

    #[test]
    fn test_any_char_multibyte() {
        assert_eq!(any_char().parse("λ"), Ok('λ'));
        let failure = any_char().parse("").unwrap_err();
        assert_eq!(failure.expected, vec!["any character".to_string()]);
    }

    #[test]
    fn test_rest_and_end() {
        let p = literal("a").then(rest_of_input());
        assert_eq!(p.parse("abc"), Ok("bc".to_string()));
        assert_eq!(end_of_input().parse(""), Ok(()));

        let failure = end_of_input().parse("x").unwrap_err();
        assert_eq!(failure.expected, vec!["end of input".to_string()]);
    }

    #[test]
    fn test_position() {
        let p = literal("ab\nc").then(position());
        assert_eq!(p.parse("ab\nc"), Ok(Position::new(4, 2, 2)));
    }

    #[test]
    fn test_succeed_and_fail() {
        assert_eq!(succeed(7).parse(""), Ok(7));
        let failure = fail::<()>("something else").parse("").unwrap_err();
        assert_eq!(failure.expected, vec!["something else".to_string()]);
    }

    #[test]
    fn test_sugar() {
        assert_eq!(letter().parse("a"), Ok('a'));
        assert_eq!(letters().parse("abC"), Ok("abC".to_string()));
        assert_eq!(digit().parse("7"), Ok('7'));
        assert_eq!(digits().parse(""), Ok(String::new()));
        assert_eq!(whitespace().parse(" \t\n"), Ok(" \t\n".to_string()));
        assert_eq!(optional_whitespace().parse(""), Ok(String::new()));

        let failure = whitespace().parse("x").unwrap_err();
        assert_eq!(failure.expected, vec!["whitespace".to_string()]);

        let failure = digit().parse("x").unwrap_err();
        assert_eq!(failure.expected, vec!["a digit".to_string()]);
    }
}
