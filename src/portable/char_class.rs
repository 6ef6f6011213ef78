//! Character classes for single-character and run primitives
//!
//! [`CharClass`] names the common classes used by the built-in sugar
//! parsers (`letter`, `digits`, `whitespace`, ...). [`CharSet`] backs
//! `one_of`/`none_of` with an ASCII bitmap and a sorted fallback for
//! everything else.

/// A named character class
///
/// # Example
///
/// ```rust
/// use combinol::portable::char_class::CharClass;
///
/// assert!(CharClass::Digit.matches('5'));
/// assert!(!CharClass::Digit.matches('a'));
/// assert!(CharClass::Letter.matches('Q'));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    /// Digit: [0-9]
    Digit,
    /// ASCII letter: [a-zA-Z]
    Letter,
    /// Alphanumeric: [a-zA-Z0-9]
    Alnum,
    /// Word character: [a-zA-Z0-9_]
    Word,
    /// Hex digit: [0-9a-fA-F]
    HexDigit,
    /// Unicode whitespace (`\s`)
    Space,
    /// Any character
    Any,
}

impl CharClass {
    /// Test a single character
    #[inline]
    pub fn matches(self, c: char) -> bool {
        match self {
            CharClass::Digit => c.is_ascii_digit(),
            CharClass::Letter => c.is_ascii_alphabetic(),
            CharClass::Alnum => c.is_ascii_alphanumeric(),
            CharClass::Word => c.is_ascii_alphanumeric() || c == '_',
            CharClass::HexDigit => c.is_ascii_hexdigit(),
            CharClass::Space => c.is_whitespace(),
            CharClass::Any => true,
        }
    }

    /// Get a predicate closure for this class
    #[inline]
    pub fn predicate(self) -> impl Fn(char) -> bool + Send + Sync + Copy + 'static {
        move |c| self.matches(c)
    }

    /// Human-readable name for one character of this class
    pub fn description(self) -> &'static str {
        match self {
            CharClass::Digit => "a digit",
            CharClass::Letter => "a letter",
            CharClass::Alnum => "a letter or digit",
            CharClass::Word => "a word character",
            CharClass::HexDigit => "a hex digit",
            CharClass::Space => "whitespace",
            CharClass::Any => "any character",
        }
    }
}

/// A set of characters built from a string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharSet {
    /// Bit `n` of word `n / 64` is set when ASCII character `n` is a member
    ascii: [u64; 2],
    /// Sorted, deduplicated non-ASCII members
    other: Vec<char>,
}

impl CharSet {
    /// Build a set from every character of `chars`
    pub fn new(chars: &str) -> Self {
        let mut ascii = [0u64; 2];
        let mut other = Vec::new();
        for c in chars.chars() {
            if c.is_ascii() {
                let n = c as usize;
                ascii[n / 64] |= 1u64 << (n % 64);
            } else {
                other.push(c);
            }
        }
        other.sort_unstable();
        other.dedup();
        Self { ascii, other }
    }

    /// Membership test
    #[inline]
    pub fn contains(&self, c: char) -> bool {
        if c.is_ascii() {
            let n = c as usize;
            self.ascii[n / 64] & (1u64 << (n % 64)) != 0
        } else {
            self.other.binary_search(&c).is_ok()
        }
    }
}
