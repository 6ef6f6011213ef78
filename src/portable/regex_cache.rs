//! Thread-local regex cache for anchored pattern compilation
//!
//! Grammars often build the same pattern many times (helper functions that
//! return a fresh parser per call). Compiled, anchored patterns are cached
//! per thread so each distinct pattern compiles once.

use hashbrown::HashMap;
use regex::Regex;
use std::cell::RefCell;

thread_local! {
    /// Thread-local cache of compiled anchored patterns, keyed by source pattern
    static REGEX_CACHE: RefCell<HashMap<String, Regex>> = RefCell::new(HashMap::new());
}

/// Get or compile `pattern`, anchored to the start of the haystack
///
/// The pattern is wrapped as `^(?:pattern)` so a match can only begin where
/// the caller slices the input.
pub fn get_or_compile(pattern: &str) -> Result<Regex, regex::Error> {
    REGEX_CACHE.with(|cache| {
        if let Some(regex) = cache.borrow().get(pattern) {
            return Ok(regex.clone());
        }

        let regex = Regex::new(&format!("^(?:{})", pattern))?;
        cache
            .borrow_mut()
            .insert(pattern.to_string(), regex.clone());
        Ok(regex)
    })
}

/// Clear the regex cache
pub fn clear_cache() {
    REGEX_CACHE.with(|cache| cache.borrow_mut().clear());
}

/// Get the number of cached patterns
pub fn cache_size() -> usize {
    REGEX_CACHE.with(|cache| cache.borrow().len())
}
