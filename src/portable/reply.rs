//! Execution-time results and the furthest-failure merge
//!
//! Every action returns a [`Reply`]: an outcome (success with the next offset
//! and a value, or failure) plus the [`Furthest`] failure seen so far. The
//! furthest failure survives backtracking, so the final diagnostic points at
//! the deepest place any alternative reached rather than at the last branch
//! that happened to be tried.
//!
//! [`Furthest::merge`] is the single normalization point. Combinators that
//! run more than one action, or re-wrap an action's result, route through it.

use std::cmp::Ordering;
use std::sync::Arc;

/// The deepest failure observed so far
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Furthest {
    /// Highest offset at which an attempt failed (`None` until something fails)
    pub(crate) offset: Option<usize>,
    /// Descriptions of what was expected at `offset`
    pub(crate) expected: Vec<Arc<str>>,
}

impl Furthest {
    /// No failure recorded yet
    #[inline]
    pub(crate) fn none() -> Self {
        Self::default()
    }

    /// A fresh failure at `offset`
    #[inline]
    pub(crate) fn at(offset: usize, expected: Arc<str>) -> Self {
        Self {
            offset: Some(offset),
            expected: vec![expected],
        }
    }

    /// Merge `self` (newer) with `older`
    ///
    /// The deeper offset wins outright. On a tie the expected sets are
    /// unioned, deduplicated and sorted case-insensitively.
    pub(crate) fn merge(self, older: Furthest) -> Furthest {
        match self.offset.cmp(&older.offset) {
            Ordering::Greater => self,
            Ordering::Less => older,
            Ordering::Equal => {
                if older.expected.is_empty() {
                    return self;
                }
                if self.expected.is_empty() {
                    return older;
                }
                let mut expected = self.expected;
                expected.extend(older.expected);
                sort_expected(&mut expected);
                Furthest {
                    offset: self.offset,
                    expected,
                }
            }
        }
    }
}

/// Sort descriptions case-insensitively and drop duplicates
pub(crate) fn sort_expected(expected: &mut Vec<Arc<str>>) {
    expected.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });
    expected.dedup();
}

/// Outcome of running a single action
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Outcome<T> {
    /// Matched; parsing continues at `index`
    Success {
        /// Offset just past the consumed input
        index: usize,
        /// Produced value
        value: T,
    },
    /// Did not match
    Failure,
}

/// Result of running an action at some offset
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Reply<T> {
    pub(crate) outcome: Outcome<T>,
    pub(crate) furthest: Furthest,
}

impl<T> Reply<T> {
    /// A fresh success that has not seen any failure
    #[inline]
    pub(crate) fn success(index: usize, value: T) -> Self {
        Self {
            outcome: Outcome::Success { index, value },
            furthest: Furthest::none(),
        }
    }

    /// A fresh failure at `offset`
    #[inline]
    pub(crate) fn failure(offset: usize, expected: Arc<str>) -> Self {
        Self {
            outcome: Outcome::Failure,
            furthest: Furthest::at(offset, expected),
        }
    }

    /// A failure carrying an already-accumulated context
    #[inline]
    pub(crate) fn failed(furthest: Furthest) -> Self {
        Self {
            outcome: Outcome::Failure,
            furthest,
        }
    }

    /// Merge this reply (newer) with an older failure context
    #[inline]
    pub(crate) fn merge(self, older: Furthest) -> Self {
        Self {
            outcome: self.outcome,
            furthest: self.furthest.merge(older),
        }
    }

    #[inline]
    pub(crate) fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success { .. })
    }

    /// Transform the value of a success, keeping the failure context
    #[inline]
    pub(crate) fn map<U>(self, f: impl FnOnce(T) -> U) -> Reply<U> {
        let outcome = match self.outcome {
            Outcome::Success { index, value } => Outcome::Success {
                index,
                value: f(value),
            },
            Outcome::Failure => Outcome::Failure,
        };
        Reply {
            outcome,
            furthest: self.furthest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exp(items: &[&str]) -> Vec<Arc<str>> {
        items.iter().map(|s| Arc::from(*s)).collect()
    }

    #[test]
    fn test_deeper_newer_wins() {
        let newer = Furthest::at(5, "'a'".into());
        let older = Furthest::at(3, "'b'".into());
        let merged = newer.merge(older);
        assert_eq!(merged.offset, Some(5));
        assert_eq!(merged.expected, exp(&["'a'"]));
    }

    #[test]
    fn test_deeper_older_wins() {
        let newer = Furthest::at(1, "'a'".into());
        let older = Furthest::at(4, "'b'".into());
        let merged = newer.merge(older);
        assert_eq!(merged.offset, Some(4));
        assert_eq!(merged.expected, exp(&["'b'"]));
    }

    #[test]
    fn test_tie_unions_sorted_case_insensitively() {
        let newer = Furthest {
            offset: Some(2),
            expected: exp(&["b", "Z"]),
        };
        let older = Furthest {
            offset: Some(2),
            expected: exp(&["a", "B", "b"]),
        };
        let merged = newer.merge(older);
        assert_eq!(merged.offset, Some(2));
        assert_eq!(merged.expected, exp(&["a", "B", "b", "Z"]));
    }

    #[test]
    fn test_none_is_shallowest() {
        let merged = Furthest::none().merge(Furthest::at(0, "x".into()));
        assert_eq!(merged.offset, Some(0));

        let merged = Furthest::at(0, "x".into()).merge(Furthest::none());
        assert_eq!(merged.expected, exp(&["x"]));

        assert_eq!(Furthest::none().merge(Furthest::none()), Furthest::none());
    }

    #[test]
    fn test_reply_merge_keeps_outcome() {
        let reply = Reply::success(3, 'x').merge(Furthest::at(7, "y".into()));
        assert_eq!(reply.outcome, Outcome::Success { index: 3, value: 'x' });
        assert_eq!(reply.furthest.offset, Some(7));
    }

    #[test]
    fn test_reply_map_keeps_context() {
        let reply = Reply::success(1, 2)
            .merge(Furthest::at(4, "d".into()))
            .map(|n| n * 10);
        assert_eq!(reply.outcome, Outcome::Success { index: 1, value: 20 });
        assert_eq!(reply.furthest.offset, Some(4));

        let failed: Reply<i32> = Reply::failure(0, "e".into());
        assert!(!failed.map(|n| n + 1).is_success());
    }
}
