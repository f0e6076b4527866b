// crates/tagged-urn/src/specificity.rs
// ============================================================================
// Module: Specificity
// Description: Graded specificity counts for tag sets.
// Purpose: Rank identifiers so exact constraints beat wildcard constraints.
// Dependencies: serde::{Deserialize, Serialize}, crate::tag
// ============================================================================

//! ## Overview
//! Exact values weigh 3, `*` weighs 2, `!` weighs 1 and `?` weighs nothing.
//! [`Specificity`] keeps the per-class counts; its derived ordering compares
//! `(exact, must_have_any, must_not)` left to right.

use serde::Deserialize;
use serde::Serialize;

use crate::tag::TagValue;

/// Per-class tag counts for one identifier.
///
/// # Invariants
/// - Field order defines the lexicographic comparison used by `Ord`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Specificity {
    /// Number of exact-value tags.
    pub exact: usize,
    /// Number of `*` tags.
    pub must_have_any: usize,
    /// Number of `!` tags.
    pub must_not: usize,
}

impl Specificity {
    /// Weight of an exact-value tag.
    pub const EXACT_WEIGHT: usize = 3;
    /// Weight of a `*` tag.
    pub const MUST_HAVE_ANY_WEIGHT: usize = 2;
    /// Weight of a `!` tag.
    pub const MUST_NOT_WEIGHT: usize = 1;

    /// Creates a specificity from explicit counts.
    #[must_use]
    pub const fn new(exact: usize, must_have_any: usize, must_not: usize) -> Self {
        Self {
            exact,
            must_have_any,
            must_not,
        }
    }

    /// Returns the weighted total.
    #[must_use]
    pub const fn score(self) -> usize {
        self.exact * Self::EXACT_WEIGHT
            + self.must_have_any * Self::MUST_HAVE_ANY_WEIGHT
            + self.must_not * Self::MUST_NOT_WEIGHT
    }

    /// Returns the matcher ranking key: total score, then the counts.
    #[must_use]
    pub const fn ranking_key(self) -> (usize, usize, usize, usize) {
        (self.score(), self.exact, self.must_have_any, self.must_not)
    }

    /// Returns the counts as a plain tuple.
    #[must_use]
    pub const fn as_tuple(self) -> (usize, usize, usize) {
        (self.exact, self.must_have_any, self.must_not)
    }

    /// Adds one value to the counts.
    pub fn record(&mut self, value: &TagValue) {
        match value {
            TagValue::Exact(_) => self.exact += 1,
            TagValue::MustHaveAny => self.must_have_any += 1,
            TagValue::MustNotHave => self.must_not += 1,
            TagValue::Unspecified => {}
        }
    }
}

impl<'a> FromIterator<&'a TagValue> for Specificity {
    fn from_iter<I: IntoIterator<Item = &'a TagValue>>(iter: I) -> Self {
        let mut specificity = Self::default();
        for value in iter {
            specificity.record(value);
        }
        specificity
    }
}
